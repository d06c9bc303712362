// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Borrowed descriptions of pixel memory handed to the resolvers.

use image::{math::Rect, DynamicImage};
use thiserror::Error;

use crate::format::{CompressedFormat, PixelFormat, PixelType};

/// Concrete pixel encodings that can be uploaded without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelRepr {
	Alpha8,
	Alpha16,
	Gray8,
	Gray16,
	Rgba8,
	Rgba16,
	Bgr8,
	Bgra8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
	#[error("buffer holds {len} bytes but the image needs {needed}")]
	BufferTooSmall { needed: usize, len: usize },
	#[error("row stride of {stride} bytes is shorter than a {row_bytes} byte row")]
	StrideTooShort { stride: usize, row_bytes: usize },
	#[error("sub-image {rect:?} does not fit in a {width}x{height} image")]
	OutOfBounds { rect: Rect, width: u32, height: u32 },
	#[error("sub-image origin ({x}, {y}) is not on a {dim}x{dim} block boundary")]
	UnalignedBlockOrigin { x: u32, y: u32, dim: u32 },
	#[error("image geometry overflows the address space")]
	SizeOverflow,
}

/// Uncompressed pixel memory: `height` rows of `width` pixels, rows `stride`
/// bytes apart, starting at `bounds.x`/`bounds.y` inside `data`.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
	data: &'a [u8],
	stride: usize,
	bounds: Rect,
	repr: PixelRepr,
}

/// Anything the texture upload functions accept.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
	View(PixelView<'a>),
	Dynamic(&'a DynamicImage),
}

/// S3TC-style block data: `stride` bytes per row of blocks.
#[derive(Debug, Clone, Copy)]
pub struct CompressedImage<'a> {
	data: &'a [u8],
	stride: usize,
	bounds: Rect,
	format: CompressedFormat,
}

impl PixelRepr {
	pub fn bytes_per_pixel(&self) -> usize {
		match self {
			Self::Alpha8 | Self::Gray8 => 1,
			Self::Alpha16 | Self::Gray16 => 2,
			Self::Bgr8 => 3,
			Self::Rgba8 | Self::Bgra8 => 4,
			Self::Rgba16 => 8,
		}
	}

	pub fn format(&self) -> PixelFormat {
		match self {
			Self::Alpha8 | Self::Alpha16 => PixelFormat::Alpha,
			Self::Gray8 | Self::Gray16 => PixelFormat::Luminance,
			Self::Rgba8 | Self::Rgba16 => PixelFormat::Rgba,
			Self::Bgr8 => PixelFormat::Bgr,
			Self::Bgra8 => PixelFormat::Bgra,
		}
	}

	pub fn pixel_type(&self) -> PixelType {
		match self {
			Self::Alpha16 | Self::Gray16 | Self::Rgba16 => PixelType::UnsignedShort,
			_ => PixelType::UnsignedByte,
		}
	}
}

fn fit(outer: Rect, rect: Rect) -> Result<Rect, SourceError> {
	let fits = rect.x.checked_add(rect.width).is_some_and(|r| r <= outer.width)
		&& rect.y.checked_add(rect.height).is_some_and(|b| b <= outer.height);

	match fits {
		true => Ok(Rect {
			x: outer.x + rect.x,
			y: outer.y + rect.y,
			width: rect.width,
			height: rect.height,
		}),
		false => Err(SourceError::OutOfBounds {
			rect,
			width: outer.width,
			height: outer.height,
		}),
	}
}

impl<'a> PixelView<'a> {
	/// Describe `data` as `height` rows of `width` pixels, `stride` bytes apart.
	///
	/// 16 bit components are read in native byte order.
	pub fn new(
		data: &'a [u8],
		stride: usize,
		width: u32,
		height: u32,
		repr: PixelRepr,
	) -> Result<Self, SourceError> {
		let row_bytes = row_bytes(width, repr)?;
		if stride < row_bytes {
			return Err(SourceError::StrideTooShort { stride, row_bytes })
		}

		let needed = match (width, height) {
			(0, _) | (_, 0) => 0,
			_ => (height as usize - 1)
				.checked_mul(stride)
				.and_then(|rows| rows.checked_add(row_bytes))
				.ok_or(SourceError::SizeOverflow)?,
		};
		if data.len() < needed {
			return Err(SourceError::BufferTooSmall {
				needed,
				len: data.len(),
			})
		}

		Ok(Self {
			data,
			stride,
			bounds: Rect {
				x: 0,
				y: 0,
				width,
				height,
			},
			repr,
		})
	}

	/// Tightly packed rows.
	pub fn packed(data: &'a [u8], width: u32, height: u32, repr: PixelRepr) -> Result<Self, SourceError> {
		Self::new(data, row_bytes(width, repr)?, width, height, repr)
	}

	/// Narrow this view to `rect`, given relative to the current bounds.
	///
	/// The row stride is kept, so the result generally has a row length
	/// larger than its width.
	pub fn sub_image(&self, rect: Rect) -> Result<Self, SourceError> {
		Ok(Self {
			bounds: fit(self.bounds, rect)?,
			..*self
		})
	}

	pub fn width(&self) -> u32 {
		self.bounds.width
	}

	pub fn height(&self) -> u32 {
		self.bounds.height
	}

	pub fn stride(&self) -> usize {
		self.stride
	}

	pub fn repr(&self) -> PixelRepr {
		self.repr
	}

	/// Bytes from the first pixel inside the bounds to the end of the buffer.
	///
	/// Empty for an empty view.
	pub fn pixels(&self) -> &'a [u8] {
		if self.bounds.width == 0 || self.bounds.height == 0 {
			return &[]
		}

		// bounded by the length checked in `new`, so this cannot overflow
		let offset =
			self.bounds.y as usize * self.stride + self.bounds.x as usize * self.repr.bytes_per_pixel();
		debug_assert!(offset < self.data.len());
		&self.data[offset..]
	}

	/// Borrow one of the `image` buffers that map directly onto a [`PixelRepr`].
	///
	/// Returns `None` for everything else.
	pub fn from_dynamic(image: &'a DynamicImage) -> Option<Self> {
		let (width, height) = (image.width(), image.height());
		let (data, repr) = match image {
			DynamicImage::ImageLuma8(buffer) => (&buffer.as_raw()[..], PixelRepr::Gray8),
			DynamicImage::ImageRgba8(buffer) => (&buffer.as_raw()[..], PixelRepr::Rgba8),
			DynamicImage::ImageLuma16(buffer) =>
				(bytemuck::cast_slice::<u16, u8>(buffer.as_raw()), PixelRepr::Gray16),
			DynamicImage::ImageRgba16(buffer) =>
				(bytemuck::cast_slice::<u16, u8>(buffer.as_raw()), PixelRepr::Rgba16),
			_ => return None,
		};

		// image buffers are always tightly packed and sized to their dimensions
		Self::packed(data, width, height, repr).ok()
	}
}

impl<'a> ImageSource<'a> {
	pub fn width(&self) -> u32 {
		match self {
			Self::View(view) => view.width(),
			Self::Dynamic(image) => image.width(),
		}
	}

	pub fn height(&self) -> u32 {
		match self {
			Self::View(view) => view.height(),
			Self::Dynamic(image) => image.height(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.width() == 0 || self.height() == 0
	}
}

impl<'a> From<PixelView<'a>> for ImageSource<'a> {
	fn from(view: PixelView<'a>) -> Self {
		Self::View(view)
	}
}

impl<'a> From<&'a DynamicImage> for ImageSource<'a> {
	fn from(image: &'a DynamicImage) -> Self {
		Self::Dynamic(image)
	}
}

impl<'a> CompressedImage<'a> {
	/// Block rows `stride` bytes apart.
	///
	/// Only the stride is checked here. A buffer too short for the claimed
	/// geometry is reported when the data is resolved for upload.
	pub fn new(
		data: &'a [u8],
		stride: usize,
		width: u32,
		height: u32,
		format: CompressedFormat,
	) -> Result<Self, SourceError> {
		let row_bytes = blocks(width)
			.checked_mul(format.block_bytes())
			.ok_or(SourceError::SizeOverflow)?;
		if stride < row_bytes {
			return Err(SourceError::StrideTooShort { stride, row_bytes })
		}

		Ok(Self {
			data,
			stride,
			bounds: Rect {
				x: 0,
				y: 0,
				width,
				height,
			},
			format,
		})
	}

	/// Tightly packed block rows.
	pub fn packed(data: &'a [u8], width: u32, height: u32, format: CompressedFormat) -> Self {
		Self {
			data,
			stride: blocks(width).saturating_mul(format.block_bytes()),
			bounds: Rect {
				x: 0,
				y: 0,
				width,
				height,
			},
			format,
		}
	}

	/// Narrow this image to `rect`, relative to the current bounds. The origin
	/// has to sit on a block boundary.
	pub fn sub_image(&self, rect: Rect) -> Result<Self, SourceError> {
		let dim = CompressedFormat::BLOCK_DIM;
		if rect.x % dim != 0 || rect.y % dim != 0 {
			return Err(SourceError::UnalignedBlockOrigin {
				x: rect.x,
				y: rect.y,
				dim,
			})
		}

		Ok(Self {
			bounds: fit(self.bounds, rect)?,
			..*self
		})
	}

	pub fn width(&self) -> u32 {
		self.bounds.width
	}

	pub fn height(&self) -> u32 {
		self.bounds.height
	}

	pub fn stride(&self) -> usize {
		self.stride
	}

	pub fn format(&self) -> CompressedFormat {
		self.format
	}

	pub fn is_empty(&self) -> bool {
		self.bounds.width == 0 || self.bounds.height == 0
	}

	pub(crate) fn data(&self) -> &'a [u8] {
		self.data
	}

	/// Byte offset of the block holding the top left pixel of the bounds.
	pub(crate) fn origin_offset(&self) -> Result<usize, SourceError> {
		let dim = CompressedFormat::BLOCK_DIM;
		let row = ((self.bounds.y / dim) as usize).checked_mul(self.stride);
		let column = ((self.bounds.x / dim) as usize).checked_mul(self.format.block_bytes());

		row.zip(column)
			.and_then(|(row, column)| row.checked_add(column))
			.ok_or(SourceError::SizeOverflow)
	}
}

fn row_bytes(width: u32, repr: PixelRepr) -> Result<usize, SourceError> {
	(width as usize)
		.checked_mul(repr.bytes_per_pixel())
		.ok_or(SourceError::SizeOverflow)
}

/// Number of blocks needed to cover `pixels`.
pub(crate) fn blocks(pixels: u32) -> usize {
	pixels.div_ceil(CompressedFormat::BLOCK_DIM) as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect {
		Rect {
			x,
			y,
			width,
			height,
		}
	}

	#[test]
	fn view_checks_length() {
		let data = [0u8; 15];
		assert_eq!(
			PixelView::new(&data, 8, 2, 2, PixelRepr::Rgba8).unwrap_err(),
			SourceError::BufferTooSmall { needed: 16, len: 15 }
		);
		// last row does not need the padding
		assert!(PixelView::new(&data, 9, 2, 2, PixelRepr::Bgr8).is_ok());
		assert_eq!(
			PixelView::new(&data, 10, 2, 2, PixelRepr::Bgr8).unwrap_err(),
			SourceError::BufferTooSmall { needed: 16, len: 15 }
		);
	}

	#[test]
	fn huge_stride_is_rejected() {
		let data = [0u8; 4];
		assert_eq!(
			PixelView::new(&data, usize::MAX / 2 + 1, 1, 3, PixelRepr::Gray8).unwrap_err(),
			SourceError::SizeOverflow
		);
		// a single row never multiplies the stride
		assert!(PixelView::new(&data, usize::MAX, 4, 1, PixelRepr::Gray8).is_ok());
	}

	#[test]
	fn empty_view_has_no_pixels() {
		let data = [0u8; 16];
		let view = PixelView::packed(&data, 4, 4, PixelRepr::Gray8).unwrap();
		let empty = view.sub_image(rect(0, 4, 4, 0)).unwrap();
		assert!(empty.pixels().is_empty());
	}

	#[test]
	fn view_checks_stride() {
		let data = [0u8; 64];
		assert_eq!(
			PixelView::new(&data, 6, 2, 2, PixelRepr::Rgba8).unwrap_err(),
			SourceError::StrideTooShort {
				stride: 6,
				row_bytes: 8
			}
		);
	}

	#[test]
	fn sub_image_offsets_pixels() {
		let data = (0..64).collect::<Vec<u8>>();
		let view = PixelView::packed(&data, 8, 8, PixelRepr::Gray8).unwrap();
		let sub = view.sub_image(rect(2, 3, 4, 2)).unwrap();

		assert_eq!(sub.width(), 4);
		assert_eq!(sub.stride(), 8);
		assert_eq!(sub.pixels()[0], 3 * 8 + 2);

		let nested = sub.sub_image(rect(1, 1, 2, 1)).unwrap();
		assert_eq!(nested.pixels()[0], 4 * 8 + 3);
	}

	#[test]
	fn sub_image_out_of_bounds() {
		let data = [0u8; 16];
		let view = PixelView::packed(&data, 4, 4, PixelRepr::Alpha8).unwrap();
		assert!(matches!(
			view.sub_image(rect(2, 0, 3, 1)),
			Err(SourceError::OutOfBounds { .. })
		));
	}

	#[test]
	fn dynamic_recognition() {
		let gray = DynamicImage::new_luma16(3, 2);
		let view = PixelView::from_dynamic(&gray).unwrap();
		assert_eq!(view.repr(), PixelRepr::Gray16);
		assert_eq!(view.stride(), 6);

		let rgb = DynamicImage::new_rgb8(3, 2);
		assert!(PixelView::from_dynamic(&rgb).is_none());
	}

	#[test]
	fn compressed_sub_image_alignment() {
		let data = [0u8; 64];
		let image = CompressedImage::packed(&data, 16, 8, CompressedFormat::Dxt1);
		assert_eq!(image.stride(), 32);

		assert_eq!(
			image.sub_image(rect(2, 0, 4, 4)).unwrap_err(),
			SourceError::UnalignedBlockOrigin { x: 2, y: 0, dim: 4 }
		);

		let sub = image.sub_image(rect(8, 4, 8, 4)).unwrap();
		assert_eq!(sub.origin_offset(), Ok(32 + 2 * 8));
	}
}
