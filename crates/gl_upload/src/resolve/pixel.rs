// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::borrow::Cow;

use crate::{
	format::{PixelFormat, PixelType},
	source::{ImageSource, PixelView},
};

#[cfg(test)]
mod test;

/// Arguments for an uncompressed texture upload.
///
/// `row_length` is in pixels and goes to `GL_UNPACK_ROW_LENGTH`.
#[derive(Debug)]
pub struct PixelLayout<'a> {
	pub data: Cow<'a, [u8]>,
	pub row_length: usize,
	pub format: PixelFormat,
	pub ty: PixelType,
}

impl<'a> PixelLayout<'a> {
	fn from_view(view: &PixelView<'a>) -> Self {
		let repr = view.repr();
		let bpp = repr.bytes_per_pixel();

		if view.stride() % bpp != 0 {
			panic!(
				"row stride of {} bytes is not a whole number of {bpp} byte {repr:?} pixels, \
				 OpenGL cannot express this layout",
				view.stride()
			);
		}

		Self {
			data: Cow::Borrowed(view.pixels()),
			row_length: view.stride() / bpp,
			format: repr.format(),
			ty: repr.pixel_type(),
		}
	}
}

/// Resolve `source` for `glTexImage2D`/`glTexSubImage2D`.
///
/// Recognized layouts are borrowed as is. Anything else is converted into a
/// fresh, tightly packed RGBA8 buffer.
///
/// # PANICS
/// * if the row stride of a view is not a multiple of its pixel size
pub fn resolve_pixels<'a>(source: &ImageSource<'a>) -> PixelLayout<'a> {
	match source {
		ImageSource::View(view) => PixelLayout::from_view(view),
		ImageSource::Dynamic(image) => match PixelView::from_dynamic(image) {
			Some(view) => PixelLayout::from_view(&view),
			None => {
				log::debug!("converting {:?} image to RGBA8 for upload", image.color());

				let rgba = image.to_rgba8();
				let row_length = rgba.width() as usize;

				PixelLayout {
					data: Cow::Owned(rgba.into_raw()),
					row_length,
					format: PixelFormat::Rgba,
					ty: PixelType::UnsignedByte,
				}
			},
		},
	}
}
