// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::borrow::Cow;

use gl::types::GLenum;

use super::TextureError;
use crate::source::{blocks, CompressedImage, SourceError};

/// Arguments for `glCompressedTexImage2D`.
///
/// `data` is always exactly the block-aligned rectangle, row after row.
#[derive(Debug)]
pub struct CompressedLayout<'a> {
	pub data: Cow<'a, [u8]>,
	pub format: GLenum,
}

impl CompressedLayout<'_> {
	/// `imageSize` argument of the upload.
	pub fn byte_len(&self) -> usize {
		self.data.len()
	}
}

/// Resolve `image` for a compressed upload.
///
/// Compressed uploads cannot skip bytes between rows, so a sub-image whose
/// rows are not already contiguous is copied, one block row at a time, into
/// a tightly packed buffer. Otherwise the source is borrowed.
pub fn resolve_compressed<'a>(
	image: &CompressedImage<'a>,
) -> Result<CompressedLayout<'a>, TextureError> {
	let format = image.format();
	let gl_format = format
		.gl_enum()
		.ok_or(TextureError::UnsupportedCompressedFormat(format))?;

	let packed_stride = blocks(image.width())
		.checked_mul(format.block_bytes())
		.ok_or(SourceError::SizeOverflow)?;
	let block_rows = blocks(image.height());
	let byte_len = packed_stride
		.checked_mul(block_rows)
		.ok_or(SourceError::SizeOverflow)?;

	// an origin past the end leaves nothing to copy
	let source = image.data().get(image.origin_offset()?..).unwrap_or(&[]);

	if image.stride() == packed_stride {
		return match source.get(..byte_len) {
			Some(data) => Ok(CompressedLayout {
				data: Cow::Borrowed(data),
				format: gl_format,
			}),
			None => Err(TextureError::ShortCopy {
				expected: byte_len,
				copied: source.len(),
			}),
		}
	}

	log::debug!(
		"repacking {}x{} {format:?} sub-image (stride {} -> {packed_stride})",
		image.width(),
		image.height(),
		image.stride()
	);

	let mut packed = Vec::with_capacity(byte_len);
	for row in 0..block_rows {
		let row_start = row
			.checked_mul(image.stride())
			.map_or(source.len(), |start| usize::min(start, source.len()));
		let available = &source[row_start..];
		let copied = usize::min(available.len(), packed_stride);

		if copied < packed_stride {
			return Err(TextureError::ShortCopy {
				expected: packed_stride,
				copied,
			})
		}

		packed.extend_from_slice(&available[..packed_stride]);
	}

	Ok(CompressedLayout {
		data: Cow::Owned(packed),
		format: gl_format,
	})
}
