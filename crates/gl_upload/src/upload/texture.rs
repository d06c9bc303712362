// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::ffi::c_void;

use gl::types::{GLenum, GLint, GLsizei};
use image::math::Rect;

use crate::{
	format::unpack,
	resolve::{resolve_compressed, resolve_pixels, TextureError},
	source::{CompressedImage, ImageSource},
};

/// Read client memory, not a pixel unpack buffer.
unsafe fn unbind_unpack_buffer() {
	gl::BindBuffer(unpack::BUFFER, 0);
}

unsafe fn set_unpack_rows(row_length: usize) {
	unbind_unpack_buffer();
	gl::PixelStorei(unpack::ALIGNMENT, 1);
	gl::PixelStorei(unpack::ROW_LENGTH, row_length as GLint);
}

fn exceeds(dest: &Rect, width: u32, height: u32) -> bool {
	dest.width > width || dest.height > height
}

/// Upload `source` into the texture bound to `target` with `glTexImage2D`.
///
/// Does nothing if `source` has no pixels.
///
/// # SAFETY
/// * must be called from GL thread
///
/// # SIDE EFFECTS
/// * binds 0 to `GL_PIXEL_UNPACK_BUFFER`
/// * sets `GL_UNPACK_ALIGNMENT` to 1 and `GL_UNPACK_ROW_LENGTH` to the source row length
///
/// # PANICS
/// * if the row stride of a view is not a multiple of its pixel size
pub unsafe fn tex_image_2d(
	target: GLenum,
	level: GLint,
	internal_format: GLint,
	border: GLint,
	source: &ImageSource,
) {
	if source.is_empty() {
		return
	}

	let layout = resolve_pixels(source);

	log::trace!(
		"glTexImage2D {}x{} {:?}/{:?}, row length {}",
		source.width(),
		source.height(),
		layout.format,
		layout.ty,
		layout.row_length
	);

	set_unpack_rows(layout.row_length);
	gl::TexImage2D(
		target,
		level,
		internal_format,
		source.width() as GLsizei,
		source.height() as GLsizei,
		border,
		layout.format.gl_enum(),
		layout.ty.gl_enum(),
		layout.data.as_ptr() as *const c_void,
	);
}

/// Upload the top left `dest.width` x `dest.height` pixels of `source` to
/// `dest` in the texture bound to `target` with `glTexSubImage2D`.
///
/// Does nothing if `source` has no pixels or `dest` is larger than `source`.
///
/// # SAFETY
/// * must be called from GL thread
///
/// # SIDE EFFECTS
/// * same as [`tex_image_2d`]
pub unsafe fn tex_sub_image_2d(target: GLenum, level: GLint, dest: Rect, source: &ImageSource) {
	if source.is_empty() {
		return
	}

	if exceeds(&dest, source.width(), source.height()) {
		log::warn!(
			"dropping texture sub-image upload: destination {}x{} exceeds {}x{} source",
			dest.width,
			dest.height,
			source.width(),
			source.height()
		);
		return
	}

	let layout = resolve_pixels(source);

	log::trace!(
		"glTexSubImage2D {}x{} at ({}, {}) {:?}/{:?}, row length {}",
		dest.width,
		dest.height,
		dest.x,
		dest.y,
		layout.format,
		layout.ty,
		layout.row_length
	);

	set_unpack_rows(layout.row_length);
	gl::TexSubImage2D(
		target,
		level,
		dest.x as GLint,
		dest.y as GLint,
		dest.width as GLsizei,
		dest.height as GLsizei,
		layout.format.gl_enum(),
		layout.ty.gl_enum(),
		layout.data.as_ptr() as *const c_void,
	);
}

/// Upload block compressed `image` into the texture bound to `target` with
/// `glCompressedTexImage2D`. The internal format follows the image format.
///
/// Does nothing if `image` has no pixels.
///
/// # SAFETY
/// * must be called from GL thread
///
/// # SIDE EFFECTS
/// * binds 0 to `GL_PIXEL_UNPACK_BUFFER`
pub unsafe fn compressed_tex_image_2d(
	target: GLenum,
	level: GLint,
	border: GLint,
	image: &CompressedImage,
) -> Result<(), TextureError> {
	if image.is_empty() {
		return Ok(())
	}

	let layout = resolve_compressed(image)?;

	log::trace!(
		"glCompressedTexImage2D {}x{} {:?}, {} bytes",
		image.width(),
		image.height(),
		image.format(),
		layout.byte_len()
	);

	unbind_unpack_buffer();
	gl::CompressedTexImage2D(
		target,
		level,
		layout.format,
		image.width() as GLsizei,
		image.height() as GLsizei,
		border,
		layout.byte_len() as GLsizei,
		layout.data.as_ptr() as *const c_void,
	);

	Ok(())
}

/// Upload the top left `dest.width` x `dest.height` pixels of `image` to
/// `dest` with `glCompressedTexSubImage2D`.
///
/// Does nothing if `image` has no pixels or `dest` is larger than `image`.
///
/// # SAFETY
/// * must be called from GL thread
///
/// # SIDE EFFECTS
/// * binds 0 to `GL_PIXEL_UNPACK_BUFFER`
pub unsafe fn compressed_tex_sub_image_2d(
	target: GLenum,
	level: GLint,
	dest: Rect,
	image: &CompressedImage,
) -> Result<(), TextureError> {
	if image.is_empty() {
		return Ok(())
	}

	if exceeds(&dest, image.width(), image.height()) {
		log::warn!(
			"dropping compressed sub-image upload: destination {}x{} exceeds {}x{} source",
			dest.width,
			dest.height,
			image.width(),
			image.height()
		);
		return Ok(())
	}

	// the upload has no row length, so the source is cut to the destination size
	let image = image.sub_image(Rect {
		x: 0,
		y: 0,
		width: dest.width,
		height: dest.height,
	})?;
	let layout = resolve_compressed(&image)?;

	log::trace!(
		"glCompressedTexSubImage2D {}x{} at ({}, {}) {:?}, {} bytes",
		dest.width,
		dest.height,
		dest.x,
		dest.y,
		image.format(),
		layout.byte_len()
	);

	unbind_unpack_buffer();
	gl::CompressedTexSubImage2D(
		target,
		level,
		dest.x as GLint,
		dest.y as GLint,
		dest.width as GLsizei,
		dest.height as GLsizei,
		layout.format,
		layout.byte_len() as GLsizei,
		layout.data.as_ptr() as *const c_void,
	);

	Ok(())
}
