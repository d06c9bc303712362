// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::{GLenum, GLintptr, GLsizeiptr};

use crate::layout::{LayoutError, RawBuffer};

unsafe fn upload(target: GLenum, raw: RawBuffer, usage: GLenum) {
	log::trace!(
		"glBufferData {} x {} bytes to {target:#x}",
		raw.count(),
		raw.element_size()
	);

	gl::BufferData(target, raw.byte_len() as GLsizeiptr, raw.as_ptr(), usage);
}

unsafe fn upload_sub(target: GLenum, byte_offset: usize, raw: RawBuffer) {
	log::trace!(
		"glBufferSubData {} x {} bytes to {target:#x} at {byte_offset}",
		raw.count(),
		raw.element_size()
	);

	gl::BufferSubData(target, byte_offset as GLintptr, raw.byte_len() as GLsizeiptr, raw.as_ptr());
}

/// (Re)create the storage of the buffer bound to `target` from `values`.
///
/// # SAFETY
/// * must be called from GL thread
/// * a buffer must be bound to `target`
pub unsafe fn buffer_data<T: bytemuck::Pod>(
	target: GLenum,
	values: &[T],
	usage: GLenum,
) -> Result<(), LayoutError> {
	upload(target, RawBuffer::of_slice(values)?, usage);
	Ok(())
}

/// Like [`buffer_data`] for a single value.
///
/// # SAFETY
/// * must be called from GL thread
/// * a buffer must be bound to `target`
pub unsafe fn buffer_data_value<T: bytemuck::Pod>(target: GLenum, value: &T, usage: GLenum) {
	upload(target, RawBuffer::of_value(value), usage);
}

/// Overwrite part of the buffer bound to `target`, starting `byte_offset`
/// bytes in.
///
/// # SAFETY
/// * must be called from GL thread
/// * a buffer large enough to hold the data at `byte_offset` must be bound to `target`
pub unsafe fn buffer_sub_data<T: bytemuck::Pod>(
	target: GLenum,
	byte_offset: usize,
	values: &[T],
) -> Result<(), LayoutError> {
	upload_sub(target, byte_offset, RawBuffer::of_slice(values)?);
	Ok(())
}

/// Like [`buffer_sub_data`] for a single value.
///
/// # SAFETY
/// * same as [`buffer_sub_data`]
pub unsafe fn buffer_sub_data_value<T: bytemuck::Pod>(target: GLenum, byte_offset: usize, value: &T) {
	upload_sub(target, byte_offset, RawBuffer::of_value(value));
}
