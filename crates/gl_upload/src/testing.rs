// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Recording stand-ins for the GL entry points used by this crate.
//!
//! [`install`] loads the stubs through [`crate::load_with`]; every call made
//! afterwards on the same thread is appended to a thread local log.

use std::{cell::RefCell, ffi::c_void, ptr, slice, sync::Once};

use gl::types::{GLboolean, GLenum, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlCall {
	BindBuffer {
		target: GLenum,
		buffer: GLuint,
	},
	PixelStorei {
		pname: GLenum,
		param: GLint,
	},
	TexImage2D {
		target: GLenum,
		level: GLint,
		internal_format: GLint,
		width: GLsizei,
		height: GLsizei,
		border: GLint,
		format: GLenum,
		ty: GLenum,
		pixels: usize,
	},
	TexSubImage2D {
		target: GLenum,
		level: GLint,
		x: GLint,
		y: GLint,
		width: GLsizei,
		height: GLsizei,
		format: GLenum,
		ty: GLenum,
		pixels: usize,
	},
	CompressedTexImage2D {
		target: GLenum,
		level: GLint,
		format: GLenum,
		width: GLsizei,
		height: GLsizei,
		border: GLint,
		data: Vec<u8>,
	},
	CompressedTexSubImage2D {
		target: GLenum,
		level: GLint,
		x: GLint,
		y: GLint,
		width: GLsizei,
		height: GLsizei,
		format: GLenum,
		data: Vec<u8>,
	},
	BufferData {
		target: GLenum,
		data: Vec<u8>,
		usage: GLenum,
	},
	BufferSubData {
		target: GLenum,
		offset: GLintptr,
		data: Vec<u8>,
	},
	VertexAttribPointer {
		index: GLuint,
		size: GLint,
		ty: GLenum,
		normalized: GLboolean,
		stride: GLsizei,
		offset: usize,
	},
	VertexAttribIPointer {
		index: GLuint,
		size: GLint,
		ty: GLenum,
		stride: GLsizei,
		offset: usize,
	},
	VertexPointer {
		size: GLint,
		ty: GLenum,
		stride: GLsizei,
		offset: usize,
	},
	NormalPointer {
		ty: GLenum,
		stride: GLsizei,
		offset: usize,
	},
	ColorPointer {
		size: GLint,
		ty: GLenum,
		stride: GLsizei,
		offset: usize,
	},
	TexCoordPointer {
		size: GLint,
		ty: GLenum,
		stride: GLsizei,
		offset: usize,
	},
}

thread_local! {
	static CALLS: RefCell<Vec<GlCall>> = RefCell::new(Vec::new());
}

static LOAD: Once = Once::new();

/// Point the bindings at the stubs and clear this thread's call log.
pub fn install() {
	LOAD.call_once(|| crate::load_with(stub_address));
	CALLS.with(|calls| calls.borrow_mut().clear());
}

/// Drain this thread's call log.
pub fn take_calls() -> Vec<GlCall> {
	CALLS.with(|calls| std::mem::take(&mut *calls.borrow_mut()))
}

fn record(call: GlCall) {
	CALLS.with(|calls| calls.borrow_mut().push(call));
}

/// # SAFETY
/// * `data` must be valid for `len` bytes
unsafe fn copy_bytes(data: *const c_void, len: isize) -> Vec<u8> {
	match data.is_null() || len <= 0 {
		true => Vec::new(),
		false => slice::from_raw_parts(data as *const u8, len as usize).to_vec(),
	}
}

fn stub_address(name: &'static str) -> *const c_void {
	match name {
		"glBindBuffer" => bind_buffer as *const c_void,
		"glPixelStorei" => pixel_store_i as *const c_void,
		"glTexImage2D" => tex_image_2d as *const c_void,
		"glTexSubImage2D" => tex_sub_image_2d as *const c_void,
		"glCompressedTexImage2D" => compressed_tex_image_2d as *const c_void,
		"glCompressedTexSubImage2D" => compressed_tex_sub_image_2d as *const c_void,
		"glBufferData" => buffer_data as *const c_void,
		"glBufferSubData" => buffer_sub_data as *const c_void,
		"glVertexAttribPointer" => vertex_attrib_pointer as *const c_void,
		"glVertexAttribIPointer" => vertex_attrib_i_pointer as *const c_void,
		"glVertexPointer" => vertex_pointer as *const c_void,
		"glNormalPointer" => normal_pointer as *const c_void,
		"glColorPointer" => color_pointer as *const c_void,
		"glTexCoordPointer" => tex_coord_pointer as *const c_void,
		_ => ptr::null(),
	}
}

extern "system" fn bind_buffer(target: GLenum, buffer: GLuint) {
	record(GlCall::BindBuffer { target, buffer });
}

extern "system" fn pixel_store_i(pname: GLenum, param: GLint) {
	record(GlCall::PixelStorei { pname, param });
}

extern "system" fn tex_image_2d(
	target: GLenum,
	level: GLint,
	internal_format: GLint,
	width: GLsizei,
	height: GLsizei,
	border: GLint,
	format: GLenum,
	ty: GLenum,
	pixels: *const c_void,
) {
	record(GlCall::TexImage2D {
		target,
		level,
		internal_format,
		width,
		height,
		border,
		format,
		ty,
		pixels: pixels as usize,
	});
}

extern "system" fn tex_sub_image_2d(
	target: GLenum,
	level: GLint,
	x: GLint,
	y: GLint,
	width: GLsizei,
	height: GLsizei,
	format: GLenum,
	ty: GLenum,
	pixels: *const c_void,
) {
	record(GlCall::TexSubImage2D {
		target,
		level,
		x,
		y,
		width,
		height,
		format,
		ty,
		pixels: pixels as usize,
	});
}

extern "system" fn compressed_tex_image_2d(
	target: GLenum,
	level: GLint,
	format: GLenum,
	width: GLsizei,
	height: GLsizei,
	border: GLint,
	size: GLsizei,
	data: *const c_void,
) {
	record(GlCall::CompressedTexImage2D {
		target,
		level,
		format,
		width,
		height,
		border,
		data: unsafe { copy_bytes(data, size as isize) },
	});
}

extern "system" fn compressed_tex_sub_image_2d(
	target: GLenum,
	level: GLint,
	x: GLint,
	y: GLint,
	width: GLsizei,
	height: GLsizei,
	format: GLenum,
	size: GLsizei,
	data: *const c_void,
) {
	record(GlCall::CompressedTexSubImage2D {
		target,
		level,
		x,
		y,
		width,
		height,
		format,
		data: unsafe { copy_bytes(data, size as isize) },
	});
}

extern "system" fn buffer_data(target: GLenum, size: GLsizeiptr, data: *const c_void, usage: GLenum) {
	record(GlCall::BufferData {
		target,
		data: unsafe { copy_bytes(data, size) },
		usage,
	});
}

extern "system" fn buffer_sub_data(
	target: GLenum,
	offset: GLintptr,
	size: GLsizeiptr,
	data: *const c_void,
) {
	record(GlCall::BufferSubData {
		target,
		offset,
		data: unsafe { copy_bytes(data, size) },
	});
}

extern "system" fn vertex_attrib_pointer(
	index: GLuint,
	size: GLint,
	ty: GLenum,
	normalized: GLboolean,
	stride: GLsizei,
	pointer: *const c_void,
) {
	record(GlCall::VertexAttribPointer {
		index,
		size,
		ty,
		normalized,
		stride,
		offset: pointer as usize,
	});
}

extern "system" fn vertex_attrib_i_pointer(
	index: GLuint,
	size: GLint,
	ty: GLenum,
	stride: GLsizei,
	pointer: *const c_void,
) {
	record(GlCall::VertexAttribIPointer {
		index,
		size,
		ty,
		stride,
		offset: pointer as usize,
	});
}

extern "system" fn vertex_pointer(size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
	record(GlCall::VertexPointer {
		size,
		ty,
		stride,
		offset: pointer as usize,
	});
}

extern "system" fn normal_pointer(ty: GLenum, stride: GLsizei, pointer: *const c_void) {
	record(GlCall::NormalPointer {
		ty,
		stride,
		offset: pointer as usize,
	});
}

extern "system" fn color_pointer(size: GLint, ty: GLenum, stride: GLsizei, pointer: *const c_void) {
	record(GlCall::ColorPointer {
		size,
		ty,
		stride,
		offset: pointer as usize,
	});
}

extern "system" fn tex_coord_pointer(
	size: GLint,
	ty: GLenum,
	stride: GLsizei,
	pointer: *const c_void,
) {
	record(GlCall::TexCoordPointer {
		size,
		ty,
		stride,
		offset: pointer as usize,
	});
}
