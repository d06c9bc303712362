// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Attribute pointers into the buffer bound to `GL_ARRAY_BUFFER`.
//!
//! None of these bind a buffer. The offset reported by the witness is passed
//! as the pointer argument, so a buffer object has to be bound beforehand.

use std::ffi::c_void;

use gl::types::{GLenum, GLint, GLsizei, GLuint};

use crate::{
	layout::{ElementLayout, LayoutError, Witness},
	legacy,
};

/// Types `glVertexPointer` and `glTexCoordPointer` accept.
const SIGNED_WIDE: &[GLenum] = &[gl::SHORT, gl::INT, gl::FLOAT, gl::DOUBLE];
/// Types `glNormalPointer` accepts.
const SIGNED: &[GLenum] = &[gl::BYTE, gl::SHORT, gl::INT, gl::FLOAT, gl::DOUBLE];
const ANY: &[GLenum] = &[
	gl::BYTE,
	gl::UNSIGNED_BYTE,
	gl::SHORT,
	gl::UNSIGNED_SHORT,
	gl::INT,
	gl::UNSIGNED_INT,
	gl::FLOAT,
	gl::DOUBLE,
];

fn describe(
	slot: &'static str,
	witness: &impl Witness,
	types: &[GLenum],
	components: std::ops::RangeInclusive<usize>,
) -> Result<ElementLayout, LayoutError> {
	let layout = witness
		.element_layout()?
		.require_type(slot, types)?
		.require_components(slot, components)?;
	log::trace!(
		"{slot} pointer: {} x {:#x}, offset {}, stride {}",
		layout.count,
		layout.ty,
		layout.offset,
		layout.stride
	);
	Ok(layout)
}

/// `glVertexPointer`
///
/// # SAFETY
/// * must be called from GL thread
pub unsafe fn vertex_pointer(witness: &impl Witness) -> Result<(), LayoutError> {
	let layout = describe("vertex", witness, SIGNED_WIDE, 2..=4)?;
	legacy::VertexPointer(
		layout.count as GLint,
		layout.ty,
		layout.stride as GLsizei,
		layout.offset as *const c_void,
	);
	Ok(())
}

/// `glNormalPointer`. Normals always have three components.
///
/// # SAFETY
/// * must be called from GL thread
pub unsafe fn normal_pointer(witness: &impl Witness) -> Result<(), LayoutError> {
	let layout = describe("normal", witness, SIGNED, 3..=3)?;
	legacy::NormalPointer(layout.ty, layout.stride as GLsizei, layout.offset as *const c_void);
	Ok(())
}

/// `glColorPointer`
///
/// # SAFETY
/// * must be called from GL thread
pub unsafe fn color_pointer(witness: &impl Witness) -> Result<(), LayoutError> {
	let layout = describe("color", witness, ANY, 3..=4)?;
	legacy::ColorPointer(
		layout.count as GLint,
		layout.ty,
		layout.stride as GLsizei,
		layout.offset as *const c_void,
	);
	Ok(())
}

/// `glTexCoordPointer`
///
/// # SAFETY
/// * must be called from GL thread
pub unsafe fn tex_coord_pointer(witness: &impl Witness) -> Result<(), LayoutError> {
	let layout = describe("texture coordinate", witness, SIGNED_WIDE, 1..=4)?;
	legacy::TexCoordPointer(
		layout.count as GLint,
		layout.ty,
		layout.stride as GLsizei,
		layout.offset as *const c_void,
	);
	Ok(())
}

/// `glVertexAttribPointer` for generic attribute `index`. Integer components
/// are converted to float, scaled to [0, 1] or [-1, 1] if `normalized`.
///
/// # SAFETY
/// * must be called from GL thread
pub unsafe fn vertex_attrib_pointer(
	index: GLuint,
	normalized: bool,
	witness: &impl Witness,
) -> Result<(), LayoutError> {
	let layout = describe("generic attribute", witness, ANY, 1..=4)?;
	gl::VertexAttribPointer(
		index,
		layout.count as GLint,
		layout.ty,
		match normalized {
			true => gl::TRUE,
			false => gl::FALSE,
		},
		layout.stride as GLsizei,
		layout.offset as *const c_void,
	);
	Ok(())
}

/// `glVertexAttribIPointer` for generic attribute `index`, read by the
/// shader as integers.
///
/// # SAFETY
/// * must be called from GL thread
pub unsafe fn vertex_attrib_i_pointer(index: GLuint, witness: &impl Witness) -> Result<(), LayoutError> {
	let layout = describe("integer attribute", witness, ANY, 1..=4)?;
	if !layout.is_integer {
		return Err(LayoutError::NotInteger("integer attribute"))
	}

	gl::VertexAttribIPointer(
		index,
		layout.count as GLint,
		layout.ty,
		layout.stride as GLsizei,
		layout.offset as *const c_void,
	);
	Ok(())
}
