// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Native enum values used by this crate.
//!
//! Every `GLenum` handed to the driver comes from a function in this module.

use gl::types::GLenum;

use crate::legacy;

/// Client-side pixel layout, the `format` argument of `glTexImage2D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
	Alpha,
	Luminance,
	Rgba,
	Bgr,
	Bgra,
}

/// Component type of client pixel data, the `type` argument of `glTexImage2D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
	UnsignedByte,
	UnsignedShort,
}

/// Block compressed layouts a [`CompressedImage`](crate::CompressedImage) can hold.
///
/// Only the S3TC variants have an upload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedFormat {
	Dxt1,
	Dxt3,
	Dxt5,
	Bc4,
	Bc5,
	Bc7,
}

/// Scalar component kinds the layout descriptor can meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
	I8,
	U8,
	I16,
	U16,
	I32,
	U32,
	F32,
	F64,
	Bool,
}

impl PixelFormat {
	#[inline]
	pub fn gl_enum(&self) -> GLenum {
		match self {
			Self::Alpha => legacy::ALPHA,
			Self::Luminance => legacy::LUMINANCE,
			Self::Rgba => gl::RGBA,
			Self::Bgr => gl::BGR,
			Self::Bgra => gl::BGRA,
		}
	}
}

impl PixelType {
	#[inline]
	pub fn gl_enum(&self) -> GLenum {
		match self {
			Self::UnsignedByte => gl::UNSIGNED_BYTE,
			Self::UnsignedShort => gl::UNSIGNED_SHORT,
		}
	}
}

impl CompressedFormat {
	/// Edge length of a block in pixels.
	pub const BLOCK_DIM: u32 = 4;

	/// Size of one encoded block in bytes.
	pub fn block_bytes(&self) -> usize {
		match self {
			Self::Dxt1 | Self::Bc4 => 8,
			Self::Dxt3 | Self::Dxt5 | Self::Bc5 | Self::Bc7 => 16,
		}
	}

	/// Internal format for `glCompressedTexImage2D`, or `None` if this
	/// layout has no upload path.
	pub fn gl_enum(&self) -> Option<GLenum> {
		match self {
			Self::Dxt1 => Some(legacy::COMPRESSED_RGBA_S3TC_DXT1_EXT),
			Self::Dxt3 => Some(legacy::COMPRESSED_RGBA_S3TC_DXT3_EXT),
			Self::Dxt5 => Some(legacy::COMPRESSED_RGBA_S3TC_DXT5_EXT),
			Self::Bc4 | Self::Bc5 | Self::Bc7 => None,
		}
	}
}

impl ScalarKind {
	/// Vertex attribute type, or `None` for kinds GL cannot read.
	pub fn gl_enum(&self) -> Option<GLenum> {
		match self {
			Self::I8 => Some(gl::BYTE),
			Self::U8 => Some(gl::UNSIGNED_BYTE),
			Self::I16 => Some(gl::SHORT),
			Self::U16 => Some(gl::UNSIGNED_SHORT),
			Self::I32 => Some(gl::INT),
			Self::U32 => Some(gl::UNSIGNED_INT),
			Self::F32 => Some(gl::FLOAT),
			Self::F64 => Some(gl::DOUBLE),
			Self::Bool => None,
		}
	}

	pub fn is_integer(&self) -> bool {
		!matches!(self, Self::F32 | Self::F64 | Self::Bool)
	}
}

/// `glPixelStorei` parameters set before uncompressed uploads.
pub mod unpack {
	use gl::types::GLenum;

	pub const ALIGNMENT: GLenum = gl::UNPACK_ALIGNMENT;
	pub const ROW_LENGTH: GLenum = gl::UNPACK_ROW_LENGTH;
	/// Binding point that must be empty for client memory uploads.
	pub const BUFFER: GLenum = gl::PIXEL_UNPACK_BUFFER;
}
