// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Glue between host memory and OpenGL upload calls.
//!
//! Images are resolved to a `(pointer, row length, format, type)` description
//! and typed values to a `(type, count, offset, stride)` description, then
//! handed to a single native call. Nothing here owns GL objects; whatever
//! texture, buffer or vertex array the caller has bound is the destination.
//!
//! Every function that touches GL must be called from the thread that owns
//! the current context, after [`load_with`].

use std::ffi::c_void;

pub mod format;
pub mod layout;
pub mod resolve;
pub mod source;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use layout::{Element, ElementLayout, Field, FieldOf, LayoutError, RawBuffer, Record, Scalar, Witness};
pub use source::{CompressedImage, ImageSource, PixelRepr, PixelView, SourceError};
pub use resolve::TextureError;

/// Compatibility-profile and extension bindings missing from the core `gl` crate.
pub mod legacy {
	#![allow(clippy::all, non_upper_case_globals, non_snake_case, dead_code, unused_imports)]
	include!(concat!(env!("OUT_DIR"), "/legacy_gl_bindings.rs"));
}

/// Load both the core and the legacy bindings with the same loader.
///
/// `loader` is handed names such as `"glTexImage2D"` and should return the
/// address of that entry point in the current context, or null.
pub fn load_with<F: FnMut(&'static str) -> *const c_void>(mut loader: F) {
	gl::load_with(|name| loader(name));
	legacy::load_with(|name| loader(name));
	log::debug!(
		"loaded GL bindings (TexImage2D: {}, VertexPointer: {})",
		gl::TexImage2D::is_loaded(),
		legacy::VertexPointer::is_loaded(),
	);
}
