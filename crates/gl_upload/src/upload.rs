// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Entry points that resolve a source and issue the matching GL call.
//!
//! Each function performs exactly one upload or pointer call, preceded by
//! whatever unpack state that call depends on. State set here is left as is.

pub mod attribute;
pub mod buffer;
pub mod texture;

pub use attribute::{
	color_pointer,
	normal_pointer,
	tex_coord_pointer,
	vertex_attrib_i_pointer,
	vertex_attrib_pointer,
	vertex_pointer,
};
pub use buffer::{buffer_data, buffer_data_value, buffer_sub_data, buffer_sub_data_value};
pub use texture::{
	compressed_tex_image_2d,
	compressed_tex_sub_image_2d,
	tex_image_2d,
	tex_sub_image_2d,
};
