// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Turn image sources into the pointer/format arguments of texture uploads.

use thiserror::Error;

use crate::{format::CompressedFormat, source::SourceError};

pub mod compressed;
pub mod pixel;

pub use compressed::{resolve_compressed, CompressedLayout};
pub use pixel::{resolve_pixels, PixelLayout};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
	#[error("unrecognized compressed format {0:?} (only DXT1, DXT3 and DXT5 can be uploaded)")]
	UnsupportedCompressedFormat(CompressedFormat),
	#[error("compressed data ran short: expected {expected} bytes, only {copied} available")]
	ShortCopy { expected: usize, copied: usize },
	#[error(transparent)]
	Source(#[from] SourceError),
}
