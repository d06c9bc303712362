// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::{ffi::c_void, mem};

use super::LayoutError;

/// Bytes of one value or a slice of values, for `glBufferData` and
/// `glBufferSubData`.
#[derive(Debug, Clone, Copy)]
pub struct RawBuffer<'a> {
	bytes: &'a [u8],
	element_size: usize,
	count: usize,
}

impl<'a> RawBuffer<'a> {
	pub fn of_value<T: bytemuck::Pod>(value: &'a T) -> Self {
		Self {
			bytes: bytemuck::bytes_of(value),
			element_size: mem::size_of::<T>(),
			count: 1,
		}
	}

	/// Fails for an empty slice.
	pub fn of_slice<T: bytemuck::Pod>(values: &'a [T]) -> Result<Self, LayoutError> {
		if values.is_empty() {
			return Err(LayoutError::EmptySource)
		}

		Ok(Self {
			bytes: bytemuck::cast_slice(values),
			element_size: mem::size_of::<T>(),
			count: values.len(),
		})
	}

	pub fn element_size(&self) -> usize {
		self.element_size
	}

	pub fn count(&self) -> usize {
		self.count
	}

	/// `element_size * count`.
	pub fn byte_len(&self) -> usize {
		self.bytes.len()
	}

	pub fn as_bytes(&self) -> &'a [u8] {
		self.bytes
	}

	pub(crate) fn as_ptr(&self) -> *const c_void {
		self.bytes.as_ptr() as *const c_void
	}
}
