// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Describe typed host memory as OpenGL attribute and buffer layouts.

use std::{marker::PhantomData, ops::RangeInclusive};

use gl::types::GLenum;
use thiserror::Error;

use crate::format::ScalarKind;

pub mod raw;

pub use raw::RawBuffer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
	#[error("{0:?} components cannot be described to OpenGL")]
	NonNumeric(ScalarKind),
	#[error("field {index} does not exist, the record has {count} fields")]
	FieldOutOfRange { index: usize, count: usize },
	#[error("{slot} does not take components of type {ty:#x}")]
	UnsupportedType { slot: &'static str, ty: GLenum },
	#[error("{0} needs integer components")]
	NotInteger(&'static str),
	#[error("source holds no elements")]
	EmptySource,
	#[error("{slot} takes {allowed:?} components, got {found}")]
	ComponentCount {
		slot: &'static str,
		allowed: RangeInclusive<usize>,
		found: usize,
	},
}

/// Single numeric component.
pub trait Scalar: Copy {
	const KIND: ScalarKind;
}

/// Something one attribute can read: a scalar or a fixed size array of them.
pub trait Element: Copy {
	const KIND: ScalarKind;
	const COUNT: usize;
}

macro_rules! scalars {
	($($type:ty => $kind:ident;)*) => {
		$(
			impl Scalar for $type {
				const KIND: ScalarKind = ScalarKind::$kind;
			}

			impl Element for $type {
				const KIND: ScalarKind = ScalarKind::$kind;
				const COUNT: usize = 1;
			}
		)*
	}
}

scalars! {
	f64 => F64;
	f32 => F32;

	u32 => U32;
	u16 => U16;
	u8 => U8;

	i32 => I32;
	i16 => I16;
	i8 => I8;

	bool => Bool;
}

impl<T: Scalar, const N: usize> Element for [T; N] {
	const KIND: ScalarKind = T::KIND;
	const COUNT: usize = N;
}

/// One field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
	pub name: &'static str,
	pub offset: usize,
	pub kind: ScalarKind,
	pub count: usize,
}

impl Field {
	pub const fn new<T: Element>(name: &'static str, offset: usize) -> Self {
		Field {
			name,
			offset,
			kind: T::KIND,
			count: T::COUNT,
		}
	}
}

/// A struct whose fields can be bound as separate attributes of one
/// interleaved buffer. Implement with [`impl_record!`](crate::impl_record).
pub trait Record: Sized {
	const FIELDS: &'static [Field];
}

/// Implement [`Record`] for a struct by listing its fields in order.
///
/// Field types are checked against the struct, offsets come from `offset_of!`.
///
/// ```ignore
/// #[repr(C)]
/// #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
/// struct Vertex {
/// 	pos: [f32; 3],
/// 	color: [u8; 4],
/// }
///
/// gl_upload::impl_record!(Vertex { pos: [f32; 3], color: [u8; 4] });
/// ```
#[macro_export]
macro_rules! impl_record {
	($record:ty { $($field:ident: $type:ty),* $(,)? }) => {
		impl $crate::layout::Record for $record {
			const FIELDS: &'static [$crate::layout::Field] = &[
				$(
					$crate::layout::Field::new::<$type>(
						::core::stringify!($field),
						::core::mem::offset_of!($record, $field),
					),
				)*
			];
		}

		const _: () = {
			#[allow(dead_code)]
			fn field_types(record: $record) {
				$(let _: $type = record.$field;)*
			}
		};
	};
}

/// `(type, count, offset, stride)` of one attribute binding.
///
/// `offset` is relative to the start of each entry, `stride` is the size of
/// a whole entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
	pub ty: GLenum,
	pub count: usize,
	pub offset: usize,
	pub stride: usize,
	pub is_integer: bool,
}

impl ElementLayout {
	fn new(kind: ScalarKind, count: usize, offset: usize, stride: usize) -> Result<Self, LayoutError> {
		Ok(ElementLayout {
			ty: kind.gl_enum().ok_or(LayoutError::NonNumeric(kind))?,
			count,
			offset,
			stride,
			is_integer: kind.is_integer(),
		})
	}

	/// Layout of a buffer made of consecutive `T`s.
	pub fn of<T: Element>() -> Result<Self, LayoutError> {
		Self::new(T::KIND, T::COUNT, 0, std::mem::size_of::<T>())
	}

	/// Layout of field `index` in a buffer made of consecutive `R`s.
	pub fn of_field<R: Record>(index: usize) -> Result<Self, LayoutError> {
		let field = R::FIELDS.get(index).ok_or(LayoutError::FieldOutOfRange {
			index,
			count: R::FIELDS.len(),
		})?;

		Self::new(field.kind, field.count, field.offset, std::mem::size_of::<R>())
	}

	/// Fail unless the component type is one of `allowed`.
	pub(crate) fn require_type(self, slot: &'static str, allowed: &[GLenum]) -> Result<Self, LayoutError> {
		match allowed.contains(&self.ty) {
			true => Ok(self),
			false => Err(LayoutError::UnsupportedType { slot, ty: self.ty }),
		}
	}

	/// Fail unless the component count is in `allowed`.
	pub(crate) fn require_components(
		self,
		slot: &'static str,
		allowed: RangeInclusive<usize>,
	) -> Result<Self, LayoutError> {
		match allowed.contains(&self.count) {
			true => Ok(self),
			false => Err(LayoutError::ComponentCount {
				slot,
				allowed,
				found: self.count,
			}),
		}
	}
}

/// A value standing in for the layout of buffer entries. Only its type is
/// looked at.
pub trait Witness {
	fn element_layout(&self) -> Result<ElementLayout, LayoutError>;
}

impl<T: Element> Witness for T {
	fn element_layout(&self) -> Result<ElementLayout, LayoutError> {
		ElementLayout::of::<T>()
	}
}

/// Selects one field of a [`Record`] as the witness.
pub struct FieldOf<R> {
	index: usize,
	_record: PhantomData<fn() -> R>,
}

impl<R: Record> FieldOf<R> {
	pub fn new(index: usize) -> Self {
		Self {
			index,
			_record: PhantomData,
		}
	}

	/// Same as [`FieldOf::new`], taking the record type from a value.
	pub fn of(_record: &R, index: usize) -> Self {
		Self::new(index)
	}
}

impl<R: Record> Witness for FieldOf<R> {
	fn element_layout(&self) -> Result<ElementLayout, LayoutError> {
		ElementLayout::of_field::<R>(self.index)
	}
}
