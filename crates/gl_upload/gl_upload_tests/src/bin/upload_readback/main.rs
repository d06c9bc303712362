// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Upload through a real driver and read the result back.

use std::ffi::c_void;

use gl::types::{GLint, GLuint};
use gl_upload::{
	format::CompressedFormat,
	source::PixelRepr,
	upload,
	CompressedImage,
	ImageSource,
	PixelView,
};
use image::{math::Rect, DynamicImage, ImageBuffer, Rgb};

fn main() {
	let failures = gl_upload_tests::with_context(|| {
		let checks: [(&str, fn() -> bool); 5] = [
			("strided sub-image", strided_sub_image),
			("converted image", converted_image),
			("buffer data", buffer_data),
			("compressed", compressed),
			("attribute pointers", attribute_pointers),
		];

		checks
			.into_iter()
			.filter(|(name, check)| {
				gl_upload_tests::debug::take_errors();
				let passed = check() && gl_upload_tests::debug::take_errors() == 0;
				match passed {
					true => log::info!("{name}: ok"),
					false => log::error!("{name}: FAILED"),
				}
				!passed
			})
			.count()
	});

	std::process::exit(failures as i32);
}

fn new_texture() -> GLuint {
	unsafe {
		let mut texture = 0;
		gl::GenTextures(1, &mut texture);
		gl::BindTexture(gl::TEXTURE_2D, texture);
		gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
		gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);
		texture
	}
}

fn read_rgba(width: usize, height: usize) -> Vec<u8> {
	let mut pixels = vec![0u8; width * height * 4];
	unsafe {
		gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
		gl::GetTexImage(
			gl::TEXTURE_2D,
			0,
			gl::RGBA,
			gl::UNSIGNED_BYTE,
			pixels.as_mut_ptr() as *mut c_void,
		);
	}
	pixels
}

fn strided_sub_image() -> bool {
	// 16x16 RGBA gradient, upload the 5x3 block at (6, 9)
	let data = (0..16 * 16)
		.flat_map(|i| [(i % 16) as u8, (i / 16) as u8, 0x80, 0xff])
		.collect::<Vec<_>>();
	let Ok(view) = PixelView::packed(&data, 16, 16, PixelRepr::Rgba8) else {
		return false
	};
	let Ok(sub) = view.sub_image(Rect {
		x: 6,
		y: 9,
		width: 5,
		height: 3,
	}) else {
		return false
	};

	let texture = new_texture();
	unsafe { upload::tex_image_2d(gl::TEXTURE_2D, 0, gl::RGBA8 as GLint, 0, &sub.into()) };
	let pixels = read_rgba(5, 3);
	unsafe { gl::DeleteTextures(1, &texture) };

	pixels.chunks_exact(4).enumerate().all(|(i, pixel)| {
		let (x, y) = (6 + i % 5, 9 + i / 5);
		pixel == [x as u8, y as u8, 0x80, 0xff]
	})
}

fn converted_image() -> bool {
	let image =
		DynamicImage::ImageRgb8(ImageBuffer::from_fn(7, 5, |x, y| Rgb([x as u8, y as u8, 3])));
	let source = ImageSource::from(&image);

	let texture = new_texture();
	unsafe {
		upload::tex_image_2d(gl::TEXTURE_2D, 0, gl::RGBA8 as GLint, 0, &source);
		// overwrite the top left 2x2 with the same data, must not change anything
		upload::tex_sub_image_2d(
			gl::TEXTURE_2D,
			0,
			Rect {
				x: 0,
				y: 0,
				width: 2,
				height: 2,
			},
			&source,
		);
	}
	let pixels = read_rgba(7, 5);
	unsafe { gl::DeleteTextures(1, &texture) };

	pixels.chunks_exact(4).enumerate().all(|(i, pixel)| {
		let (x, y) = (i % 7, i / 7);
		pixel == [x as u8, y as u8, 3, 0xff]
	})
}

fn buffer_data() -> bool {
	let values = (0..64u32).map(|i| i * 3).collect::<Vec<_>>();
	let mut read_back = vec![0u32; values.len()];

	unsafe {
		let mut buffer = 0;
		gl::GenBuffers(1, &mut buffer);
		gl::BindBuffer(gl::ARRAY_BUFFER, buffer);

		if let Err(e) = upload::buffer_data(gl::ARRAY_BUFFER, &values, gl::STATIC_DRAW) {
			log::error!("{e}");
			return false
		}
		upload::buffer_sub_data_value(gl::ARRAY_BUFFER, 4, &1000u32);

		let bytes = bytemuck::cast_slice_mut::<u32, u8>(&mut read_back);
		gl::GetBufferSubData(
			gl::ARRAY_BUFFER,
			0,
			bytes.len() as isize,
			bytes.as_mut_ptr() as *mut c_void,
		);
		gl::DeleteBuffers(1, &buffer);
	}

	read_back[0] == 0 && read_back[1] == 1000 && read_back[2..] == values[2..]
}

fn compressed() -> bool {
	if !gl_upload_tests::has_extension("GL_EXT_texture_compression_s3tc") {
		log::warn!("S3TC is not supported, skipping compressed upload");
		return true
	}

	// 3x2 blocks of DXT1, upload the right 2x2
	let data = (0..3 * 2 * 8).map(|i| i as u8).collect::<Vec<_>>();
	let image = CompressedImage::packed(&data, 12, 8, CompressedFormat::Dxt1);
	let Ok(sub) = image.sub_image(Rect {
		x: 4,
		y: 0,
		width: 8,
		height: 8,
	}) else {
		return false
	};

	let texture = new_texture();
	let uploaded = unsafe { upload::compressed_tex_image_2d(gl::TEXTURE_2D, 0, 0, &sub) };
	if let Err(e) = uploaded {
		log::error!("{e}");
		return false
	}

	let mut size = 0;
	unsafe {
		gl::GetTexLevelParameteriv(gl::TEXTURE_2D, 0, gl::TEXTURE_COMPRESSED_IMAGE_SIZE, &mut size);
		gl::DeleteTextures(1, &texture);
	}

	size == 2 * 2 * 8
}

#[repr(C)]
#[derive(Clone, Copy)]
struct Vertex {
	position: [f32; 3],
	uv: [i16; 2],
	color: [u8; 4],
}

gl_upload::impl_record!(Vertex {
	position: [f32; 3],
	uv: [i16; 2],
	color: [u8; 4],
});

fn attribute_pointers() -> bool {
	use gl_upload::FieldOf;

	unsafe {
		let mut buffer = 0;
		gl::GenBuffers(1, &mut buffer);
		gl::BindBuffer(gl::ARRAY_BUFFER, buffer);

		let described = upload::vertex_pointer(&FieldOf::<Vertex>::new(0))
			.and_then(|()| upload::tex_coord_pointer(&FieldOf::<Vertex>::new(1)))
			.and_then(|()| upload::color_pointer(&FieldOf::<Vertex>::new(2)))
			.and_then(|()| upload::vertex_attrib_pointer(3, true, &FieldOf::<Vertex>::new(2)));

		let mut stride = 0;
		gl::GetIntegerv(gl_upload::legacy::VERTEX_ARRAY_STRIDE, &mut stride);

		gl::BindBuffer(gl::ARRAY_BUFFER, 0);
		gl::DeleteBuffers(1, &buffer);

		match described {
			Ok(()) => stride as usize == std::mem::size_of::<Vertex>(),
			Err(e) => {
				log::error!("{e}");
				false
			},
		}
	}
}

