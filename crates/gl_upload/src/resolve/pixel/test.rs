use std::borrow::Cow;

use image::{math::Rect, DynamicImage, ImageBuffer, LumaA, Rgb};

use super::resolve_pixels;
use crate::{
	format::{PixelFormat, PixelType},
	source::{ImageSource, PixelRepr, PixelView},
};

const ALL_REPRS: [PixelRepr; 8] = [
	PixelRepr::Alpha8,
	PixelRepr::Alpha16,
	PixelRepr::Gray8,
	PixelRepr::Gray16,
	PixelRepr::Rgba8,
	PixelRepr::Rgba16,
	PixelRepr::Bgr8,
	PixelRepr::Bgra8,
];

#[test_log::test]
fn row_length_times_pixel_size_is_stride() {
	for repr in ALL_REPRS {
		let bpp = repr.bytes_per_pixel();
		// three pixels of padding per row
		let stride = (5 + 3) * bpp;
		let data = vec![0u8; stride * 4];

		let view = PixelView::new(&data, stride, 5, 4, repr).unwrap();
		let layout = resolve_pixels(&view.into());

		assert_eq!(layout.row_length * bpp, stride, "{repr:?}");
		assert_eq!(layout.format, repr.format());
		assert_eq!(layout.ty, repr.pixel_type());
		assert!(matches!(layout.data, Cow::Borrowed(_)));
	}
}

#[test_log::test]
fn recognized_view_is_borrowed() {
	let data = (0..32).collect::<Vec<u8>>();
	let view = PixelView::packed(&data, 2, 4, PixelRepr::Rgba8).unwrap();
	let layout = resolve_pixels(&view.into());

	assert_eq!(layout.data.as_ptr(), data.as_ptr());
	assert_eq!(layout.row_length, 2);
	assert_eq!(layout.format, PixelFormat::Rgba);
}

#[test_log::test]
fn sub_image_points_at_first_pixel() {
	let data = (0..64).collect::<Vec<u8>>();
	let view = PixelView::packed(&data, 4, 4, PixelRepr::Gray16).unwrap();
	let sub = view
		.sub_image(Rect {
			x: 1,
			y: 2,
			width: 2,
			height: 2,
		})
		.unwrap();

	let layout = resolve_pixels(&sub.into());
	assert_eq!(layout.row_length, 4);
	assert_eq!(layout.ty, PixelType::UnsignedShort);
	assert_eq!(layout.data[0], 2 * 8 + 2);
}

#[test_log::test]
fn dynamic_rgba16_is_recognized() {
	let image = DynamicImage::new_rgba16(3, 3);
	let layout = resolve_pixels(&ImageSource::from(&image));

	assert_eq!(layout.row_length, 3);
	assert_eq!(layout.format, PixelFormat::Rgba);
	assert_eq!(layout.ty, PixelType::UnsignedShort);
	assert!(matches!(layout.data, Cow::Borrowed(_)));
}

#[test_log::test]
fn unrecognized_is_converted_to_rgba8() {
	let rgb = ImageBuffer::from_fn(3, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 10, 7]));
	let image = DynamicImage::ImageRgb8(rgb);
	let layout = resolve_pixels(&(&image).into());

	assert_eq!(layout.format, PixelFormat::Rgba);
	assert_eq!(layout.ty, PixelType::UnsignedByte);
	assert_eq!(layout.row_length * 4, 3 * 4);
	assert_eq!(layout.data.len(), 3 * 2 * 4);
	assert!(matches!(layout.data, Cow::Owned(_)));

	// pixel (2, 1), opaque after conversion
	assert_eq!(&layout.data[(3 + 2) * 4..][..4], &[20, 10, 7, 255]);
}

#[test_log::test]
fn converted_gray_alpha_keeps_alpha() {
	let image =
		DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(2, 2, LumaA([200u8, 50u8])));
	let layout = resolve_pixels(&(&image).into());

	assert_eq!(layout.row_length, 2);
	assert_eq!(&layout.data[..4], &[200, 200, 200, 50]);
}

#[test]
#[should_panic(expected = "OpenGL cannot express this layout")]
fn unaligned_stride_panics() {
	let data = [0u8; 64];
	// 10 bytes per row is not a whole number of 4 byte pixels
	let view = PixelView::new(&data, 10, 2, 2, PixelRepr::Bgra8).unwrap();
	resolve_pixels(&view.into());
}
