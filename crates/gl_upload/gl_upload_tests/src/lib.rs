// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use glfw::{Context, OpenGlProfileHint, WindowHint};

pub mod debug;

/// Run `test` with a current compatibility profile context on a hidden window.
pub fn with_context<T: FnOnce() -> R, R>(test: T) -> R {
	let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS).unwrap();
	glfw.window_hint(WindowHint::ContextVersion(3, 3));
	glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Compat));
	glfw.window_hint(WindowHint::OpenGlDebugContext(true));
	glfw.window_hint(WindowHint::Visible(false));

	let (mut window, _events) =
		glfw.create_window(64, 64, "gl_upload test", glfw::WindowMode::Windowed).unwrap();

	window.make_current();

	gl_upload::load_with(|p| window.get_proc_address(p));

	env_logger::init();
	debug::setup_gl_debug();

	test()
}

/// Whether the current context advertises `name`.
pub fn has_extension(name: &str) -> bool {
	let mut count = 0;
	unsafe { gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut count) };

	(0..count).any(|i| {
		let extension =
			unsafe { std::ffi::CStr::from_ptr(gl::GetStringi(gl::EXTENSIONS, i as u32) as *const _) };
		extension.to_bytes() == name.as_bytes()
	})
}
