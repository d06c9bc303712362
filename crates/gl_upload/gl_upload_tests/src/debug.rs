// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Driver debug output, counted so a check can fail on a rejected call.

use std::{
	ffi::{c_char, c_void, CStr},
	sync::atomic::{AtomicUsize, Ordering},
};

use gl::types::{GLenum, GLsizei, GLuint};

static ERRORS: AtomicUsize = AtomicUsize::new(0);

/// Count `GL_DEBUG_TYPE_ERROR` messages and log the rest, if the context
/// supports debug output. Notifications are muted.
pub fn setup_gl_debug() {
	if !gl::DebugMessageCallback::is_loaded() {
		log::warn!("GL debug output is not available, driver errors will go unnoticed");
		return
	}

	unsafe {
		gl::Enable(gl::DEBUG_OUTPUT);
		gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
		gl::DebugMessageCallback(Some(on_message), std::ptr::null());
		gl::DebugMessageControl(
			gl::DONT_CARE,
			gl::DONT_CARE,
			gl::DEBUG_SEVERITY_NOTIFICATION,
			0,
			std::ptr::null(),
			gl::FALSE,
		);
	}
}

/// Number of driver errors reported since the last call.
pub fn take_errors() -> usize {
	ERRORS.swap(0, Ordering::Relaxed)
}

extern "system" fn on_message(
	_source: GLenum,
	ty: GLenum,
	id: GLuint,
	_severity: GLenum,
	_length: GLsizei,
	message: *const c_char,
	_user_param: *mut c_void,
) {
	let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();

	match ty {
		gl::DEBUG_TYPE_ERROR => {
			ERRORS.fetch_add(1, Ordering::Relaxed);
			log::error!(target: "OpenGL", "error {id:#x}: {message}");
		},
		gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR | gl::DEBUG_TYPE_PORTABILITY => {
			log::warn!(target: "OpenGL", "{message}")
		},
		_ => log::debug!(target: "OpenGL", "{message}"),
	}
}
