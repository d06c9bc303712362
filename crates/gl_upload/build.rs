// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::{env, fs::File, path::Path};

use gl_generator::{Api, Fallbacks, GlobalGenerator, Profile, Registry};

// The `gl` crate only carries the core profile. Fixed-function array pointers,
// luminance/alpha formats and S3TC enums need the compatibility registry.
fn main() {
	let out_dir = env::var("OUT_DIR").expect("cargo did not set OUT_DIR");
	let mut file = File::create(Path::new(&out_dir).join("legacy_gl_bindings.rs"))
		.expect("could not create legacy GL bindings file");

	Registry::new(
		Api::Gl,
		(2, 1),
		Profile::Compatibility,
		Fallbacks::All,
		["GL_EXT_texture_compression_s3tc"],
	)
	.write_bindings(GlobalGenerator, &mut file)
	.expect("could not write legacy GL bindings");

	println!("cargo:rerun-if-changed=build.rs");
}
