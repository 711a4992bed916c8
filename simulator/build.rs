//! Points the linker at a locally vendored SDL2, Windows only.
//!
//! On Linux and macOS the embedded-graphics-simulator links SDL2 from the
//! system package manager and no setup is needed. On Windows, place
//! `SDL2.lib` and `SDL2.dll` under `simulator/vendor/sdl2/` and the search
//! path is added automatically.

use std::env;
use std::path::PathBuf;

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let vendor_sdl2 = manifest_dir.join("vendor").join("sdl2");
    if vendor_sdl2.exists() {
        println!("cargo:rustc-link-search=native={}", vendor_sdl2.display());
    }
    println!("cargo:rerun-if-changed={}", vendor_sdl2.display());
}
