//! Build script - places the nRF52840 linker script in the output directory
//! so `cortex-m-rt`'s `link.x` can include it.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo always sets OUT_DIR"));

    fs::copy("memory.x", out_dir.join("memory.x")).expect("memory.x must sit next to Cargo.toml");

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
