//! Build script for joystick-panel.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let target = env::var("TARGET").expect("TARGET is set by cargo");

    // Pick memory.x for the board the target implies; host builds need none.
    let memory_file = if target.starts_with("thumbv8m") {
        // Pico 2 ARM (RP2350)
        Some("memory-pico2.x")
    } else if target.starts_with("thumbv6m") {
        // Pico 1 (RP2040)
        Some("memory-pico1.x")
    } else {
        None
    };

    if let Some(memory_file) = memory_file {
        let memory_x = fs::read_to_string(memory_file)
            .unwrap_or_else(|err| panic!("Failed to read {memory_file}: {err}"));
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed={memory_file}");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
