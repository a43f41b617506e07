//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time. It also bakes the build time, used as the
//! initial wall clock, and the interactive background image into the output directory.

use std::{env, fs::File, io::Write, path::PathBuf};

/// Background image size, matches the PineTime panel.
const LCD_W: u32 = 240;
const LCD_H: u32 = 240;

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // create rs file with current UTC time
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_TIME: i64 = {:?};",
            chrono::Utc::now().timestamp()
        ))
        .unwrap();

    File::create(out.join("background.raw"))
        .unwrap()
        .write_all(&background())
        .unwrap();

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Dark radial gradient as big endian RGB565.
fn background() -> Vec<u8> {
    let (cx, cy) = (LCD_W as f32 / 2.0, LCD_H as f32 / 2.0);
    let max = (cx * cx + cy * cy).sqrt();
    let mut raw = Vec::with_capacity((LCD_W * LCD_H * 2) as usize);

    for y in 0..LCD_H {
        for x in 0..LCD_W {
            let (dx, dy) = (x as f32 - cx, y as f32 - cy);
            let t = 1.0 - (dx * dx + dy * dy).sqrt() / max;
            let r = (t * 4.0) as u16;
            let g = (t * 10.0) as u16;
            let b = (t * 14.0) as u16;
            let pixel = (r << 11) | (g << 5) | b;
            raw.extend_from_slice(&pixel.to_be_bytes());
        }
    }

    raw
}
