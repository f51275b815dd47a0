#![cfg(feature = "host")]
//! PNG previews of display frames, for host-side inspection.

use crate::frame::MonoFrame;
use png::{BitDepth, ColorType, Encoder};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Gray level of a lit pixel in the preview.
pub const LIT_LEVEL: u8 = 0xFF;

/// Gray level of an unlit pixel in the preview.
pub const DARK_LEVEL: u8 = 0x00;

/// Render a `MonoFrame` into a grayscale PNG, each pixel drawn as a `scale`×`scale` block.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &MonoFrame<W, H>,
    output_path: impl AsRef<Path>,
    scale: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(scale > 0, "scale must be positive");
    let output_path = output_path.as_ref();
    let (width, height, pixels) = frame_pixels(frame, scale)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

fn frame_pixels<const W: usize, const H: usize>(
    frame: &MonoFrame<W, H>,
    scale: u32,
) -> Result<(u32, u32, Vec<u8>), Box<dyn Error>> {
    let scale_usize = usize::try_from(scale)?;
    let width = u32::try_from(W)?
        .checked_mul(scale)
        .ok_or("preview width overflows u32")?;
    let height = u32::try_from(H)?
        .checked_mul(scale)
        .ok_or("preview height overflows u32")?;

    let mut pixels = Vec::with_capacity(
        W.saturating_mul(H)
            .saturating_mul(scale_usize)
            .saturating_mul(scale_usize),
    );
    for row in frame.iter() {
        let scaled_row: Vec<u8> = row
            .iter()
            .flat_map(|lit| {
                let level = if *lit { LIT_LEVEL } else { DARK_LEVEL };
                std::iter::repeat_n(level, scale_usize)
            })
            .collect();
        for _ in 0..scale_usize {
            pixels.extend_from_slice(&scaled_row);
        }
    }
    Ok((width, height, pixels))
}
