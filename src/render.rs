// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning maps and seams into pictures.
//!
//! None of this takes part in choosing seams; it exists so a viewer
//! (or the command line tool) can show what the carver is thinking.

use crate::cq;
use crate::error::{SeamError, SeamResult};
use crate::twodmap::ScalarMap;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use num_traits::{clamp, NumCast};

/// The colour a selected seam is painted in.
pub const SEAM_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// What the unused part of a canvas is cleared to.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn to_channel(value: f32) -> u8 {
    NumCast::from(clamp(value, 0.0, 255.0).round()).unwrap_or(0)
}

/// Luminance is already on a 0..=255 scale, so it is shown as is.
pub fn luminance_to_image(luma: &ScalarMap) -> GrayImage {
    GrayImage::from_fn(luma.width(), luma.height(), |x, y| {
        Luma([to_channel(luma.get(y, x))])
    })
}

/// The factor that maps the strongest edge in `energy` to white, or
/// zero when there are no edges at all.
pub fn energy_scale(energy: &ScalarMap) -> f32 {
    let peak = (0..energy.height())
        .flat_map(|y| energy.row(y).iter().copied())
        .fold(0.0f32, f32::max);
    cq!(peak > 0.0, 255.0 / peak, 0.0)
}

/// Energy has no natural ceiling; scale it so the strongest edge is
/// white.  An image with no edges at all comes out black.
pub fn energy_to_image(energy: &ScalarMap) -> GrayImage {
    let scale = energy_scale(energy);
    GrayImage::from_fn(energy.width(), energy.height(), |x, y| {
        Luma([to_channel(energy.get(y, x) * scale)])
    })
}

/// An opaque gray pixel for a 0..=255 value.
pub fn gray(value: f32) -> Rgba<u8> {
    let v = to_channel(value);
    Rgba([v, v, v, 255])
}

/// Paint `seam` (one column per row, from the top) onto `image`.
/// Rows the image doesn't have, or columns past its edge, are skipped.
pub fn highlight_seam(image: &mut RgbaImage, seam: &[u32], color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    for (y, x) in seam.iter().enumerate() {
        let y = y as u32;
        if y < height && *x < width {
            image.put_pixel(*x, y, color);
        }
    }
}

/// Fill the top-left `live` region of a reusable `canvas` from
/// `pixel_at(x, y)` and clear the rest, so a viewer can keep one
/// full-size buffer for the whole run while the image underneath
/// narrows.  Nothing is allocated.  Returns the size of the live
/// region.
pub fn paint_into<F>(
    canvas: &mut RgbaImage,
    live: (u32, u32),
    pixel_at: F,
) -> SeamResult<(u32, u32)>
where
    F: Fn(u32, u32) -> Rgba<u8>,
{
    let (width, height) = live;
    let (cw, ch) = canvas.dimensions();
    if width > cw || height > ch {
        return Err(SeamError::dimension_mismatch((cw, ch), (width, height)));
    }
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        *pixel = cq!(x < width && y < height, pixel_at(x, y), BACKGROUND);
    }
    Ok(live)
}

/// Copy `frame` into the top-left corner of `canvas`; see [`paint_into`].
pub fn blit_into(canvas: &mut RgbaImage, frame: &RgbaImage) -> SeamResult<(u32, u32)> {
    paint_into(canvas, frame.dimensions(), |x, y| *frame.get_pixel(x, y))
}
