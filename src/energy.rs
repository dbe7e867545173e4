// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given a luminance map, calculate how "important" every pixel is:
//! the magnitude of the Sobel gradient over its 3×3 neighbourhood.
//! Flat regions score zero and are the first to go; edges score high
//! and survive.
//!
//! Pixels beyond the border are read as zero, not clamped or wrapped,
//! so a bright image shows a faint edge along its own frame.

use crate::cq;
use crate::error::{ensure_same_shape, SeamResult};
use crate::twodmap::{ScalarMap, TwoDimensionalMap};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

// (Luminance, row, col) -> Energy
#[inline]
fn sobel_at(luma: &ScalarMap, row: u32, col: u32) -> f32 {
    let (width, height) = (i64::from(luma.width()), i64::from(luma.height()));
    let (mut sx, mut sy) = (0.0f32, 0.0f32);
    for dy in 0..3 {
        let y = i64::from(row) + dy as i64 - 1;
        for dx in 0..3 {
            let x = i64::from(col) + dx as i64 - 1;
            let within = 0 <= x && x < width && 0 <= y && y < height;
            let c = cq!(within, luma.get(y as u32, x as u32), 0.0);
            sx += c * SOBEL_X[dy][dx];
            sy += c * SOBEL_Y[dy][dx];
        }
    }
    (sx * sx + sy * sy).sqrt()
}

// Shapes must already agree.
fn sweep(luma: &ScalarMap, energy: &mut ScalarMap) {
    for y in 0..luma.height() {
        for x in 0..luma.width() {
            energy.set(y, x, sobel_at(luma, y, x));
        }
    }
}

/// Compute the energy of every pixel into an existing map of the same
/// shape.  The carving session calls this after every removal, so the
/// map's allocation is reused rather than rebuilt.
pub fn compute_energy_into(luma: &ScalarMap, energy: &mut ScalarMap) -> SeamResult<()> {
    ensure_same_shape(luma.dimensions(), energy.dimensions())?;
    sweep(luma, energy);
    Ok(())
}

/// Compute the energy of every pixel in a luminance map.
pub fn compute_energy(luma: &ScalarMap) -> ScalarMap {
    let (width, height) = luma.dimensions();
    let mut energy = TwoDimensionalMap::new(width, height);
    sweep(luma, &mut energy);
    energy
}
