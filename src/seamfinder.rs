// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam in an energy map.
//!
//! The first step walks the energy map from the second row to the
//! last and records, for every cell, the cumulative minimum energy M
//! of any connected path from the top edge down to it:
//!
//! ```text
//!     M(y, x) = e(y, x) + min(M(y−1, x−1), M(y−1, x), M(y−1, x+1))
//! ```
//!
//! The smallest value in the last row of M is where the optimal seam
//! ends, and the second step backtracks from there to the top.

use crate::cq;
use crate::error::{ensure_same_shape, SeamError, SeamResult};
use crate::twodmap::{ScalarMap, TwoDimensionalMap};
use itertools::Itertools;
use std::cmp::Ordering;

fn ensure_carvable(map: &ScalarMap) -> SeamResult<()> {
    let (width, height) = map.dimensions();
    if width == 0 || height == 0 {
        return Err(SeamError::invalid_geometry(width, height));
    }
    Ok(())
}

/// Fill `dp` with the cumulative minimum energy of every cell in
/// `energy`.  Row 0 is copied verbatim; every later cell adds its own
/// energy to the cheapest of its (up to) three parents.  Parents off
/// the side of the map count as infinitely expensive.
pub fn gradient_to_dp(energy: &ScalarMap, dp: &mut ScalarMap) -> SeamResult<()> {
    ensure_same_shape(energy.dimensions(), dp.dimensions())?;
    ensure_carvable(energy)?;
    let (width, height) = energy.dimensions();

    for x in 0..width {
        dp.set(0, x, energy.get(0, x));
    }

    for y in 1..height {
        for cx in 0..width {
            let mut m = f32::INFINITY;
            for x in [cx.checked_sub(1), Some(cx), Some(cx + 1)].iter().flatten() {
                let c = cq!(*x < width, dp.get(y - 1, *x), f32::INFINITY);
                if c < m {
                    m = c;
                }
            }
            dp.set(y, cx, energy.get(y, cx) + m);
        }
    }
    Ok(())
}

/// Backtrack the cumulative-cost map into a seam, written into `seam`
/// (cleared and resized to the map's height, so a reused buffer does
/// not reallocate).
///
/// The seam ends at the leftmost minimum of the last row.  Each row
/// above starts from the column straight up, then tries the left and
/// right neighbours in that order; a neighbour only wins if it is
/// strictly cheaper than the best so far.  That ordering is what
/// keeps the output deterministic when several seams tie.
pub fn compute_seam(dp: &ScalarMap, seam: &mut Vec<u32>) -> SeamResult<()> {
    ensure_carvable(dp)?;
    let (width, height) = dp.dimensions();
    seam.clear();
    seam.resize(height as usize, 0);

    let last = height - 1;
    seam[last as usize] = dp
        .row(last)
        .iter()
        .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .unwrap_or(0) as u32;

    for y in (0..last).rev() {
        let below = seam[y as usize + 1];
        let mut best = below;
        for x in [below.checked_sub(1), Some(below + 1)].iter().flatten() {
            if *x < width && dp.get(y, *x) < dp.get(y, best) {
                best = *x;
            }
        }
        seam[y as usize] = best;
    }
    Ok(())
}

/// A convenience wrapper: given an energy map, allocate the cost map,
/// and return the next top-to-bottom seam.
pub fn find_vertical_seam(energy: &ScalarMap) -> SeamResult<Vec<u32>> {
    ensure_carvable(energy)?;
    let (width, height) = energy.dimensions();
    let mut dp = TwoDimensionalMap::new(width, height);
    gradient_to_dp(energy, &mut dp)?;
    let mut seam = Vec::with_capacity(height as usize);
    compute_seam(&dp, &mut seam)?;
    Ok(seam)
}

/// Sum of the energy along a seam.
pub fn seam_energy(energy: &ScalarMap, seam: &[u32]) -> f32 {
    seam.iter()
        .enumerate()
        .map(|(y, x)| energy.get(y as u32, *x))
        .sum()
}
