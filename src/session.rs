// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A carving session: one image being narrowed, plus every map that
//! has to narrow with it.
//!
//! The session owns the image buffer and the luminance, energy, and
//! cumulative-cost maps.  All four always share a logical width and
//! height.  `remove_seam` is the only thing that changes that width,
//! and it changes all four before returning or none of them.

use crate::config::CarveConfig;
use crate::energy::{compute_energy, compute_energy_into};
use crate::error::{ensure_same_shape, SeamError, SeamResult};
use crate::luminance::extract_luminance;
use crate::seamfinder::{compute_seam, gradient_to_dp, seam_energy};
use crate::twodmap::{PixelMap, ScalarMap, TwoDimensionalMap};
use image::RgbaImage;

/// What a call to [`CarvingSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A seam is selected and waiting to be removed; see
    /// [`CarvingSession::current_seam`].
    SeamHighlight,
    /// The selected seam was removed.
    Removed,
    /// Nothing left to do.
    Done,
}

#[derive(Debug, Clone)]
pub struct CarvingSession {
    image: PixelMap,
    luminance: ScalarMap,
    energy: ScalarMap,
    dp: ScalarMap,
    seam: Vec<u32>,
    seams_removed: u32,
    seams_to_remove: u32,
    removal_pace: u32,
    // Ticks left before the selected seam goes; None when no seam is
    // selected.
    pending: Option<u32>,
}

impl CarvingSession {
    /// Start a session on a decoded RGBA image.
    pub fn new(source: &RgbaImage, config: &CarveConfig) -> SeamResult<Self> {
        Self::from_pixels(PixelMap::from_image(source), config)
    }

    /// Start a session on a pixel buffer, taking ownership of it.
    pub fn from_pixels(image: PixelMap, config: &CarveConfig) -> SeamResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SeamError::invalid_geometry(width, height));
        }
        config.validate()?;

        let luminance = extract_luminance(&image);
        let energy = compute_energy(&luminance);
        tracing::info!(
            width,
            height,
            seams_to_remove = config.seams_to_remove,
            "carving session started"
        );
        Ok(CarvingSession {
            image,
            luminance,
            energy,
            dp: TwoDimensionalMap::new(width, height),
            seam: Vec::with_capacity(height as usize),
            seams_removed: 0,
            seams_to_remove: config.seams_to_remove,
            removal_pace: config.removal_pace,
            pending: None,
        })
    }

    /// The image as carved so far.
    pub fn current_image(&self) -> &PixelMap {
        &self.image
    }

    /// The image as carved so far, copied out.
    pub fn to_image(&self) -> RgbaImage {
        self.image.to_image()
    }

    /// The seam about to be removed, one column per row, if one is
    /// selected.
    pub fn current_seam(&self) -> Option<&[u32]> {
        self.pending.map(|_| self.seam.as_slice())
    }

    pub fn luminance(&self) -> &ScalarMap {
        &self.luminance
    }

    pub fn energy(&self) -> &ScalarMap {
        &self.energy
    }

    pub fn seams_removed(&self) -> u32 {
        self.seams_removed
    }

    pub fn seams_to_remove(&self) -> u32 {
        self.seams_to_remove
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Done once the target is met, or when only one column is left
    /// (there is no seam to take from a one-column image).
    pub fn is_done(&self) -> bool {
        self.seams_removed >= self.seams_to_remove || self.image.width() <= 1
    }

    /// Advance by one externally-driven tick.  A tick either selects
    /// the next seam, holds it on screen for `removal_pace` ticks, or
    /// removes it:
    ///
    /// ```text
    ///     SeamHighlight, (SeamHighlight × pace-1), Removed, SeamHighlight, ...
    /// ```
    pub fn tick(&mut self) -> SeamResult<Tick> {
        if self.is_done() {
            self.pending = None;
            return Ok(Tick::Done);
        }
        match self.pending {
            None => {
                self.select_seam()?;
                Ok(Tick::SeamHighlight)
            }
            Some(left) if left > 1 => {
                self.pending = Some(left - 1);
                Ok(Tick::SeamHighlight)
            }
            Some(_) => {
                self.remove_seam()?;
                self.refresh_energy()?;
                Ok(Tick::Removed)
            }
        }
    }

    /// Select and remove one seam in a single call, skipping the
    /// highlight.  Returns false once the session is done.
    pub fn step(&mut self) -> SeamResult<bool> {
        if self.is_done() {
            return Ok(false);
        }
        if self.pending.is_none() {
            self.select_seam()?;
        }
        self.remove_seam()?;
        self.refresh_energy()?;
        Ok(true)
    }

    /// Carve until done.  Returns the number of seams removed by this
    /// call.
    pub fn run_to_completion(&mut self) -> SeamResult<u32> {
        let before = self.seams_removed;
        while self.step()? {}
        tracing::info!(
            removed = self.seams_removed - before,
            width = self.image.width(),
            "carving session finished"
        );
        Ok(self.seams_removed - before)
    }

    // Run the DP over the current energy and select the cheapest seam.
    fn select_seam(&mut self) -> SeamResult<()> {
        gradient_to_dp(&self.energy, &mut self.dp)?;
        compute_seam(&self.dp, &mut self.seam)?;
        self.pending = Some(self.removal_pace);
        tracing::trace!(pace = self.removal_pace, "seam selected");
        Ok(())
    }

    // The energy map has had its seam column cut out; what is left is
    // stale next to the cut, so rebuild it from the narrowed luminance.
    fn refresh_energy(&mut self) -> SeamResult<()> {
        compute_energy_into(&self.luminance, &mut self.energy)
    }

    fn check_removable(&self) -> SeamResult<()> {
        let (width, height) = self.image.dimensions();
        if width < 2 {
            return Err(SeamError::invalid_geometry(width, height));
        }
        let shape = (width, height);
        ensure_same_shape(shape, self.luminance.dimensions())?;
        ensure_same_shape(shape, self.energy.dimensions())?;
        ensure_same_shape(shape, self.dp.dimensions())?;

        if self.pending.is_none() || self.seam.len() != height as usize {
            return Err(SeamError::dimension_mismatch(
                (1, height),
                (1, self.seam.len() as u32),
            ));
        }
        for (row, column) in self.seam.iter().enumerate() {
            if *column >= width {
                return Err(SeamError::InvalidSeam {
                    row: row as u32,
                    column: *column,
                    width,
                });
            }
        }
        Ok(())
    }

    /// Cut the selected seam out of the image and every map that tracks
    /// it, then narrow them all by one column.  Everything is checked
    /// before anything is touched, so an error leaves the session
    /// exactly as it was.
    pub(crate) fn remove_seam(&mut self) -> SeamResult<()> {
        self.check_removable()?;
        let cost = seam_energy(&self.energy, &self.seam);

        for (y, x) in self.seam.iter().enumerate() {
            let y = y as u32;
            self.image.remove_column(y, *x);
            self.luminance.remove_column(y, *x);
            self.energy.remove_column(y, *x);
        }
        self.image.shrink_width();
        self.luminance.shrink_width();
        self.energy.shrink_width();
        self.dp.shrink_width();

        self.seams_removed += 1;
        self.pending = None;
        tracing::debug!(
            seam = self.seams_removed,
            width = self.image.width(),
            seam_energy = cost,
            "seam removed"
        );
        Ok(())
    }
}
