// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The driver
//!
//! `SeamCarver` holds the original image and whichever view of it a
//! viewer has asked for: the image itself, its luminance, its energy,
//! or a carving session in progress.  A viewer calls `tick` once per
//! frame and `render` to find out what to draw.  The `seamcarve`
//! function is the same thing with the viewer taken away.

use crate::config::CarveConfig;
use crate::energy::compute_energy;
use crate::error::{SeamError, SeamResult};
use crate::luminance::extract_luminance;
use crate::render::{
    blit_into, energy_scale, energy_to_image, gray, highlight_seam, luminance_to_image,
    paint_into, SEAM_COLOR,
};
use crate::session::{CarvingSession, Tick};
use crate::twodmap::{PixelMap, ScalarMap};
use image::{DynamicImage, RgbaImage};

/// What the driver is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The untouched source image.
    Idle,
    /// The luminance of the source image.
    PreviewLuminance,
    /// The energy of the source image.
    PreviewEnergy,
    /// A carving session, advanced by `tick`.
    Carving,
}

/// A struct for holding the image to be carved.
pub struct SeamCarver {
    source: RgbaImage,
    luminance: ScalarMap,
    energy: ScalarMap,
    config: CarveConfig,
    mode: Mode,
    session: Option<CarvingSession>,
}

impl SeamCarver {
    /// Creates a new SeamCarver with an image to be carved.  The
    /// previews are computed here, once, from the original.
    pub fn new(source: RgbaImage, config: CarveConfig) -> SeamResult<Self> {
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            return Err(SeamError::invalid_geometry(width, height));
        }
        config.validate()?;
        let luminance = extract_luminance(&PixelMap::from_image(&source));
        let energy = compute_energy(&luminance);
        Ok(SeamCarver {
            source,
            luminance,
            energy,
            config,
            mode: Mode::Idle,
            session: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    pub fn source(&self) -> &RgbaImage {
        &self.source
    }

    /// The carving session, while in `Mode::Carving`.
    pub fn session(&self) -> Option<&CarvingSession> {
        self.session.as_ref()
    }

    /// Switch views.  Entering `Carving` always starts over from the
    /// original image, even when already carving; leaving it throws
    /// the session away.
    pub fn set_mode(&mut self, mode: Mode) -> SeamResult<()> {
        self.session = match mode {
            Mode::Carving => Some(CarvingSession::new(&self.source, &self.config)?),
            _ => None,
        };
        tracing::debug!(from = ?self.mode, to = ?mode, "mode changed");
        self.mode = mode;
        Ok(())
    }

    /// Advance the carving session by one frame.  Returns `None` when
    /// not carving.
    pub fn tick(&mut self) -> SeamResult<Option<Tick>> {
        match self.session.as_mut() {
            Some(session) => session.tick().map(Some),
            None => Ok(None),
        }
    }

    /// True when carving has finished, or when there is nothing to
    /// carve because we are not carving.
    pub fn is_done(&self) -> bool {
        self.session.as_ref().map_or(true, CarvingSession::is_done)
    }

    /// The picture for the current mode.  While carving, a selected
    /// seam is painted over the narrowed image.
    pub fn render(&self) -> RgbaImage {
        match (self.mode, self.session.as_ref()) {
            (Mode::PreviewLuminance, _) => {
                DynamicImage::ImageLuma8(luminance_to_image(&self.luminance)).to_rgba8()
            }
            (Mode::PreviewEnergy, _) => {
                DynamicImage::ImageLuma8(energy_to_image(&self.energy)).to_rgba8()
            }
            (Mode::Carving, Some(session)) => {
                let mut frame = session.to_image();
                if let Some(seam) = session.current_seam() {
                    highlight_seam(&mut frame, seam, SEAM_COLOR);
                }
                frame
            }
            _ => self.source.clone(),
        }
    }

    /// `render`, written straight into a caller-owned canvas at least
    /// as large as the original image, without building an
    /// intermediate frame.  Returns the size of the live region.
    pub fn render_into(&self, canvas: &mut RgbaImage) -> SeamResult<(u32, u32)> {
        match (self.mode, self.session.as_ref()) {
            (Mode::PreviewLuminance, _) => {
                let luma = &self.luminance;
                paint_into(canvas, luma.dimensions(), |x, y| gray(luma.get(y, x)))
            }
            (Mode::PreviewEnergy, _) => {
                let energy = &self.energy;
                let scale = energy_scale(energy);
                paint_into(canvas, energy.dimensions(), |x, y| {
                    gray(energy.get(y, x) * scale)
                })
            }
            (Mode::Carving, Some(session)) => {
                let image = session.current_image();
                let live = paint_into(canvas, image.dimensions(), |x, y| image.get(y, x))?;
                if let Some(seam) = session.current_seam() {
                    highlight_seam(canvas, seam, SEAM_COLOR);
                }
                Ok(live)
            }
            _ => blit_into(canvas, &self.source),
        }
    }
}

/// Remove `seams_to_remove` vertical seams from `image` in one go, or
/// as many as fit if the image runs down to a single column first.
pub fn seamcarve(image: &RgbaImage, seams_to_remove: u32) -> SeamResult<RgbaImage> {
    let mut session = CarvingSession::new(image, &CarveConfig::with_seams(seams_to_remove))?;
    session.run_to_completion()?;
    Ok(session.to_image())
}
