// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving for Rust.
//!
//! Narrow an image one column at a time by repeatedly cutting out the
//! connected top-to-bottom path of pixels whose removal is least
//! noticeable.  The pipeline is luminance → Sobel energy → cumulative
//! minimum cost → backtracked seam → removal, and a carving session
//! keeps every intermediate map in step with the shrinking image.

mod ternary;

pub mod config;
pub mod energy;
pub mod error;
pub mod logging;
pub mod luminance;
pub mod render;
pub mod seamcarver;
pub mod seamfinder;
pub mod session;
pub mod twodmap;

pub use config::{CarveConfig, LoggingConfig};
pub use energy::{compute_energy, compute_energy_into};
pub use error::{SeamError, SeamResult};
pub use luminance::{extract_luminance, luminance_of};
pub use seamcarver::{seamcarve, Mode, SeamCarver};
pub use seamfinder::{compute_seam, find_vertical_seam, gradient_to_dp, seam_energy};
pub use session::{CarvingSession, Tick};
pub use twodmap::{PixelMap, ScalarMap, TwoDimensionalMap};
