// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use image::{Rgba, RgbaImage};
use proptest::prelude::*;
use seamcarve::{
    compute_energy, extract_luminance, find_vertical_seam, gradient_to_dp, seam_energy,
    CarveConfig, CarvingSession, PixelMap, ScalarMap, TwoDimensionalMap,
};

// Whole-number energies keep every path sum exact in f32, so the DP
// and the brute force can be compared with ==.
fn energy_map() -> impl Strategy<Value = ScalarMap> {
    (1u32..=5, 1u32..=5).prop_flat_map(|(w, h)| {
        prop::collection::vec(0u8..50, (w * h) as usize).prop_map(move |cells| {
            let data = cells.into_iter().map(f32::from).collect();
            TwoDimensionalMap::from_vec(w, h, data).unwrap()
        })
    })
}

fn small_image() -> impl Strategy<Value = RgbaImage> {
    (2u32..=8, 1u32..=6).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<[u8; 4]>(), (w * h) as usize).prop_map(move |pixels| {
            let mut image = RgbaImage::new(w, h);
            for (pixel, raw) in image.pixels_mut().zip(pixels) {
                *pixel = Rgba(raw);
            }
            image
        })
    })
}

// Cheapest connected top-to-bottom path, by trying all of them.
fn brute_force_minimum(energy: &ScalarMap) -> f32 {
    fn walk(energy: &ScalarMap, y: u32, x: u32, acc: f32) -> f32 {
        let acc = acc + energy.get(y, x);
        if y + 1 == energy.height() {
            return acc;
        }
        [x.checked_sub(1), Some(x), Some(x + 1)]
            .iter()
            .flatten()
            .filter(|nx| **nx < energy.width())
            .map(|nx| walk(energy, y + 1, *nx, acc))
            .fold(f32::INFINITY, f32::min)
    }
    (0..energy.width())
        .map(|x| walk(energy, 0, x, 0.0))
        .fold(f32::INFINITY, f32::min)
}

fn is_connected(seam: &[u32]) -> bool {
    seam.windows(2)
        .all(|pair| (i64::from(pair[0]) - i64::from(pair[1])).abs() <= 1)
}

proptest! {
    #[test]
    fn dp_last_row_minimum_is_the_cheapest_path(energy in energy_map()) {
        let (w, h) = energy.dimensions();
        let mut dp = TwoDimensionalMap::new(w, h);
        gradient_to_dp(&energy, &mut dp).unwrap();
        let dp_min = dp.row(h - 1).iter().copied().fold(f32::INFINITY, f32::min);
        prop_assert_eq!(dp_min, brute_force_minimum(&energy));
    }

    #[test]
    fn seam_is_connected_and_optimal(energy in energy_map()) {
        let seam = find_vertical_seam(&energy).unwrap();
        prop_assert_eq!(seam.len() as u32, energy.height());
        prop_assert!(seam.iter().all(|x| *x < energy.width()));
        prop_assert!(is_connected(&seam));
        prop_assert_eq!(seam_energy(&energy, &seam), brute_force_minimum(&energy));
    }

    #[test]
    fn seams_are_deterministic(energy in energy_map()) {
        let first = find_vertical_seam(&energy).unwrap();
        let second = find_vertical_seam(&energy.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn energy_keeps_shape_and_sign(image in small_image()) {
        let luma = extract_luminance(&PixelMap::from_image(&image));
        let energy = compute_energy(&luma);
        prop_assert_eq!(energy.dimensions(), image.dimensions());
        for y in 0..energy.height() {
            prop_assert!(energy.row(y).iter().all(|e| *e >= 0.0));
        }
    }

    #[test]
    fn every_removal_takes_exactly_one_column(image in small_image(), k in 0u32..10) {
        let (w, h) = image.dimensions();
        let mut session = CarvingSession::new(&image, &CarveConfig::with_seams(k)).unwrap();
        let removed = session.run_to_completion().unwrap();
        let expected = k.min(w - 1);
        prop_assert_eq!(removed, expected);
        prop_assert_eq!(session.dimensions(), (w - expected, h));
    }
}
