// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Perceived brightness of an RGBA image, one scalar per pixel.

use crate::twodmap::{PixelMap, ScalarMap, TwoDimensionalMap};
use image::Rgba;
use itertools::iproduct;

/// Pixel -> Brightness.  The usual perceptual weights; alpha plays no
/// part.
#[inline]
pub fn luminance_of(pixel: &Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}

/// Build the luminance map of the live region of an image.
pub fn extract_luminance(image: &PixelMap) -> ScalarMap {
    let (width, height) = image.dimensions();
    let mut luma = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        luma.set(y, x, luminance_of(&image.get(y, x)));
    }
    luma
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn primaries_use_their_weights() {
        assert!((luminance_of(&Rgba([255, 0, 0, 255])) - 76.245).abs() < 1e-3);
        assert!((luminance_of(&Rgba([0, 255, 0, 255])) - 149.685).abs() < 1e-3);
        assert!((luminance_of(&Rgba([0, 0, 255, 255])) - 29.07).abs() < 1e-3);
        assert!((luminance_of(&Rgba([255, 255, 255, 255])) - 255.0).abs() < 1e-3);
    }

    #[test]
    fn alpha_is_ignored() {
        assert_eq!(
            luminance_of(&Rgba([10, 20, 30, 0])),
            luminance_of(&Rgba([10, 20, 30, 255]))
        );
    }

    #[test]
    fn extraction_preserves_shape_and_position() {
        let image = RgbaImage::from_fn(3, 2, |x, y| {
            if (x, y) == (2, 1) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let luma = extract_luminance(&PixelMap::from_image(&image));
        assert_eq!(luma.dimensions(), (3, 2));
        assert!((luma.get(1, 2) - 255.0).abs() < 1e-3);
        assert_eq!(luma.get(0, 2), 0.0);
        assert_eq!(luma.get(1, 0), 0.0);
    }
}
