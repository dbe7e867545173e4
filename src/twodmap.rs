// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two-dimensional map underneath everything.
//!
//! The same container carries the RGBA image being carved and the
//! scalar luminance, energy, and cumulative-cost matrices.  Carving
//! shrinks the *logical* width one column at a time while the
//! allocation (the stride) stays put, so a session never reallocates.

use crate::error::{SeamError, SeamResult};
use image::{Rgba, RgbaImage};

/// An addressable two-dimensional field of `P`, stored row-major.
/// `width` is the number of live columns; `stride` is the allocated
/// row length, and `width <= stride` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Copy> {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<P>,
}

/// The scalar matrices: luminance, energy and cumulative cost.
pub type ScalarMap = TwoDimensionalMap<f32>;

/// The image buffer being carved.
pub type PixelMap = TwoDimensionalMap<Rgba<u8>>;

impl<P: Copy + Default> TwoDimensionalMap<P> {
    /// Define a new map, every cell set to `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: P) -> Self {
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major buffer.  The buffer must hold exactly
    /// `width * height` cells.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> SeamResult<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(SeamError::dimension_mismatch(
                (width, height),
                (data.len() as u32, 1),
            ));
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            stride: width,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Logical `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  The
    // stride, not the width, is the distance between rows.
    fn get_index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "({}, {}) is outside a {}x{} map",
            row,
            col,
            self.width,
            self.height
        );
        (row as usize) * (self.stride as usize) + (col as usize)
    }

    /// Get the value at a single cell.
    pub fn get(&self, row: u32, col: u32) -> P {
        self.data[self.get_index(row, col)]
    }

    /// Set the value at a single cell.
    pub fn set(&mut self, row: u32, col: u32, value: P) {
        let index = self.get_index(row, col);
        self.data[index] = value;
    }

    /// The live cells of one row.
    pub fn row(&self, row: u32) -> &[P] {
        assert!(row < self.height, "row {} is outside height {}", row, self.height);
        let start = (row as usize) * (self.stride as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Delete the cell at `col` in a single row by sliding everything
    /// to its right, out to the end of the allocation, one place left.
    /// The width is *not* touched; shrinking is the caller's job, and
    /// must happen for every map in a session at once.
    pub fn remove_column(&mut self, row: u32, col: u32) {
        let start = self.get_index(row, col) - col as usize;
        let end = start + self.stride as usize;
        self.data[start..end].copy_within(col as usize + 1.., col as usize);
    }

    /// Drop the rightmost logical column.
    pub(crate) fn shrink_width(&mut self) {
        assert!(self.width > 0, "cannot shrink a zero-width map");
        self.width -= 1;
    }

    /// True when `other` has the same logical width and height.
    pub fn same_shape<Q: Copy>(&self, other: &TwoDimensionalMap<Q>) -> bool {
        self.dimensions() == other.dimensions()
    }
}

impl TwoDimensionalMap<Rgba<u8>> {
    /// Copy a decoded RGBA image into a carvable buffer.
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data: image.pixels().copied().collect(),
        }
    }

    /// Copy the live region back out into an ordinary image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| self.get(y, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_map(width: u32, height: u32) -> TwoDimensionalMap<u32> {
        TwoDimensionalMap::from_vec(width, height, (0..width * height).collect()).unwrap()
    }

    #[test]
    fn new_map_is_zeroed_with_stride_equal_to_width() {
        let map: ScalarMap = TwoDimensionalMap::new(4, 3);
        assert_eq!(map.dimensions(), (4, 3));
        assert_eq!(map.stride(), 4);
        assert!((0..3).all(|r| map.row(r).iter().all(|v| *v == 0.0)));
    }

    #[test]
    fn get_and_set_address_by_row_then_column() {
        let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(3, 2);
        map.set(1, 2, 7);
        assert_eq!(map.get(1, 2), 7);
        assert_eq!(map.row(1), &[0, 0, 7]);
        assert_eq!(map.row(0), &[0, 0, 0]);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let result = TwoDimensionalMap::from_vec(3, 3, vec![0u8; 8]);
        assert!(matches!(result, Err(SeamError::DimensionMismatch { .. })));
    }

    #[test]
    fn remove_column_shifts_only_that_row() {
        let mut map = counting_map(4, 2);
        map.remove_column(0, 1);
        assert_eq!(map.width(), 4);
        assert_eq!(&map.row(0)[..3], &[0, 2, 3]);
        assert_eq!(map.row(1), &[4, 5, 6, 7]);
    }

    #[test]
    fn shrinking_keeps_the_stride() {
        let mut map = counting_map(4, 2);
        map.remove_column(0, 0);
        map.remove_column(1, 3);
        map.shrink_width();
        assert_eq!(map.dimensions(), (3, 2));
        assert_eq!(map.stride(), 4);
        assert_eq!(map.row(0), &[1, 2, 3]);
        assert_eq!(map.row(1), &[4, 5, 6]);

        // A second removal still walks the full allocation.
        map.remove_column(0, 1);
        map.remove_column(1, 0);
        map.shrink_width();
        assert_eq!(map.row(0), &[1, 3]);
        assert_eq!(map.row(1), &[5, 6]);
    }

    #[test]
    #[should_panic]
    fn reading_past_the_logical_width_panics() {
        let mut map = counting_map(3, 1);
        map.shrink_width();
        map.get(0, 2);
    }

    #[test]
    #[should_panic]
    fn reading_past_the_height_panics() {
        let map = counting_map(3, 1);
        map.get(1, 0);
    }

    #[test]
    fn pixel_map_round_trips_through_image() {
        let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 9, 255]));
        let mut map = PixelMap::from_image(&image);
        assert_eq!(map.get(1, 2), Rgba([2, 1, 9, 255]));
        assert_eq!(map.to_image(), image);

        map.remove_column(0, 0);
        map.remove_column(1, 2);
        map.shrink_width();
        let narrowed = map.to_image();
        assert_eq!(narrowed.dimensions(), (2, 2));
        assert_eq!(*narrowed.get_pixel(0, 0), Rgba([1, 0, 9, 255]));
        assert_eq!(*narrowed.get_pixel(1, 1), Rgba([1, 1, 9, 255]));
    }

    #[test]
    fn same_shape_compares_logical_dimensions() {
        let a: ScalarMap = TwoDimensionalMap::new(3, 2);
        let mut b: PixelMap = TwoDimensionalMap::filled(4, 2, Rgba([0, 0, 0, 0]));
        assert!(!a.same_shape(&b));
        b.shrink_width();
        assert!(a.same_shape(&b));
    }
}
