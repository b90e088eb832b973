// THEORY:
// The `Probe` module turns a touch point into the block of pixels a pooling strategy
// reduces. It is the spatial half of the picker: where `GridManager`-style code
// slices a frame into fixed chunks, a probe slices out exactly one square window
// centered on the point of interest.
//
// Algorithm:
// 1.  Candidate bounds are `center ± radius` on each axis.
// 2.  Each bound is clamped independently: low bounds to 0, high bounds to
//     `dimension - 1`. The center itself is never moved, so a center near an
//     edge yields a truncated (non-square) window rather than a shifted one.
// 3.  If clamping leaves `min > max` on either axis the center was too far outside
//     the buffer for any pixel to be sampled, and the request is rejected.
// 4.  Pixels are read row-major, top-left to bottom-right.
//
// All bounds are inclusive.

pub mod probe {
    use crate::core_modules::color::color::Color;
    use crate::core_modules::pixel_buffer::pixel_buffer::PixelSource;
    use crate::error::{PickerError, Result};
    use log::trace;

    /// An inclusive, axis-aligned rectangle of buffer coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProbeRegion {
        pub min_x: i32,
        pub min_y: i32,
        pub max_x: i32,
        pub max_y: i32,
    }

    impl ProbeRegion {
        pub fn width(&self) -> u32 {
            (self.max_x - self.min_x + 1) as u32
        }

        pub fn height(&self) -> u32 {
            (self.max_y - self.min_y + 1) as u32
        }

        /// Number of pixels covered by the region.
        pub fn area(&self) -> usize {
            self.width() as usize * self.height() as usize
        }

        pub fn contains(&self, x: i32, y: i32) -> bool {
            (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
        }

        /// All covered coordinates in row-major order.
        pub fn points(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
            let (min_x, max_x) = (self.min_x, self.max_x);
            (self.min_y..=self.max_y).flat_map(move |y| (min_x..=max_x).map(move |x| (x, y)))
        }
    }

    /// Computes the clamped probe window around `(center_x, center_y)`.
    ///
    /// The center must already be in buffer-local coordinates. Fails with
    /// `InvalidArgument` for a negative radius, non-positive dimensions, or a
    /// center so far outside the buffer that the window would be empty.
    pub fn extract_probe_region(
        center_x: i32,
        center_y: i32,
        probe_radius: i32,
        buffer_width: i32,
        buffer_height: i32,
    ) -> Result<ProbeRegion> {
        if probe_radius < 0 {
            return Err(PickerError::invalid_argument(
                "probe_radius",
                format!("must be >= 0, got {probe_radius}"),
            ));
        }
        if buffer_width <= 0 || buffer_height <= 0 {
            return Err(PickerError::invalid_argument(
                "buffer_dimensions",
                format!("must be positive, got {buffer_width}x{buffer_height}"),
            ));
        }

        let mut min_x = center_x.saturating_sub(probe_radius);
        let mut max_x = center_x.saturating_add(probe_radius);
        let mut min_y = center_y.saturating_sub(probe_radius);
        let mut max_y = center_y.saturating_add(probe_radius);

        if min_x < 0 {
            min_x = 0;
        }
        if max_x >= buffer_width {
            max_x = buffer_width - 1;
        }
        if min_y < 0 {
            min_y = 0;
        }
        if max_y >= buffer_height {
            max_y = buffer_height - 1;
        }

        if min_x > max_x || min_y > max_y {
            return Err(PickerError::invalid_argument(
                "center",
                format!(
                    "({center_x}, {center_y}) with radius {probe_radius} leaves no pixels \
                     inside {buffer_width}x{buffer_height}"
                ),
            ));
        }

        let region = ProbeRegion {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        trace!("probe ({center_x}, {center_y}) r={probe_radius} -> {region:?}");
        Ok(region)
    }

    /// `extract_probe_region` using the dimensions of `source`.
    pub fn region_for<S: PixelSource + ?Sized>(
        source: &S,
        center_x: i32,
        center_y: i32,
        probe_radius: i32,
    ) -> Result<ProbeRegion> {
        let (width, height) = source_dimensions(source)?;
        extract_probe_region(center_x, center_y, probe_radius, width, height)
    }

    /// Reads every pixel of `region` from `source`, row-major.
    pub fn read_region<S: PixelSource + ?Sized>(
        source: &S,
        region: &ProbeRegion,
    ) -> Result<Vec<Color>> {
        let (width, height) = source_dimensions(source)?;
        if region.min_x < 0
            || region.min_y < 0
            || region.min_x > region.max_x
            || region.min_y > region.max_y
            || region.max_x >= width
            || region.max_y >= height
        {
            return Err(PickerError::invalid_argument(
                "region",
                format!("{region:?} does not fit inside {width}x{height}"),
            ));
        }

        let mut pixels = Vec::with_capacity(region.area());
        pixels.extend(
            region
                .points()
                .map(|(x, y)| source.get(x as u32, y as u32)),
        );
        Ok(pixels)
    }

    /// Extracts the probe window around a center and reads its pixels.
    pub fn probe_pixels<S: PixelSource + ?Sized>(
        source: &S,
        center_x: i32,
        center_y: i32,
        probe_radius: i32,
    ) -> Result<Vec<Color>> {
        let region = region_for(source, center_x, center_y, probe_radius)?;
        read_region(source, &region)
    }

    fn source_dimensions<S: PixelSource + ?Sized>(source: &S) -> Result<(i32, i32)> {
        let width = i32::try_from(source.width()).map_err(|_| {
            PickerError::invalid_argument("buffer_width", format!("{} exceeds i32", source.width()))
        })?;
        let height = i32::try_from(source.height()).map_err(|_| {
            PickerError::invalid_argument(
                "buffer_height",
                format!("{} exceeds i32", source.height()),
            )
        })?;
        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::probe::*;
    use crate::core_modules::color::color::Color;
    use crate::core_modules::pixel_buffer::pixel_buffer::PixelBuffer;
    use proptest::prelude::*;

    fn region(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> ProbeRegion {
        ProbeRegion {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[test]
    fn clamps_top_left_corner() {
        assert_eq!(extract_probe_region(0, 0, 5, 100, 100).unwrap(), region(0, 0, 5, 5));
    }

    #[test]
    fn clamps_bottom_right_corner() {
        assert_eq!(
            extract_probe_region(99, 99, 5, 100, 100).unwrap(),
            region(94, 94, 99, 99)
        );
    }

    #[test]
    fn interior_window_is_square() {
        let r = extract_probe_region(50, 40, 3, 100, 100).unwrap();
        assert_eq!(r, region(47, 37, 53, 43));
        assert_eq!((r.width(), r.height(), r.area()), (7, 7, 49));
    }

    #[test]
    fn zero_radius_is_single_pixel() {
        let r = extract_probe_region(7, 3, 0, 10, 10).unwrap();
        assert_eq!(r, region(7, 3, 7, 3));
        assert_eq!(r.area(), 1);
    }

    #[test]
    fn radius_larger_than_buffer_covers_everything() {
        assert_eq!(extract_probe_region(1, 1, 50, 4, 3).unwrap(), region(0, 0, 3, 2));
    }

    #[test]
    fn center_just_outside_yields_edge_strip() {
        let r = extract_probe_region(-2, 5, 3, 10, 10).unwrap();
        assert_eq!(r, region(0, 2, 1, 8));
    }

    #[test]
    fn center_far_outside_is_rejected() {
        let err = extract_probe_region(-20, 5, 3, 10, 10).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(extract_probe_region(5, 40, 3, 10, 10).is_err());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(extract_probe_region(0, 0, -1, 10, 10).unwrap_err().is_invalid_argument());
        assert!(extract_probe_region(0, 0, 1, 0, 10).unwrap_err().is_invalid_argument());
        assert!(extract_probe_region(0, 0, 1, 10, -3).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let r = extract_probe_region(i32::MAX, 0, i32::MAX, 10, 10).unwrap();
        assert_eq!(r, region(0, 0, 9, 9));
    }

    #[test]
    fn reads_pixels_row_major() {
        let buffer =
            PixelBuffer::from_fn(5, 5, |x, y| Color::from_packed(y * 10 + x)).unwrap();
        let pixels = probe_pixels(&buffer, 0, 0, 1).unwrap();
        let packed: Vec<u32> = pixels.iter().map(|c| c.to_packed()).collect();
        assert_eq!(packed, vec![0, 1, 10, 11]);
    }

    #[test]
    fn read_region_rejects_foreign_region() {
        let buffer = PixelBuffer::filled(3, 3, Color::WHITE).unwrap();
        assert!(read_region(&buffer, &region(0, 0, 3, 0)).is_err());
        assert!(read_region(&buffer, &region(2, 0, 1, 0)).is_err());
    }

    #[test]
    fn points_cover_area() {
        let r = region(2, 3, 4, 4);
        let points: Vec<_> = r.points().collect();
        assert_eq!(points, vec![(2, 3), (3, 3), (4, 3), (2, 4), (3, 4), (4, 4)]);
        assert!(r.contains(4, 4));
        assert!(!r.contains(5, 4));
    }

    proptest! {
        #[test]
        fn in_bounds_centers_always_yield_clamped_regions(
            width in 1i32..200,
            height in 1i32..200,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
            radius in 0i32..64,
        ) {
            let cx = (fx * width as f64) as i32;
            let cy = (fy * height as f64) as i32;
            let r = extract_probe_region(cx, cy, radius, width, height).unwrap();
            prop_assert!(r.min_x >= 0 && r.min_y >= 0);
            prop_assert!(r.max_x < width && r.max_y < height);
            prop_assert!(r.contains(cx, cy));
            prop_assert!(r.width() as i32 <= 2 * radius + 1);
            prop_assert!(r.height() as i32 <= 2 * radius + 1);
        }
    }
}
