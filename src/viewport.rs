//! Fit-to-viewport transform between image pixels and screen points.
//!
//! Screen coordinates are relative to the container's top-left corner.

use crate::geometry::{Point, Size};

/// Uniform scale and centering offsets of an image inside its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportFit {
    /// Screen points per image pixel.
    pub ratio: f32,
    pub left: f32,
    pub top: f32,
}

impl ViewportFit {
    /// Scales the image as large as possible without overflowing the
    /// container on either axis, then centers it.
    ///
    /// Returns `None` when either size is degenerate.
    pub fn compute(image: Size, container: Size) -> Option<Self> {
        if !image.is_positive() || !container.is_positive() {
            return None;
        }
        let xratio = container.width / image.width;
        let yratio = container.height / image.height;
        let ratio = xratio.min(yratio);
        Some(Self {
            ratio,
            left: container.width / 2.0 - ratio * image.width / 2.0,
            top: container.height / 2.0 - ratio * image.height / 2.0,
        })
    }

    /// Where the scaled image lands: top-left corner and displayed size.
    pub fn image_rect(&self, image: Size) -> (Point, Size) {
        (
            Point::new(self.left, self.top),
            Size::new(image.width * self.ratio, image.height * self.ratio),
        )
    }

    /// Top-left screen position of a marker glyph centered on `pixel`.
    pub fn pixel_to_screen(&self, pixel: Point, marker: Size) -> Point {
        Point::new(
            self.left + pixel.x * self.ratio - marker.width / 2.0,
            self.top + pixel.y * self.ratio - marker.height / 2.0,
        )
    }

    /// Inverse of [`ViewportFit::pixel_to_screen`].
    pub fn screen_to_pixel(&self, screen: Point, marker: Size) -> Point {
        Point::new(
            (screen.x + marker.width / 2.0 - self.left) / self.ratio,
            (screen.y + marker.height / 2.0 - self.top) / self.ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tall_image_in_square_container() {
        let fit = ViewportFit::compute(Size::new(1000.0, 2000.0), Size::new(500.0, 500.0)).unwrap();
        assert_relative_eq!(fit.ratio, 0.25);
        assert_relative_eq!(fit.left, 187.5);
        assert_relative_eq!(fit.top, 0.0);

        let (origin, shown) = fit.image_rect(Size::new(1000.0, 2000.0));
        assert_eq!(origin, Point::new(187.5, 0.0));
        assert_eq!(shown, Size::new(250.0, 500.0));
    }

    #[test]
    fn test_wide_image_letterboxed() {
        let fit = ViewportFit::compute(Size::new(800.0, 200.0), Size::new(400.0, 400.0)).unwrap();
        assert_relative_eq!(fit.ratio, 0.5);
        assert_relative_eq!(fit.left, 0.0);
        assert_relative_eq!(fit.top, 150.0);
    }

    #[test]
    fn test_scaled_image_never_overflows() {
        let images = [(1.0, 1.0), (101.0, 3000.0), (4032.0, 3024.0), (640.0, 480.0), (7.5, 0.3)];
        let containers = [(1.0, 1.0), (1200.0, 800.0), (333.0, 999.0), (50.5, 20.25)];
        for &(iw, ih) in &images {
            for &(cw, ch) in &containers {
                let image = Size::new(iw, ih);
                let fit = ViewportFit::compute(image, Size::new(cw, ch)).unwrap();
                let (origin, shown) = fit.image_rect(image);
                let eps = 1e-3 * cw.max(ch);
                assert!(shown.width <= cw + eps, "{iw}x{ih} in {cw}x{ch}");
                assert!(shown.height <= ch + eps, "{iw}x{ih} in {cw}x{ch}");
                assert!(origin.x >= -eps && origin.y >= -eps);
            }
        }
    }

    #[test]
    fn test_degenerate_sizes_have_no_fit() {
        assert!(ViewportFit::compute(Size::new(0.0, 10.0), Size::new(500.0, 500.0)).is_none());
        assert!(ViewportFit::compute(Size::new(10.0, 10.0), Size::new(500.0, 0.0)).is_none());
        assert!(ViewportFit::compute(Size::new(10.0, f32::NAN), Size::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_pixel_screen_round_trip() {
        let fit = ViewportFit::compute(Size::new(2272.0, 1704.0), Size::new(1180.0, 740.0)).unwrap();
        let marker = Size::new(20.0, 20.0);
        for p in [Point::new(1136.0, 621.6), Point::new(0.5, 1703.0), Point::new(2000.0, 3.0)] {
            let back = fit.screen_to_pixel(fit.pixel_to_screen(p, marker), marker);
            assert_relative_eq!(back.x, p.x, max_relative = 1e-4);
            assert_relative_eq!(back.y, p.y, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_marker_is_centered_on_landmark() {
        let fit = ViewportFit::compute(Size::new(1000.0, 2000.0), Size::new(500.0, 500.0)).unwrap();
        let screen = fit.pixel_to_screen(Point::new(0.0, 0.0), Size::new(20.0, 10.0));
        assert_relative_eq!(screen.x, 177.5);
        assert_relative_eq!(screen.y, -5.0);
    }
}
