//! Crop geometry for the bar strip

/// Pixel rectangle as `(left, top, right, bottom)`, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    /// The bottom `bar_height` rows of a `width` x `height` image.
    ///
    /// `top` is clamped into the image: a bar taller than the capture
    /// yields the whole image, a non-positive bar height an empty rectangle.
    pub fn bottom_strip(width: u32, height: u32, bar_height: i64) -> Self {
        let top = i64::from(height)
            .saturating_sub(bar_height)
            .clamp(0, i64::from(height));
        Self {
            left: 0,
            top: top as u32,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.left, self.top, self.right, self.bottom)
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hd_bar() {
        let rect = CropRect::bottom_strip(1920, 1080, 40);

        assert_eq!(rect.as_tuple(), (0, 1040, 1920, 1080));
        assert_eq!(rect.width(), 1920);
        assert_eq!(rect.height(), 40);
        assert_eq!(rect.to_string(), "(0, 1040, 1920, 1080)");
    }

    #[test]
    fn test_bar_taller_than_image_clamps() {
        let rect = CropRect::bottom_strip(800, 20, 30);

        assert_eq!(rect.as_tuple(), (0, 0, 800, 20));
        assert!(!rect.is_empty());
    }

    #[test]
    fn test_non_positive_bar_is_empty() {
        assert!(CropRect::bottom_strip(800, 600, 0).is_empty());
        assert!(CropRect::bottom_strip(800, 600, -10).is_empty());
        assert!(CropRect::bottom_strip(800, 600, i64::MIN).is_empty());
    }

    #[test]
    fn test_extreme_bar_heights_do_not_overflow() {
        assert_eq!(CropRect::bottom_strip(800, 600, i64::MAX).as_tuple(), (0, 0, 800, 600));
        assert_eq!(
            CropRect::bottom_strip(u32::MAX, u32::MAX, i64::MIN).as_tuple(),
            (0, u32::MAX, u32::MAX, u32::MAX)
        );
    }
}
