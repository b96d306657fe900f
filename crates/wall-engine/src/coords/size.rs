/// Width/height pair in pixels.
///
/// Used both for logical window sizes and for physical framebuffer sizes; the
/// owner decides which space a value lives in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// `true` when either dimension is zero (minimized windows report this).
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Dimensions as `f32`, for matrix construction.
    #[inline]
    pub fn to_f32(self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// Width over height, or `1.0` for an empty size.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(s: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(s.width, s.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_any_dimension_is_zero() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn aspect_of_empty_size_is_one() {
        assert_eq!(Size::zero().aspect(), 1.0);
        assert_eq!(Size::new(1024, 512).aspect(), 2.0);
    }
}
