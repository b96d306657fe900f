use super::Size;

/// Viewport draw area in framebuffer pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Area {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Area {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Area anchored at the origin covering `size`.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips the area against a target of `bounds`, returning `None` when
    /// nothing remains visible.
    pub fn clamped_to(self, bounds: Size) -> Option<Area> {
        if self.x >= bounds.width || self.y >= bounds.height {
            return None;
        }
        let width = self.width.min(bounds.width - self.x);
        let height = self.height.min(bounds.height - self.y);
        let clipped = Area::new(self.x, self.y, width, height);
        (!clipped.is_empty()).then_some(clipped)
    }
}
