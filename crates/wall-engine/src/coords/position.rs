/// Screen position of a window's top-left corner.
///
/// Logical pixels unless stated otherwise; platform move events report
/// physical pixels. Can be negative on multi-monitor setups.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Physical to logical pixels. A non-positive scale factor is treated as 1.
    pub fn to_logical(self, scale_factor: f64) -> Self {
        if scale_factor.is_nan() || scale_factor <= 0.0 {
            return self;
        }
        let f = |v: i32| (f64::from(v) / scale_factor).round() as i32;
        Self::new(f(self.x), f(self.y))
    }
}
