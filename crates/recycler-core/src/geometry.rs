//! Content-space geometry. The y axis points up: `top >= bottom` for every
//! well-formed span.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A vertical interval in content space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    pub top: f32,
    pub bottom: f32,
}

impl Span {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Span of height `height` centred on `center`.
    pub fn centered(center: f32, height: f32) -> Self {
        Self {
            top: center + height * 0.5,
            bottom: center - height * 0.5,
        }
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    pub fn contains(&self, y: f32) -> bool {
        y <= self.top && y >= self.bottom
    }

    /// Closed-interval overlap; touching spans intersect.
    pub fn intersects(&self, other: &Span) -> bool {
        self.bottom <= other.top && other.bottom <= self.top
    }

    pub fn expand(&self, margin: f32) -> Span {
        Span {
            top: self.top + margin,
            bottom: self.bottom - margin,
        }
    }
}

/// The span covered by materialized items.
///
/// Only the layout engine mutates it; every mutation re-checks `top >= bottom`
/// in debug builds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    top: f32,
    bottom: f32,
}

impl Extent {
    pub fn new(at: f32) -> Self {
        Self {
            top: at,
            bottom: at,
        }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.top == self.bottom
    }

    pub fn span(&self) -> Span {
        Span::new(self.top, self.bottom)
    }

    /// Collapses the extent onto `at`. Used when the first item is materialized.
    pub fn reset(&mut self, at: f32) {
        self.top = at;
        self.bottom = at;
    }

    /// Moves the top edge up by `dh` (down when negative).
    pub fn grow_top(&mut self, dh: f32) {
        self.top += dh;
        self.check();
    }

    /// Moves the bottom edge down by `dh` (up when negative).
    pub fn grow_bottom(&mut self, dh: f32) {
        self.bottom -= dh;
        self.check();
    }

    pub fn shrink_top(&mut self, dh: f32) {
        self.grow_top(-dh);
    }

    pub fn shrink_bottom(&mut self, dh: f32) {
        self.grow_bottom(-dh);
    }

    fn check(&self) {
        // Rounding noise from long add/remove sequences is tolerated.
        debug_assert!(
            self.top - self.bottom >= -1e-3,
            "extent inverted: top {} < bottom {}",
            self.top,
            self.bottom
        );
    }
}
