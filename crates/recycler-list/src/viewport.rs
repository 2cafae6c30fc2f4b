use recycler_core::{Size, Span};

/// Viewport geometry supplied by the host.
///
/// The engine moves the anchor (`offset`, the view center in content space)
/// but never changes the size; hosts resize and then call
/// [`crate::RecyclerList::on_viewport_resized`].
pub trait ViewportGeometryProvider {
    fn size(&self) -> Size;
    fn offset(&self) -> f32;
    fn set_offset(&mut self, offset: f32);
}

/// Plain owned viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedViewport {
    size: Size,
    offset: f32,
}

impl FixedViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            offset: 0.0,
        }
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width.max(0.0), height.max(0.0));
    }
}

impl ViewportGeometryProvider for FixedViewport {
    fn size(&self) -> Size {
        self.size
    }

    fn offset(&self) -> f32 {
        self.offset
    }

    fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }
}

/// Snapshot of the view used by layout decisions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewWindow {
    pub center: f32,
    pub height: f32,
}

impl ViewWindow {
    pub fn new(center: f32, height: f32) -> Self {
        Self { center, height }
    }

    pub fn of(viewport: &impl ViewportGeometryProvider) -> Self {
        Self::new(viewport.offset(), viewport.size().height)
    }

    /// `{ top: center + h/2, bottom: center - h/2 }`.
    pub fn range(&self) -> Span {
        Span::centered(self.center, self.height)
    }

    /// True when the center, the top edge or the bottom edge of `item` is
    /// strictly within half a view height of the view center. Items taller
    /// than the view that straddle the center count as well.
    pub fn in_view(&self, item: Span) -> bool {
        let half = self.height * 0.5;
        let near = |y: f32| (y - self.center).abs() < half;
        near(item.center())
            || near(item.top)
            || near(item.bottom)
            || (item.top > self.center && item.bottom < self.center)
    }

    /// Whether `item` sits on the upper side: out of view and centred above the view center.
    pub(crate) fn is_above(&self, item: Span) -> bool {
        !self.in_view(item) && item.center() > self.center
    }

    pub fn keep_alive(&self, margin: f32) -> Span {
        self.range().expand(margin)
    }
}
