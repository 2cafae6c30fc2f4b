use recycler_core::{ItemId, Record, Span};

/// A materialized item: a record id bound to a positioned, sized visual.
///
/// Positions are owned by the layout engine; hosts read them but only the
/// visual payload is theirs to mutate.
#[derive(Debug)]
pub struct ItemHandle<V> {
    id: ItemId,
    center: f32,
    height: f32,
    visible: bool,
    visual: V,
}

impl<V> ItemHandle<V> {
    pub(crate) fn new(id: ItemId, height: f32, visual: V) -> Self {
        assert_height(id, height);
        Self {
            id,
            center: 0.0,
            height,
            visible: false,
            visual,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Vertical center in content space.
    pub fn center(&self) -> f32 {
        self.center
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn top_edge(&self) -> f32 {
        self.center + self.height * 0.5
    }

    pub fn bottom_edge(&self) -> f32 {
        self.center - self.height * 0.5
    }

    pub fn span(&self) -> Span {
        Span::centered(self.center, self.height)
    }

    /// Whether the item was inside the view range after the last engine step.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    pub(crate) fn into_visual(self) -> V {
        self.visual
    }

    pub(crate) fn set_center(&mut self, center: f32) {
        self.center = center;
    }

    pub(crate) fn shift(&mut self, dy: f32) {
        self.center += dy;
    }

    pub(crate) fn set_height(&mut self, height: f32) {
        assert_height(self.id, height);
        self.height = height;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}

fn assert_height(id: ItemId, height: f32) {
    assert!(
        height.is_finite() && height >= 0.0,
        "item {id}: invalid height {height}"
    );
}

/// What a factory hands back for one record.
pub struct Materialized<V> {
    pub visual: V,
    /// Initial height in px; 0 when unknown until measured.
    pub height: f32,
}

impl<V> Materialized<V> {
    pub fn new(visual: V, height: f32) -> Self {
        Self { visual, height }
    }

    pub fn unmeasured(visual: V) -> Self {
        Self { visual, height: 0.0 }
    }
}

/// Host-side item factory.
///
/// `materialize` builds the visual for a record. Heights may be corrected
/// later through [`crate::RecyclerList::set_item_height`].
pub trait ItemFactory {
    type Visual;

    fn materialize(&mut self, record: &Record) -> Materialized<Self::Visual>;

    /// Called with the visual of an evicted or removed item.
    fn release(&mut self, _id: ItemId, _visual: Self::Visual) {}

    /// Called when an item enters or leaves the view range.
    fn set_visible(&mut self, _visual: &mut Self::Visual, _visible: bool) {}
}

/// Adapts a closure into an [`ItemFactory`].
pub struct FnFactory<F>(pub F);

impl<V, F> ItemFactory for FnFactory<F>
where
    F: FnMut(&Record) -> Materialized<V>,
{
    type Visual = V;

    fn materialize(&mut self, record: &Record) -> Materialized<V> {
        (self.0)(record)
    }
}
