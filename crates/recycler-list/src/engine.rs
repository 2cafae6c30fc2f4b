use bitflags::bitflags;
use recycler_core::{
    Clock, ConfigError, DataSource, Extent, ItemId, ListConfig, OrderedSource, Record,
    RecordPatch, SourceError, Span, SystemClock,
};

use crate::{
    Content, ItemFactory, ItemHandle, Materialized, Navigator, ViewWindow,
    ViewportGeometryProvider,
};

bitflags! {
    /// What an engine step touched, accumulated until [`RecyclerList::take_changes`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Changes: u8 {
        const ANCHOR = 1 << 0;
        const LAYOUT = 1 << 1;
        const MATERIALIZED = 1 << 2;
        const EVICTED = 1 << 3;
        const VISIBILITY = 1 << 4;
        const NAVIGATION = 1 << 5;
    }
}

/// Which end of the stack a record is pulled onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum End {
    Top,
    Bottom,
}

/// A virtualized list over a [`DataSource`].
///
/// Owns the materialized handles and drives them from host events: scroll
/// deltas, height notifications, viewport resizes, child add/remove and
/// navigation ticks. Every entry point runs to completion and leaves the
/// stack gap-free, the view covered (unless the source ran out) and
/// out-of-range handles evicted.
pub struct RecyclerList<D, F, P>
where
    D: DataSource,
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    pub(crate) source: D,
    pub(crate) factory: F,
    pub(crate) viewport: P,
    pub(crate) content: Content<F::Visual>,
    pub(crate) config: ListConfig,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) navigator: Navigator,
    pub(crate) changes: Changes,
}

impl<D, F, P> RecyclerList<D, F, P>
where
    D: DataSource,
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    /// Validates `config` and fills the viewport.
    pub fn new(source: D, factory: F, viewport: P, config: ListConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut list = Self {
            source,
            factory,
            viewport,
            content: Content::new(),
            config,
            clock: Box::new(SystemClock),
            navigator: Navigator::default(),
            changes: Changes::empty(),
        };
        let n = list.fill();
        log::debug!(
            "recycler: initial fill materialized {n}, extent {:?}",
            list.content.extent().span()
        );
        Ok(list)
    }

    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Direct access to the data source. Call [`Self::fill`] after changing it.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn viewport(&self) -> &P {
        &self.viewport
    }

    /// Call [`Self::on_viewport_resized`] after resizing through this.
    pub fn viewport_mut(&mut self) -> &mut P {
        &mut self.viewport
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn content(&self) -> &Content<F::Visual> {
        &self.content
    }

    /// Materialized handles, top to bottom.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &ItemHandle<F::Visual>> + '_ {
        self.content.items().iter()
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemHandle<F::Visual>> {
        self.content.items().get(id)
    }

    pub fn visual_mut(&mut self, id: ItemId) -> Option<&mut F::Visual> {
        self.content.items_mut().get_mut(id).map(ItemHandle::visual_mut)
    }

    pub fn is_materialized(&self, id: ItemId) -> bool {
        self.content.items().contains(id)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn extent(&self) -> &Extent {
        self.content.extent()
    }

    /// View center in content space.
    pub fn offset(&self) -> f32 {
        self.viewport.offset()
    }

    pub fn window(&self) -> ViewWindow {
        ViewWindow::of(&self.viewport)
    }

    pub fn view_range(&self) -> Span {
        self.window().range()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn take_changes(&mut self) -> Changes {
        std::mem::take(&mut self.changes)
    }

    /// Re-establishes coverage after the data source or the layout changed,
    /// then evicts and refreshes visibility. Returns how many items were
    /// materialized.
    pub fn fill(&mut self) -> usize {
        let n = self.fill_view();
        self.evict();
        self.refresh_visibility();
        n
    }

    pub fn on_viewport_resized(&mut self) {
        let size = self.viewport.size();
        log::debug!("recycler: viewport resized to {}x{}", size.width, size.height);
        self.changes |= Changes::LAYOUT;
        self.fill();
    }

    /// Height-change notification from the host. `false` if `id` is not
    /// materialized (it may have been evicted in the meantime).
    pub fn set_item_height(&mut self, id: ItemId, height: f32) -> bool {
        let window = self.window();
        match self.content.on_height_changed(id, height, &window) {
            Some(delta) => {
                if delta != 0.0 {
                    self.changes |= Changes::LAYOUT;
                    self.fill();
                }
                true
            }
            None => {
                log::debug!("recycler: height change for {id} ignored, not materialized");
                false
            }
        }
    }

    /// Host hook: a child for record `id` was added at sibling `index`
    /// (0 = top; `len()` or more appends).
    pub fn insert_child(&mut self, index: usize, id: ItemId) -> bool {
        if self.content.items().contains(id) {
            log::warn!("recycler: {id} is already materialized, insert ignored");
            return false;
        }
        let Some(record) = self.source.get(id) else {
            log::warn!("recycler: no record {id} to insert");
            return false;
        };
        let Materialized { visual, height } = self.factory.materialize(record);
        let handle = ItemHandle::new(id, height, visual);
        if self.content.is_empty() {
            let at = self.view_range().bottom;
            self.content.reset(at);
        }
        self.content.insert_at_index(handle, index);
        self.changes |= Changes::MATERIALIZED | Changes::LAYOUT;
        self.fill();
        true
    }

    pub fn append_child(&mut self, id: ItemId) -> bool {
        self.insert_child(self.content.len(), id)
    }

    /// Host hook: the child for `id` was removed.
    pub fn remove_child(&mut self, id: ItemId) -> bool {
        if !self.drop_handle(id) {
            log::debug!("recycler: remove of {id} ignored, not materialized");
            return false;
        }
        self.fill();
        true
    }

    pub(crate) fn drop_handle(&mut self, id: ItemId) -> bool {
        let window = self.window();
        match self.content.remove(id, &window) {
            Some(handle) => {
                self.factory.release(id, handle.into_visual());
                self.changes |= Changes::LAYOUT;
                true
            }
            None => false,
        }
    }

    /// Returns whether the offset actually changed; tiny moves can round away.
    pub(crate) fn move_anchor(&mut self, dy: f32) -> bool {
        let offset = self.viewport.offset();
        let moved = offset + dy;
        if moved == offset {
            return false;
        }
        self.viewport.set_offset(moved);
        self.changes |= Changes::ANCHOR;
        true
    }

    /// Materializes the valid record next to the given end of the stack.
    pub(crate) fn pull(&mut self, end: End) -> Option<ItemId> {
        let record = match end {
            End::Top => {
                let first = self.content.items().first()?.id();
                self.source.previous(first)?
            }
            End::Bottom => {
                let last = self.content.items().last()?.id();
                self.source.next(last)?
            }
        };
        let id = record.id;
        if self.content.items().contains(id) {
            log::warn!("recycler: {id} is materialized out of order, treating as boundary");
            return None;
        }
        let Materialized { visual, height } = self.factory.materialize(record);
        let handle = ItemHandle::new(id, height, visual);
        match end {
            End::Top => self.content.insert_at_top(handle),
            End::Bottom => self.content.append(handle),
        };
        self.changes |= Changes::MATERIALIZED | Changes::LAYOUT;
        Some(id)
    }

    /// Materializes the most recent valid record into an empty stack, with its
    /// bottom edge on the view's bottom edge.
    pub(crate) fn seed(&mut self) -> Option<ItemId> {
        debug_assert!(self.content.is_empty());
        let at = self.view_range().bottom;
        let record = self.source.last_valid()?;
        let id = record.id;
        let Materialized { visual, height } = self.factory.materialize(record);
        self.content.reset(at);
        self.content.insert_at_top(ItemHandle::new(id, height, visual));
        self.changes |= Changes::MATERIALIZED | Changes::LAYOUT;
        log::debug!("recycler: seeded with {id} at {at}");
        Some(id)
    }

    pub(crate) fn refresh_visibility(&mut self) {
        let window = self.window();
        let mut flipped = 0usize;
        for handle in self.content.items_mut().iter_mut() {
            let visible = window.in_view(handle.span());
            if handle.set_visible(visible) {
                self.factory.set_visible(handle.visual_mut(), visible);
                flipped += 1;
            }
        }
        if flipped > 0 {
            self.changes |= Changes::VISIBILITY;
        }
    }

    /// Largest edge mismatch in the stack; see [`Content::stacking_error`].
    pub fn stacking_error(&self) -> f32 {
        self.content.stacking_error()
    }

    /// Human-readable dump of the stack, one handle per line.
    pub fn describe(&self) -> String {
        self.items()
            .map(|h| {
                format!(
                    "{} center={} height={}{}",
                    h.id(),
                    h.center(),
                    h.height(),
                    if h.is_visible() { " visible" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Record maintenance that keeps the stack in sync with the source.
impl<F, P> RecyclerList<OrderedSource, F, P>
where
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    /// Adds (or replaces) a record and refills.
    pub fn add_record(&mut self, record: Record) {
        let id = record.id;
        let drop_stale = !record.valid && self.content.items().contains(id);
        self.source.add(record);
        if drop_stale {
            self.drop_handle(id);
        }
        if !self.adopt(id) {
            self.fill();
        }
    }

    pub fn remove_record(&mut self, id: impl Into<ItemId>) -> Result<Record, SourceError> {
        let id = id.into();
        let removed = self.source.remove(id)?;
        self.drop_handle(id);
        self.fill();
        Ok(removed)
    }

    /// Patches a record. A materialized handle is dropped when the record turns
    /// invalid or changes id; the refill materializes it again where it belongs.
    pub fn modify_record(
        &mut self,
        id: impl Into<ItemId>,
        patch: &RecordPatch,
    ) -> Result<(), SourceError> {
        let id = id.into();
        let record = self.source.modify(id, patch)?;
        let new_id = record.id;
        let stale = !record.valid || new_id != id;
        if stale {
            self.drop_handle(id);
        }
        if !self.adopt(new_id) {
            self.fill();
        }
        Ok(())
    }

    /// Materializes a valid record that now falls strictly between the first
    /// and last materialized ids, where neither end of the stack would ever
    /// reach it.
    fn adopt(&mut self, id: ItemId) -> bool {
        let items = self.content.items();
        if items.contains(id) || !self.source.contains_valid(id) {
            return false;
        }
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return false;
        };
        if id <= first.id() || id >= last.id() {
            return false;
        }
        let index = items.iter().position(|h| h.id() > id).unwrap_or(items.len());
        log::debug!("recycler: adopting {id} at {index}");
        self.insert_child(index, id)
    }
}
