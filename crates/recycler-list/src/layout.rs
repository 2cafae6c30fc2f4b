//! Layout engine.
//!
//! Stacks handles edge to edge and keeps the [`Extent`] in step with them.
//! Whenever the stack has to grow or shrink in the middle, the side that
//! moves is the one away from the view: changes to offscreen content never
//! move what is on screen.

use recycler_core::{Extent, ItemId};

use crate::{ItemHandle, ItemStore, ViewWindow};

/// Materialized handles plus the extent they cover.
pub struct Content<V> {
    items: ItemStore<V>,
    extent: Extent,
}

impl<V> Default for Content<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Content<V> {
    pub fn new() -> Self {
        Self {
            items: ItemStore::new(),
            extent: Extent::new(0.0),
        }
    }

    pub fn items(&self) -> &ItemStore<V> {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut ItemStore<V> {
        &mut self.items
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Re-seats an empty stack at `at`.
    pub(crate) fn reset(&mut self, at: f32) {
        debug_assert!(self.items.is_empty());
        self.extent.reset(at);
    }

    pub fn insert_at_top(&mut self, mut handle: ItemHandle<V>) {
        let h = handle.height();
        handle.set_center(self.extent.top() + h * 0.5);
        self.extent.grow_top(h);
        log::trace!("layout: {} on top, center {}", handle.id(), handle.center());
        self.items.insert(0, handle);
    }

    pub fn append(&mut self, mut handle: ItemHandle<V>) {
        let h = handle.height();
        handle.set_center(self.extent.bottom() - h * 0.5);
        self.extent.grow_bottom(h);
        log::trace!("layout: {} appended, center {}", handle.id(), handle.center());
        let len = self.items.len();
        self.items.insert(len, handle);
    }

    /// Inserts between two existing handles. The new handle's bottom edge sits
    /// on the top edge of the handle currently at `index`; everything above
    /// moves up to make room.
    pub fn insert_at_index(&mut self, mut handle: ItemHandle<V>, index: usize) {
        let Some(below_top) = self.items.at(index).map(ItemHandle::top_edge) else {
            self.append(handle);
            return;
        };
        if index == 0 {
            self.insert_at_top(handle);
            return;
        }

        let h = handle.height();
        handle.set_center(below_top + h * 0.5);
        self.items.shift_range(0..index, h);
        self.extent.grow_top(h);
        log::trace!("layout: {} inserted at {index}", handle.id());
        self.items.insert(index, handle);
    }

    /// Removes `id` and closes the gap it leaves. Returns `None` if it is not
    /// materialized.
    pub fn remove(&mut self, id: ItemId, view: &ViewWindow) -> Option<ItemHandle<V>> {
        let index = self.items.index_of(id)?;
        let handle = self.items.remove_at(index)?;
        let h = handle.height();

        if view.is_above(handle.span()) {
            self.items.shift_range(0..index, -h);
            self.extent.shrink_top(h);
        } else {
            let len = self.items.len();
            self.items.shift_range(index..len, h);
            self.extent.shrink_bottom(h);
        }
        log::trace!("layout: {id} removed from {index}");
        Some(handle)
    }

    /// Applies a new measured height to `id` and re-flows the stack.
    ///
    /// The previous height is inferred from the neighbours (or the extent at
    /// either end) rather than trusted from the handle. Returns the height
    /// delta that was absorbed, or `None` when `id` is not materialized.
    pub fn on_height_changed(
        &mut self,
        id: ItemId,
        new_height: f32,
        view: &ViewWindow,
    ) -> Option<f32> {
        let index = self.items.index_of(id)?;
        let delta = new_height - self.inferred_height(index);

        let handle = self.items.at_mut(index)?;
        let above = view.is_above(handle.span());
        handle.set_height(new_height);
        if delta == 0.0 {
            return Some(0.0);
        }

        if above {
            // bottom edge stays put, growth goes upward
            handle.shift(delta * 0.5);
            self.items.shift_range(0..index, delta);
            self.extent.grow_top(delta);
        } else {
            handle.shift(-delta * 0.5);
            let len = self.items.len();
            self.items.shift_range(index + 1..len, -delta);
            self.extent.grow_bottom(delta);
        }
        log::trace!(
            "layout: {id} resized by {delta} ({})",
            if above { "top absorbs" } else { "bottom absorbs" }
        );
        Some(delta)
    }

    fn inferred_height(&self, index: usize) -> f32 {
        let above = match index {
            0 => self.extent.top(),
            i => self.items.at(i - 1).map_or(self.extent.top(), ItemHandle::bottom_edge),
        };
        let below = self
            .items
            .at(index + 1)
            .map_or(self.extent.bottom(), ItemHandle::top_edge);
        above - below
    }

    /// Largest mismatch between adjacent edges, including the extent at both
    /// ends. Zero (up to rounding) for a well-formed stack.
    pub fn stacking_error(&self) -> f32 {
        let mut err = 0.0f32;
        let mut edge = self.extent.top();
        for handle in self.items.iter() {
            err = err.max((handle.top_edge() - edge).abs());
            edge = handle.bottom_edge();
        }
        err.max((edge - self.extent.bottom()).abs())
    }

    pub fn total_height(&self) -> f32 {
        self.items.iter().map(ItemHandle::height).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn handle(id: i64, h: f32) -> ItemHandle<()> {
        ItemHandle::new(ItemId(id), h, ())
    }

    fn centers(c: &Content<()>) -> Vec<f32> {
        c.items().iter().map(|h| h.center()).collect()
    }

    fn stack(heights: &[f32]) -> Content<()> {
        let mut c = Content::new();
        for (i, &h) in heights.iter().enumerate() {
            c.append(handle(i as i64, h));
        }
        c
    }

    // A view far below everything, so every handle counts as "above".
    fn view_below() -> ViewWindow {
        ViewWindow::new(-10_000.0, 100.0)
    }

    #[test]
    fn test_top_and_bottom_growth() {
        let mut c = Content::new();
        c.insert_at_top(handle(1, 40.0));
        c.insert_at_top(handle(0, 20.0));
        c.append(handle(2, 10.0));
        assert_eq!(centers(&c), vec![50.0, 20.0, -5.0]);
        assert_eq!((c.extent().top(), c.extent().bottom()), (60.0, -10.0));
        assert!(c.stacking_error() < EPS);
    }

    #[test]
    fn test_insert_at_index_pushes_upper_part() {
        let mut c = stack(&[10.0, 10.0, 10.0]);
        c.insert_at_index(handle(9, 30.0), 1);
        let ids: Vec<i64> = c.items().iter().map(|h| h.id().0).collect();
        assert_eq!(ids, vec![0, 9, 1, 2]);
        // handles from index 1 down did not move
        assert_eq!(centers(&c), vec![25.0, 5.0, -15.0, -25.0]);
        assert_eq!(c.extent().top(), 30.0);
        assert!((c.extent().height() - c.total_height()).abs() < EPS);
    }

    #[test]
    fn test_remove_in_view_closes_from_below() {
        let mut c = stack(&[10.0, 10.0, 10.0]);
        let view = ViewWindow::new(-15.0, 30.0);
        let removed = c.remove(ItemId(1), &view).unwrap();
        assert_eq!(removed.id(), ItemId(1));
        assert_eq!(centers(&c), vec![-5.0, -15.0]);
        assert_eq!((c.extent().top(), c.extent().bottom()), (0.0, -20.0));
    }

    #[test]
    fn test_remove_above_view_closes_from_above() {
        let mut c = stack(&[10.0, 10.0, 10.0]);
        c.remove(ItemId(1), &view_below()).unwrap();
        assert_eq!(centers(&c), vec![-15.0, -25.0]);
        assert_eq!((c.extent().top(), c.extent().bottom()), (-10.0, -30.0));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut c = stack(&[10.0]);
        assert!(c.remove(ItemId(7), &view_below()).is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_height_change_in_view_grows_downward() {
        let mut c = stack(&[10.0, 10.0, 10.0]);
        let view = ViewWindow::new(-15.0, 30.0);
        let delta = c.on_height_changed(ItemId(1), 30.0, &view).unwrap();
        assert_eq!(delta, 20.0);
        assert_eq!(centers(&c), vec![-5.0, -25.0, -45.0]);
        assert_eq!(c.extent().bottom(), -50.0);
        assert!(c.stacking_error() < EPS);
    }

    #[test]
    fn test_height_change_above_view_grows_upward() {
        let mut c = stack(&[10.0, 10.0, 10.0]);
        c.on_height_changed(ItemId(1), 30.0, &view_below()).unwrap();
        assert_eq!(centers(&c), vec![15.0, -5.0, -25.0]);
        assert_eq!(c.extent().top(), 20.0);
        assert!(c.stacking_error() < EPS);
    }

    #[test]
    fn test_single_item_resize_uses_extent() {
        let mut c = stack(&[0.0]);
        let view = ViewWindow::new(0.0, 100.0);
        let delta = c.on_height_changed(ItemId(0), 24.0, &view).unwrap();
        assert_eq!(delta, 24.0);
        assert_eq!(c.extent().height(), 24.0);
        assert!(c.stacking_error() < EPS);
    }

    #[test]
    #[should_panic(expected = "invalid height")]
    fn test_negative_height_is_fatal() {
        let mut c = stack(&[10.0]);
        let view = ViewWindow::new(0.0, 100.0);
        c.on_height_changed(ItemId(0), -1.0, &view);
    }
}
