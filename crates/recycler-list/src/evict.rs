//! Eviction of handles outside the keep-alive band.
//!
//! The band is the view range widened by `keep_alive_margin` on both sides.
//! Handles that do not touch it are dropped from the ends inward, which keeps
//! the stack contiguous, and their visuals go back to the factory.

use recycler_core::{DataSource, ItemId};
use smallvec::SmallVec;

use crate::engine::Changes;
use crate::{ItemFactory, ItemHandle, RecyclerList, ViewportGeometryProvider};

impl<D, F, P> RecyclerList<D, F, P>
where
    D: DataSource,
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    /// Returns how many handles were evicted.
    pub(crate) fn evict(&mut self) -> usize {
        let window = self.window();
        let band = window.keep_alive(self.config.keep_alive_margin);
        let outside = |h: &ItemHandle<F::Visual>| !h.span().intersects(&band);

        let mut doomed: SmallVec<[ItemId; 8]> = SmallVec::new();
        let items = self.content.items();
        doomed.extend(items.iter().take_while(|h| outside(*h)).map(ItemHandle::id));
        if doomed.len() < items.len() {
            doomed.extend(items.iter().rev().take_while(|h| outside(*h)).map(ItemHandle::id));
        }
        if doomed.is_empty() {
            return 0;
        }

        for &id in &doomed {
            if let Some(handle) = self.content.remove(id, &window) {
                self.factory.release(id, handle.into_visual());
            }
        }
        self.changes |= Changes::EVICTED | Changes::LAYOUT;
        log::trace!("evict: dropped {}, {} live", doomed.len(), self.content.len());
        doomed.len()
    }
}
