//! Lazy filling and anchor adjustment.
//!
//! An empty list is seeded with the most recent valid record, its bottom edge
//! on the view's bottom edge. From there the stack grows downward while the
//! view has a gap below, and upward while it has a gap above. Once the source
//! runs out in one direction the anchor slides into whatever slack the other
//! side has, so a short list stays glued to its top edge.

use recycler_core::{DataSource, ItemId};

use crate::engine::End;
use crate::{ItemFactory, RecyclerList, ViewportGeometryProvider};

/// Gaps below this are treated as closed.
pub(crate) const EPS: f32 = 1e-3;

impl<D, F, P> RecyclerList<D, F, P>
where
    D: DataSource,
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    /// Materializes records until the view range is covered or the source is
    /// exhausted on the open side(s). Returns how many were materialized.
    ///
    /// Zero-height handles never close a gap, so pulling stops once
    /// `max_scroll_materializations` of them are live. The host's
    /// [`Self::set_item_height`] reports resume the fill.
    pub(crate) fn fill_view(&mut self) -> usize {
        let budget = self.config.max_scroll_materializations;
        let mut unmeasured = self.unmeasured_count();
        let mut n = 0;
        if self.content.is_empty() {
            let Some(id) = self.seed() else {
                return 0;
            };
            n += 1;
            unmeasured += usize::from(self.is_unmeasured(id));
        }

        loop {
            let view = self.view_range();
            let extent = self.content.extent().span();
            let gap_below = extent.bottom - view.bottom > EPS;
            let gap_above = view.top - extent.top > EPS;
            if !gap_below && !gap_above {
                break;
            }
            if unmeasured >= budget {
                log::debug!("fill: {unmeasured} unmeasured items live, waiting for heights");
                break;
            }
            if gap_below {
                if let Some(id) = self.pull(End::Bottom) {
                    n += 1;
                    unmeasured += usize::from(self.is_unmeasured(id));
                    continue;
                }
                if self.slide_into_slack() {
                    continue;
                }
            }
            if let Some(id) = self.pull(End::Top) {
                n += 1;
                unmeasured += usize::from(self.is_unmeasured(id));
                continue;
            }
            // nothing left above: pin the top, which may open room below
            if gap_above && self.glue_top() {
                continue;
            }
            break;
        }

        self.adjust_anchor();
        if n > 0 {
            log::trace!("fill: materialized {n}, {} live", self.content.len());
        }
        n
    }

    fn is_unmeasured(&self, id: ItemId) -> bool {
        self.content
            .items()
            .get(id)
            .is_some_and(|h| h.height() <= EPS)
    }

    fn unmeasured_count(&self) -> usize {
        self.content
            .items()
            .iter()
            .filter(|h| h.height() <= EPS)
            .count()
    }

    /// Moves the anchor so that slack above the view covers a gap below it,
    /// then, if the view still reaches above the content, pulls the view down
    /// until its top edge meets the content's top edge.
    pub(crate) fn adjust_anchor(&mut self) -> bool {
        let slid = self.slide_into_slack();
        let glued = self.glue_top();
        slid || glued
    }

    fn slide_into_slack(&mut self) -> bool {
        let view = self.view_range();
        let extent = self.content.extent().span();
        let slack = extent.top - view.top;
        let gap = extent.bottom - view.bottom;
        slack > EPS && gap > EPS && self.move_anchor(slack.min(gap))
    }

    fn glue_top(&mut self) -> bool {
        if self.content.is_empty() {
            return false;
        }
        let top = self.content.extent().top();
        let view = self.view_range();
        view.top - top > EPS && self.move_anchor(top - view.top)
    }
}
