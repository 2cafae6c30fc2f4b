//! Scroll controller.
//!
//! A positive delta reveals later records (the content moves up, the anchor
//! moves down). The delta is spent first on room already materialized past
//! the view edge; whatever is left pulls in the next record, evicts what fell
//! out of the keep-alive band and goes round again. When the source has
//! nothing more in the direction of travel the scroll saturates: the view
//! stops flush with the last record and the rest of the delta is dropped.

use recycler_core::DataSource;

use crate::engine::End;
use crate::fill::EPS;
use crate::{ItemFactory, RecyclerList, ViewportGeometryProvider};

/// What a call to [`RecyclerList::process_scroll_delta`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOutcome {
    pub requested: f32,
    /// Signed like `requested`; smaller in magnitude when saturated.
    pub applied: f32,
    /// The source ran out in the direction of travel.
    pub saturated: bool,
    pub materialized: usize,
}

impl<D, F, P> RecyclerList<D, F, P>
where
    D: DataSource,
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    pub fn process_scroll_delta(&mut self, delta: f32) -> ScrollOutcome {
        let mut outcome = ScrollOutcome {
            requested: delta,
            ..ScrollOutcome::default()
        };
        if !delta.is_finite() || delta == 0.0 {
            if !delta.is_finite() {
                log::warn!("scroll: ignoring non-finite delta {delta}");
            }
            return outcome;
        }
        if self.content.is_empty() {
            outcome.materialized += self.fill_view();
            if self.content.is_empty() {
                outcome.saturated = true;
                return outcome;
            }
        }

        let forward = delta > 0.0;
        let mut remaining = delta.abs();
        let mut applied = 0.0f32;
        let mut budget = self.config.max_scroll_materializations;

        loop {
            let view = self.view_range();
            let extent = self.content.extent();
            let room = if forward {
                view.bottom - extent.bottom()
            } else {
                extent.top() - view.top
            };
            let room = if room > EPS { room } else { 0.0 };

            let step = remaining.min(room);
            if step > 0.0 {
                self.move_anchor(if forward { -step } else { step });
                remaining -= step;
                applied += step;
            }
            if remaining <= 0.0 {
                break;
            }
            if budget == 0 {
                log::warn!(
                    "scroll: materialization budget exhausted, {remaining} of {delta} left over"
                );
                break;
            }

            let end = if forward { End::Bottom } else { End::Top };
            if self.pull(end).is_none() {
                outcome.saturated = true;
                log::debug!("scroll: saturated with {remaining} left over");
                break;
            }
            budget -= 1;
            outcome.materialized += 1;
            self.evict();
        }

        outcome.applied = applied.copysign(delta);
        outcome.materialized += self.fill_view();
        self.evict();
        self.refresh_visibility();
        outcome
    }
}
