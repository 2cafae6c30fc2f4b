//! Animated navigation to a record.
//!
//! `scroll_to_id` picks a direction and arms a periodic tick. Each due tick
//! scrolls one `nav_step`; once the target is materialized the residual
//! distance is applied so the target lands on the leading edge of the view
//! (bottom edge when travelling forward, top edge when travelling backward).
//! Ticks are driven by the host and timed by the list's [`Clock`], so the
//! whole thing runs on one thread and can be stepped deterministically.
//!
//! [`Clock`]: recycler_core::Clock

use recycler_core::{DataSource, ItemId};
use web_time::{Duration, Instant};

use crate::engine::Changes;
use crate::fill::EPS;
use crate::{ItemFactory, RecyclerList, ViewportGeometryProvider};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward later records.
    Forward,
    /// Toward earlier records.
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStatus {
    Idle,
    Travelling(ItemId),
    Arrived(ItemId),
    /// The source ran out before the target showed up, or the target is not a
    /// valid record.
    Exhausted(ItemId),
    Cancelled(ItemId),
}

impl NavigationStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, NavigationStatus::Travelling(_))
    }
}

#[derive(Clone, Copy, Debug)]
struct Trip {
    target: ItemId,
    direction: Direction,
    due: Instant,
}

/// At most one navigation in flight.
#[derive(Debug, Default)]
pub struct Navigator {
    trip: Option<Trip>,
}

impl Navigator {
    pub fn is_active(&self) -> bool {
        self.trip.is_some()
    }

    pub fn target(&self) -> Option<ItemId> {
        self.trip.map(|t| t.target)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.trip.map(|t| t.direction)
    }

    /// When the next step is due.
    pub fn next_due(&self) -> Option<Instant> {
        self.trip.map(|t| t.due)
    }

    fn start(&mut self, target: ItemId, direction: Direction, due: Instant) {
        self.trip = Some(Trip {
            target,
            direction,
            due,
        });
    }

    fn cancel(&mut self) -> Option<ItemId> {
        self.trip.take().map(|t| t.target)
    }

    /// Takes the step that is due at `now`, if any, and schedules the next one.
    /// Missed periods are skipped rather than replayed.
    fn take_due(&mut self, now: Instant, period: Duration) -> Option<(ItemId, Direction)> {
        let trip = self.trip.as_mut()?;
        if now < trip.due {
            return None;
        }
        trip.due += period;
        if trip.due <= now {
            trip.due = now + period;
        }
        Some((trip.target, trip.direction))
    }
}

impl<D, F, P> RecyclerList<D, F, P>
where
    D: DataSource,
    F: ItemFactory,
    P: ViewportGeometryProvider,
{
    /// Starts navigating to `target`, replacing any navigation in flight.
    ///
    /// A target that is already materialized is aligned immediately and
    /// reported as `Arrived`; otherwise the list starts `Travelling` and
    /// [`Self::tick`] does the rest.
    pub fn scroll_to_id(&mut self, target: impl Into<ItemId>) -> NavigationStatus {
        let target = target.into();
        if let Some(previous) = self.navigator.cancel() {
            log::debug!("nav: {previous} superseded by {target}");
        }
        self.changes |= Changes::NAVIGATION;

        if !self.source.contains_valid(target) {
            log::debug!("nav: {target} is not a valid record");
            return NavigationStatus::Exhausted(target);
        }
        if self.content.is_empty() {
            self.fill();
        }
        let Some(first) = self.content.items().first().map(|h| h.id()) else {
            return NavigationStatus::Exhausted(target);
        };
        let direction = if target > first {
            Direction::Forward
        } else {
            Direction::Backward
        };

        if self.content.items().contains(target) {
            self.align(target, direction);
            log::debug!("nav: {target} already materialized");
            return NavigationStatus::Arrived(target);
        }

        let due = self.clock.now() + self.config.nav_interval();
        self.navigator.start(target, direction, due);
        log::debug!("nav: travelling {direction:?} to {target}");
        NavigationStatus::Travelling(target)
    }

    /// `Travelling` while a navigation is in flight, `Idle` otherwise.
    pub fn navigation(&self) -> NavigationStatus {
        match self.navigator.target() {
            Some(target) => NavigationStatus::Travelling(target),
            None => NavigationStatus::Idle,
        }
    }

    /// Advances the navigation in flight if a step is due.
    pub fn tick(&mut self) -> NavigationStatus {
        let now = self.clock.now();
        let Some((target, direction)) = self.navigator.take_due(now, self.config.nav_interval())
        else {
            return self.navigation();
        };

        let outcome = self.process_scroll_delta(direction.sign() * self.config.nav_step);

        if self.content.items().contains(target) {
            self.align(target, direction);
            self.navigator.cancel();
            self.changes |= Changes::NAVIGATION;
            log::debug!("nav: arrived at {target}");
            return NavigationStatus::Arrived(target);
        }
        if outcome.saturated {
            self.navigator.cancel();
            self.changes |= Changes::NAVIGATION;
            log::debug!("nav: source exhausted before {target}");
            return NavigationStatus::Exhausted(target);
        }
        NavigationStatus::Travelling(target)
    }

    /// Stops the navigation in flight; its tick never fires again.
    pub fn cancel_navigation(&mut self) -> NavigationStatus {
        match self.navigator.cancel() {
            Some(target) => {
                self.changes |= Changes::NAVIGATION;
                log::debug!("nav: cancelled {target}");
                NavigationStatus::Cancelled(target)
            }
            None => NavigationStatus::Idle,
        }
    }

    /// Scrolls a materialized target onto the leading edge of the view,
    /// unless it is already fully visible.
    fn align(&mut self, target: ItemId, direction: Direction) {
        let Some(handle) = self.content.items().get(target) else {
            return;
        };
        let view = self.view_range();
        let span = handle.span();
        if span.top <= view.top + EPS && span.bottom >= view.bottom - EPS {
            return;
        }
        let residual = match direction {
            Direction::Forward => view.bottom - span.bottom,
            Direction::Backward => view.top - span.top,
        };
        if residual.abs() > EPS {
            self.process_scroll_delta(residual);
        }
    }
}

#[cfg(test)]
mod tests {
    use recycler_core::{Clock, ItemId, ListConfig, ManualClock, OrderedSource, Record};
    use web_time::Duration;

    use super::Direction;
    use super::NavigationStatus::*;
    use crate::{FixedViewport, FnFactory, Materialized, RecyclerList};

    const FRAME: Duration = Duration::from_millis(16);

    type List = RecyclerList<OrderedSource, FnFactory<fn(&Record) -> Materialized<()>>, FixedViewport>;

    fn forty(_: &Record) -> Materialized<()> {
        Materialized::new((), 40.0)
    }

    fn list(clock: &ManualClock) -> List {
        RecyclerList::new(
            OrderedSource::synthetic(100),
            FnFactory(forty as fn(&Record) -> Materialized<()>),
            FixedViewport::new(320.0, 200.0),
            ListConfig::default()
                .with_nav_step(24.0)
                .with_nav_interval(FRAME),
        )
        .unwrap()
        .with_clock(clock.clone())
    }

    fn run(list: &mut List, clock: &ManualClock, max_ticks: usize) -> (super::NavigationStatus, usize) {
        for n in 1..=max_ticks {
            clock.advance(FRAME);
            let status = list.tick();
            if status.is_finished() {
                return (status, n);
            }
        }
        panic!("navigation did not finish in {max_ticks} ticks");
    }

    #[test]
    fn test_backward_navigation_lands_on_top_edge() {
        let clock = ManualClock::default();
        let mut list = list(&clock);

        assert_eq!(list.scroll_to_id(40), Travelling(ItemId(40)));
        assert_eq!(list.navigator().direction(), Some(Direction::Backward));
        assert_eq!(list.navigator().next_due(), Some(clock.now() + FRAME));
        // nothing happens before the first interval elapses
        assert_eq!(list.tick(), Travelling(ItemId(40)));
        assert_eq!(list.offset(), 0.0);

        let (status, _) = run(&mut list, &clock, 500);
        assert_eq!(status, Arrived(ItemId(40)));
        let target = list.item(ItemId(40)).unwrap();
        assert!((target.top_edge() - list.view_range().top).abs() < 1e-3);
        assert!(target.is_visible());
        assert!(!list.navigator().is_active());
    }

    #[test]
    fn test_forward_navigation_lands_on_bottom_edge() {
        let clock = ManualClock::default();
        let mut list = list(&clock);
        list.process_scroll_delta(-2_000.0);
        assert!(list.item(ItemId(98)).is_none());

        assert_eq!(list.scroll_to_id(98), Travelling(ItemId(98)));
        assert_eq!(list.navigator().direction(), Some(Direction::Forward));
        let (status, _) = run(&mut list, &clock, 500);
        assert_eq!(status, Arrived(ItemId(98)));
        let target = list.item(ItemId(98)).unwrap();
        assert!((target.bottom_edge() - list.view_range().bottom).abs() < 1e-3);
    }

    #[test]
    fn test_visible_target_arrives_without_moving() {
        let clock = ManualClock::default();
        let mut list = list(&clock);
        assert_eq!(list.scroll_to_id(94), Arrived(ItemId(94)));
        assert_eq!(list.offset(), 0.0);
        assert!(!list.navigator().is_active());
    }

    #[test]
    fn test_invalid_target_is_exhausted() {
        let clock = ManualClock::default();
        let mut list = list(&clock);
        // odd ids are invalid, 500 does not exist
        assert_eq!(list.scroll_to_id(41), Exhausted(ItemId(41)));
        assert_eq!(list.scroll_to_id(500), Exhausted(ItemId(500)));
        assert_eq!(list.tick(), Idle);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let clock = ManualClock::default();
        let mut list = list(&clock);
        list.scroll_to_id(10);
        clock.advance(FRAME);
        list.tick();
        let offset = list.offset();

        assert_eq!(list.cancel_navigation(), Cancelled(ItemId(10)));
        clock.advance(FRAME * 10);
        assert_eq!(list.tick(), Idle);
        assert_eq!(list.offset(), offset);
        assert_eq!(list.cancel_navigation(), Idle);
    }

    #[test]
    fn test_one_step_per_due_tick() {
        let clock = ManualClock::default();
        let mut list = list(&clock);
        list.scroll_to_id(0);

        clock.advance(FRAME);
        list.tick();
        assert_eq!(list.offset(), 24.0);

        // a long stall yields one step, not a burst
        clock.advance(FRAME * 5);
        list.tick();
        assert_eq!(list.offset(), 48.0);
        assert_eq!(list.navigator().next_due(), Some(clock.now() + FRAME));
        list.tick();
        assert_eq!(list.offset(), 48.0);
    }

    #[test]
    fn test_new_target_replaces_old() {
        let clock = ManualClock::default();
        let mut list = list(&clock);
        list.scroll_to_id(10);
        assert_eq!(list.scroll_to_id(20), Travelling(ItemId(20)));
        assert_eq!(list.navigator().target(), Some(ItemId(20)));
        assert_eq!(list.navigation(), Travelling(ItemId(20)));
    }
}
