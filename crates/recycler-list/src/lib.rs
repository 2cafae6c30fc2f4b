//! # Recycler list
//!
//! A virtualized vertical list for data sets too large to materialize at
//! once. Only the records near the viewport get a visual; the rest stay in
//! the [`DataSource`](recycler_core::DataSource) until scrolling brings them
//! close.
//!
//! The list works in content space with the y axis pointing up. Items are
//! stacked edge to edge by id, earliest on top. The viewport is a window of
//! fixed height whose center (the anchor, `offset`) moves as the user scrolls.
//!
//! ```rust
//! use recycler_list::prelude::*;
//!
//! let mut list = RecyclerList::new(
//!     OrderedSource::synthetic(100),
//!     FnFactory(|r: &Record| Materialized::new(format!("row {}", r.id), 40.0)),
//!     FixedViewport::new(320.0, 200.0),
//!     ListConfig::default(),
//! )
//! .unwrap();
//!
//! // the newest records fill the view first
//! assert_eq!(list.items().last().map(|h| h.id()), Some(ItemId(98)));
//!
//! // a negative delta reveals earlier records
//! let out = list.process_scroll_delta(-120.0);
//! assert_eq!(out.applied, -120.0);
//! assert!(list.item(ItemId(84)).is_some());
//! ```
//!
//! Hosts that measure their visuals after creation report real heights with
//! [`RecyclerList::set_item_height`]; items that change height offscreen
//! grow away from the view so nothing on screen jumps.

pub mod engine;
pub mod evict;
pub mod fill;
pub mod handle;
pub mod layout;
pub mod navigator;
pub mod scroll;
pub mod store;
pub mod viewport;

pub use engine::{Changes, RecyclerList};
pub use handle::{FnFactory, ItemFactory, ItemHandle, Materialized};
pub use layout::Content;
pub use navigator::{Direction, NavigationStatus, Navigator};
pub use scroll::ScrollOutcome;
pub use store::{HandleKey, ItemStore};
pub use viewport::{FixedViewport, ViewWindow, ViewportGeometryProvider};

pub use recycler_core;

pub mod prelude {
    pub use crate::{
        Changes, Content, Direction, FixedViewport, FnFactory, ItemFactory, ItemHandle,
        Materialized, NavigationStatus, RecyclerList, ScrollOutcome, ViewWindow,
        ViewportGeometryProvider,
    };
    pub use recycler_core::prelude::*;
}
