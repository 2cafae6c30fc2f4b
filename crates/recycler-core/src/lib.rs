//! # Records, data source and geometry
//!
//! `recycler-core` holds the pieces of the recycler list that do not know
//! anything about materialized items:
//!
//! - `Record` / `ItemId`: the data model. Records are ordered by id and can
//!   be marked invalid, which hides them from traversal without removing them.
//! - `OrderedSource`: a sorted container implementing the `DataSource`
//!   traversal contract (`next` / `previous` skip invalid records).
//! - `Span` / `Extent`: content-space intervals. The y axis points up.
//! - `Clock`: injectable time source used for navigation ticks.
//! - `ListConfig`: tuning knobs, validated before use.
//!
//! ## Traversal
//!
//! ```rust
//! use recycler_core::*;
//!
//! // ids 0..10, even ids valid
//! let source = OrderedSource::synthetic(10);
//!
//! assert_eq!(source.next(0).map(|r| r.id), Some(ItemId(2)));
//! assert_eq!(source.previous(2).map(|r| r.id), Some(ItemId(0)));
//! assert!(source.next(8).is_none());
//! ```
//!
//! `next` and `previous` also work from ids that are not in the source, so a
//! caller holding a stale id (say, of a record removed a moment ago) can still
//! walk to its neighbours.

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod record;
pub mod source;
pub mod tests;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use record::*;
pub use source::*;
