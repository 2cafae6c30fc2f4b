pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::ListConfig;
pub use crate::error::{ConfigError, SourceError};
pub use crate::geometry::{Extent, Size, Span};
pub use crate::record::{ItemId, Record, RecordPatch};
pub use crate::source::{DataSource, OrderedSource};
