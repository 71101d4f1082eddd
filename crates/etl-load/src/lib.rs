//! Loading side of the pipeline.
//!
//! - [`TableSink`]: lands a layer table ([`WarehouseSink`] CSV tables or the
//!   [`KeyValueSink`] item store)
//! - [`MessageQueue`]: stage trigger messages ([`DirectoryQueue`],
//!   [`MemoryQueue`])
//! - [`load_dimensions`]: product dimension used by gold enrichment

mod dimensions;
mod error;
mod queue;
mod sink;

pub use dimensions::load_dimensions;
pub use error::{LoadError, Result};
pub use queue::{DirectoryQueue, MemoryQueue, MessageQueue};
pub use sink::{
    FILE_ID_FIELD, Item, KeyValueSink, LOADED_AT_FIELD, ROW_ID_FIELD, SinkKind, TableSink,
    WarehouseSink, row_id,
};
