//! In-memory column buffer core for a Parquet-style columnar storage
//! engine: primitive column buffers, the nullable and repeated wrappers
//! that layer Dremel-style level encoding over them, and the ordering
//! adapters sort is built from.

pub mod config;
pub mod error;
pub mod nullable;
pub mod ordering;
pub mod page;
pub mod primitive;
pub mod repeated;
pub mod stats;
pub mod value;

pub use config::ColumnBufferConfig;
pub use error::{ColumnError, Result, WriteOutcome};
pub use nullable::NullableColumnBuffer;
pub use ordering::{NullOrdering, Orderable, Reversed};
pub use page::{Page, PageRowIter, PageValues};
pub use primitive::ColumnBuffer;
pub use repeated::RepeatedColumnBuffer;
pub use stats::{ColumnBufferStats, ColumnIdentity};
pub use value::{Row, Value, ValueKind};
