pub mod lines;
pub mod source;

pub use lines::{readlines, Chunks, Delimiter, LineReader};
pub use source::{with_sink, with_source, Sink, SinkGuard, Source, SourceGuard, WriteMode};
