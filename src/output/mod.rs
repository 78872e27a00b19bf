//! Output module: the gate-keeping record sink
//!
//! Records flow here from the worker tasks; only fully-populated records are
//! written, everything else is dropped whole.

mod csv_sink;
mod traits;

pub use csv_sink::CsvSink;
pub use traits::{RecordSink, SinkError, SinkResult};
