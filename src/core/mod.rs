pub mod client;
pub mod logbuf;
pub mod records;
pub mod source;
pub mod status;

pub use client::{ClientConfig, LndRestClient};
pub use logbuf::{LogBuffer, LogEntry, LogLevel};
pub use source::{NodeSource, SourceError};
pub use status::{refresh_once, NodeStatus};
