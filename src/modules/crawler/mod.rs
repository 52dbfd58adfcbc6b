pub mod checkpoint;
pub mod controller;
pub mod id_source;

pub use checkpoint::{CheckpointStore, FileCheckpointStore};
pub use controller::{CrawlController, CrawlOutcome, CrawlSummary};
pub use id_source::{IdSource, RemoteIdList};
