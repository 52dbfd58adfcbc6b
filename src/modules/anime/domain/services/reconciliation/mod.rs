mod engine;
mod episode_merger;
mod field_resolver;
mod ordering;

pub use engine::{extract_native_id, Reconcile, ReconciliationEngine};
pub use episode_merger::merge_episode_lists;
pub use ordering::reorder_top_level;
