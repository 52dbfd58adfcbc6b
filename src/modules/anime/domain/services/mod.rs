pub mod reconciliation;
pub mod save_policy;
