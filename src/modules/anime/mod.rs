pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ports::{AnimeCache, AnimeStore};
pub use application::service::AnimeService;
pub use domain::entities::{AnimeTitle, Artwork, CanonicalAnime, Episode};
pub use domain::services::reconciliation::{Reconcile, ReconciliationEngine};
pub use domain::services::save_policy::SavePolicy;
