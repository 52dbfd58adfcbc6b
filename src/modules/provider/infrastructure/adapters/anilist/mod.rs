mod adapter;
mod models;
mod queries;

pub use adapter::AniListAdapter;
