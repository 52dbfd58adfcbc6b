pub mod anime;
pub mod crawler;
pub mod provider;
