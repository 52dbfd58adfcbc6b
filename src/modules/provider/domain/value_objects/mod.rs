mod provider_enum;

pub use provider_enum::Provider;
