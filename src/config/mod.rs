//! Configuration: optional `config.toml` settings and per-user paths.

pub mod paths;
pub mod settings;

pub use settings::Settings;
