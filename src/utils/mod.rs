/// Registry configuration (TOML file, environment, validation).
pub mod config;
