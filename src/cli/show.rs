//! Config command implementation
//!
//! Loads the configuration the way a service would, reports validation
//! problems, and prints the settings each handle will be built with.

use super::output::Output;
use crate::registry::ClientRegistry;
use crate::utils::config::{ConfigError, RegistryConfig};
use std::path::Path;

/// Load and validate `path` (or the environment when it does not exist).
///
/// Returns the process exit code.
pub fn run(path: &Path, validate_only: bool, full: bool, output: &Output) -> i32 {
    output.banner();

    let config = match RegistryConfig::load_or_env(path) {
        Ok(config) => config,
        Err(err) => {
            report_error(&err, output);
            return 1;
        }
    };

    if validate_only {
        output.success("Configuration is valid");
        return 0;
    }

    let registry = match ClientRegistry::build(&config) {
        Ok(registry) => registry,
        Err(err) => {
            output.error(&err.to_string());
            return 1;
        }
    };

    print_handles(&registry, output);

    if full {
        output.subheader("Resolved configuration");
        match registry.config().to_toml() {
            Ok(rendered) => output.block(&rendered),
            Err(err) => {
                output.error(&err.to_string());
                return 1;
            }
        }
    }

    0
}

fn report_error(err: &ConfigError, output: &Output) {
    let issues = err.issues();
    if issues.is_empty() {
        output.error(&err.to_string());
        return;
    }

    output.error(&format!("Configuration has {} problem(s):", issues.len()));
    for issue in issues {
        output.warning(&issue.to_string());
    }
}

fn print_handles(registry: &ClientRegistry, output: &Output) {
    output.header("Client handles");

    let primary = registry.primary();
    output.subheader("Primary LLM (Ollama)");
    output.kv("endpoint", primary.base_url());
    output.kv("model", primary.model_name());
    output.kv("temperature", &primary.temperature().to_string());

    output.subheader("Secondary LLM (Groq)");
    match registry.secondary() {
        Some(secondary) => {
            output.kv("endpoint", secondary.base_url());
            output.kv("model", secondary.model_name());
            output.kv("temperature", &secondary.temperature().to_string());
        }
        None => output.info("disabled"),
    }

    let vector_db = registry.vector_db();
    output.subheader("Vector database (Qdrant)");
    output.kv("host", vector_db.host());
    output.kv("url", &vector_db.url());
}
