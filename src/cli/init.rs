//! Init command implementation
//!
//! Writes a `lawbox.toml` (and a `.env.example`) with the registry defaults.

use super::output::Output;
use crate::utils::config::DEFAULT_CONFIG_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// lawbox.toml already exists and --force was not given
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Enable the Groq section in the generated file
    pub with_secondary: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing LawboxAI client configuration");

    let base_path = &config.path;
    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = base_path.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() && !config.force {
        output.warning(&format!("{} already exists!", DEFAULT_CONFIG_FILE));
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = fs::write(&config_path, generate_config_toml(&config)) {
        output.error(&format!("Failed to create {}: {}", DEFAULT_CONFIG_FILE, e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", DEFAULT_CONFIG_FILE);

    let env_example_path = base_path.join(".env.example");
    match write_file(&env_example_path, &generate_env_example(&config), config.force) {
        Ok(true) => output.created("env", ".env.example"),
        Ok(false) => output.skipped(".env.example", "already exists"),
        Err(e) => {
            output.error(&format!("Failed to create .env.example: {}", e));
            return InitResult::Error(e.to_string());
        }
    }

    output.header("Next Steps");
    output.info("1. Set up environment variables:");
    output.command("cp .env.example .env");
    output.info("2. Check the resolved configuration:");
    output.command("lawbox-registry config --validate");

    InitResult::Success
}

/// Write `content` unless `path` exists and `force` is off. Returns whether
/// the file was written.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_config_toml(config: &InitConfig) -> String {
    format!(
        r#"# LawboxAI client registry configuration
# Generated by: lawbox-registry init
#
# Environment variables named by the *_env keys are read at startup;
# a .env file in the working directory is loaded first.

# =============================================================================
# Primary chat model (Ollama)
# =============================================================================
[primary]
base_url_env = "OLLAMA_SERVER"
model = "llama3.2:latest"
temperature = 0.8

# =============================================================================
# Secondary chat model (Groq, requires the `groq` feature)
# =============================================================================
[secondary]
enabled = {enabled}
model = "llama-3.3-70b-versatile"
temperature = 0.0
api_key_env = "GROQ_API_KEY"
api_base = "https://api.groq.com/openai/v1"

# =============================================================================
# Vector database (Qdrant, gRPC port)
# =============================================================================
[vector_db]
host = "lawboxai_qdrant"
port = 6334
"#,
        enabled = config.with_secondary
    )
}

fn generate_env_example(config: &InitConfig) -> String {
    let mut content = String::from(
        "# Ollama server address for the primary chat model\nOLLAMA_SERVER=http://localhost:11434\n",
    );
    if config.with_secondary {
        content.push_str("\n# Groq API key for the secondary chat model\nGROQ_API_KEY=\n");
    }
    content.push_str("\n# Log filter\nRUST_LOG=info\n");
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::RegistryConfig;
    use tempfile::TempDir;

    fn init_config(temp_dir: &TempDir, force: bool, with_secondary: bool) -> InitConfig {
        InitConfig {
            path: temp_dir.path().to_path_buf(),
            force,
            with_secondary,
        }
    }

    #[test]
    fn test_generated_toml_parses_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let content = generate_config_toml(&init_config(&temp_dir, false, true));

        let parsed = RegistryConfig::parse(&content).unwrap();

        assert_eq!(parsed.primary.model, "llama3.2:latest");
        assert_eq!(parsed.primary.temperature, 0.8);
        assert!(parsed.secondary.enabled);
        assert_eq!(parsed.secondary.temperature, 0.0);
        assert_eq!(parsed.vector_db.host, "lawboxai_qdrant");
        assert_eq!(parsed.vector_db.port, 6334);
    }

    #[test]
    fn test_env_example_mentions_groq_only_when_enabled() {
        let temp_dir = TempDir::new().unwrap();

        let without = generate_env_example(&init_config(&temp_dir, false, false));
        assert!(without.contains("OLLAMA_SERVER="));
        assert!(!without.contains("GROQ_API_KEY"));

        let with = generate_env_example(&init_config(&temp_dir, false, true));
        assert!(with.contains("GROQ_API_KEY="));
    }

    #[test]
    fn test_run_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let output = Output::no_color();

        let result = run(init_config(&temp_dir, false, false), &output);

        assert!(matches!(result, InitResult::Success));
        assert!(temp_dir.path().join("lawbox.toml").exists());
        assert!(temp_dir.path().join(".env.example").exists());
    }

    #[test]
    fn test_existing_env_example_is_kept_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let output = Output::no_color();
        let env_path = temp_dir.path().join(".env.example");
        fs::write(&env_path, "OLLAMA_SERVER=http://mine:11434\n").unwrap();

        let result = run(init_config(&temp_dir, false, false), &output);

        assert!(matches!(result, InitResult::Success));
        assert!(temp_dir.path().join("lawbox.toml").exists());
        assert_eq!(
            fs::read_to_string(&env_path).unwrap(),
            "OLLAMA_SERVER=http://mine:11434\n"
        );
    }

    #[test]
    fn test_write_file_reports_skip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");

        assert!(write_file(&path, "first", false).unwrap());
        assert!(!write_file(&path, "second", false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        assert!(write_file(&path, "third", true).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "third");
    }

    #[test]
    fn test_run_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let output = Output::no_color();
        fs::write(temp_dir.path().join("lawbox.toml"), "# keep me\n").unwrap();

        let result = run(init_config(&temp_dir, false, false), &output);
        assert!(matches!(result, InitResult::AlreadyExists));
        let kept = fs::read_to_string(temp_dir.path().join("lawbox.toml")).unwrap();
        assert_eq!(kept, "# keep me\n");

        let result = run(init_config(&temp_dir, true, false), &output);
        assert!(matches!(result, InitResult::Success));
        let replaced = fs::read_to_string(temp_dir.path().join("lawbox.toml")).unwrap();
        assert!(replaced.contains("[primary]"));
    }
}
