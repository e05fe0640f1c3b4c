//! Integration tests for the client registry
//!
//! These cover the configuration wiring of the three handles. No test here
//! needs a running Ollama or Qdrant server.

use lawbox::{AppError, ClientRegistry, RegistryConfig};
use rstest::rstest;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn primary_only(endpoint: Option<&str>) -> RegistryConfig {
    let mut config = RegistryConfig::default();
    config.secondary.enabled = false;
    config.primary.base_url = endpoint.map(str::to_string);
    config
}

#[test]
fn test_end_to_end_from_environment() {
    std::env::set_var("OLLAMA_SERVER", "http://localhost:11434");
    std::env::set_var("GROQ_API_KEY", "gsk-integration-test");

    let registry = ClientRegistry::from_env().expect("registry should build");

    let primary = registry.primary();
    assert_eq!(primary.base_url(), "http://localhost:11434");
    assert_eq!(primary.model_name(), "llama3.2:latest");
    assert_eq!(primary.temperature(), 0.8);

    assert_eq!(registry.vector_db().host(), "lawboxai_qdrant");
    assert_eq!(registry.secondary().is_some(), cfg!(feature = "groq"));
}

#[rstest]
#[case("http://localhost:11434")]
#[case("http://ollama.internal:11434")]
#[case("https://llm.lawboxai.com/")]
fn test_primary_endpoint_matches_variable(#[case] endpoint: &str) {
    let mut config = primary_only(None);
    config.resolve(lookup(&[("OLLAMA_SERVER", endpoint)]));
    config.validate().expect("config should be valid");

    let registry = ClientRegistry::build(&config).unwrap();

    assert_eq!(registry.primary().base_url(), endpoint);
}

#[rstest]
#[case("localhost:11434")]
#[case("ollama:11434")]
#[case("lawboxai_ollama:11434")]
fn test_host_port_variable_builds_and_validates(#[case] endpoint: &str) {
    let mut config = primary_only(None);
    config.resolve(lookup(&[("OLLAMA_SERVER", endpoint)]));
    config.validate().expect("host:port is a usable endpoint");

    let registry = ClientRegistry::build(&config).unwrap();

    assert_eq!(registry.primary().base_url(), endpoint);
}

#[test]
fn test_blank_explicit_endpoint_still_builds() {
    let registry = ClientRegistry::build(&primary_only(Some("   "))).unwrap();

    assert_eq!(registry.primary().base_url(), "   ");
}

#[test]
fn test_blank_explicit_endpoint_falls_back_to_variable() {
    let mut config = primary_only(Some("   "));
    config.resolve(lookup(&[("OLLAMA_SERVER", "ollama:11434")]));

    let registry = ClientRegistry::build(&config).unwrap();

    assert_eq!(registry.primary().base_url(), "ollama:11434");
}

#[test]
fn test_absent_variable_still_builds_with_empty_endpoint() {
    let mut config = primary_only(None);
    config.resolve(lookup(&[]));

    let registry = ClientRegistry::build(&config).unwrap();

    assert_eq!(registry.primary().base_url(), "");
    assert_eq!(registry.primary().model_name(), "llama3.2:latest");
}

#[test]
fn test_absent_variable_is_reported_by_loading() {
    let err = RegistryConfig::from_lookup(lookup(&[])).unwrap_err();

    assert!(err
        .issues()
        .iter()
        .any(|issue| issue.field() == "primary.base_url"));
    assert!(err.to_string().contains("OLLAMA_SERVER"));
}

#[rstest]
#[case(&[])]
#[case(&[("OLLAMA_SERVER", "http://localhost:11434")])]
#[case(&[("OLLAMA_SERVER", "http://elsewhere:1"), ("OLLAMA_MODEL", "mistral")])]
fn test_primary_model_and_temperature_are_fixed(#[case] vars: &[(&str, &str)]) {
    let mut config = primary_only(None);
    config.resolve(lookup(vars));

    let registry = ClientRegistry::build(&config).unwrap();

    assert_eq!(registry.primary().model_name(), "llama3.2:latest");
    assert_eq!(registry.primary().temperature(), 0.8);
}

#[test]
fn test_vector_db_host_is_never_read_from_environment() {
    let mut config = primary_only(Some("http://localhost:11434"));
    config.resolve(lookup(&[
        ("QDRANT_HOST", "other"),
        ("QDRANT_URL", "http://other:6334"),
    ]));

    let registry = ClientRegistry::build(&config).unwrap();

    assert_eq!(registry.vector_db().host(), "lawboxai_qdrant");
    assert_eq!(registry.vector_db().url(), "http://lawboxai_qdrant:6334");
}

#[cfg(feature = "groq")]
#[test]
fn test_secondary_model_and_temperature_are_fixed() {
    let config = RegistryConfig::from_lookup(lookup(&[
        ("OLLAMA_SERVER", "http://localhost:11434"),
        ("GROQ_API_KEY", "gsk-test"),
    ]))
    .unwrap();

    let registry = ClientRegistry::build(&config).unwrap();
    let secondary = registry.secondary().expect("secondary enabled by default");

    assert_eq!(secondary.model_name(), "llama-3.3-70b-versatile");
    assert_eq!(secondary.temperature(), 0.0);
}

#[cfg(not(feature = "groq"))]
#[test]
fn test_secondary_is_absent_without_feature() {
    let config =
        RegistryConfig::from_lookup(lookup(&[("OLLAMA_SERVER", "http://localhost:11434")]))
            .unwrap();

    let registry = ClientRegistry::build(&config).unwrap();

    assert!(registry.secondary().is_none());
}

#[test]
fn test_registry_installs_once_per_process() {
    assert!(ClientRegistry::global().is_none());

    let first = ClientRegistry::build(&primary_only(Some("http://first:11434"))).unwrap();
    let second = ClientRegistry::build(&primary_only(Some("http://second:11434"))).unwrap();

    let installed = first.install().unwrap();
    assert_eq!(installed.primary().base_url(), "http://first:11434");

    assert!(matches!(second.install(), Err(AppError::Internal(_))));

    let global = ClientRegistry::global().expect("registry installed");
    assert_eq!(global.primary().base_url(), "http://first:11434");
}
