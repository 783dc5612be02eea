//! Configuration loading and resolution.

use cluster_verdict::RemoteConfig;

/// Environment variable holding the model API key.
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

/// Resolve the API key: explicit flag first, then the environment.
///
/// Blank values count as missing on both sides.
pub fn resolve_api_key(explicit: Option<&str>) -> Option<String> {
    resolve_api_key_with(explicit, |name| std::env::var(name).ok())
}

/// Resolve the API key with a custom environment lookup.
pub fn resolve_api_key_with<F>(explicit: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()))
}

/// Build the remote settings, keeping defaults for anything not overridden.
pub fn remote_config(api_key: String, endpoint: Option<&str>, model: Option<&str>) -> RemoteConfig {
    let mut config = RemoteConfig::new(api_key);
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(model) = model {
        config = config.with_model(model);
    }
    config
}
