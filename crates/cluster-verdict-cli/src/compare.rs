//! The `compare` and `info` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};

use cluster_verdict::{
    find_label, load_from_file, Comparator, LocalComparator, RemoteComparator, SizeClass,
    DEFAULT_ENDPOINT, DEFAULT_MODEL, FULL_FRAME_MIN_PX,
};

use crate::config::{remote_config, resolve_api_key, API_KEY_ENV};

/// Which comparator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Hosted vision model.
    Remote,
    /// Local pixel diff.
    Local,
}

/// Inputs of a single comparison.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub actual: PathBuf,
    pub reference: PathBuf,
    pub backend: Backend,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

/// What a comparison produced, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub backend: Backend,
    pub size_class: SizeClass,
    pub verdict: String,
    /// Verdict label found in a remote answer.
    pub label: Option<&'static str>,
    /// HTTP status when the remote endpoint refused to judge.
    pub status: Option<u16>,
}

fn build_comparator(options: &CompareOptions) -> Result<Box<dyn Comparator>> {
    match options.backend {
        Backend::Local => Ok(Box::new(LocalComparator::new())),
        Backend::Remote => {
            let api_key = resolve_api_key(options.api_key.as_deref())
                .with_context(|| format!("No API key: pass --api-key or set {API_KEY_ENV}"))?;
            let config = remote_config(
                api_key,
                options.endpoint.as_deref(),
                options.model.as_deref(),
            );
            Ok(Box::new(RemoteComparator::new(config)?))
        }
    }
}

/// Load both captures and run the selected comparator.
pub fn run_compare(options: &CompareOptions) -> Result<CompareReport> {
    let actual = load_from_file(&options.actual)
        .with_context(|| format!("Failed to load actual image: {}", options.actual.display()))?;
    let reference = load_from_file(&options.reference).with_context(|| {
        format!(
            "Failed to load reference image: {}",
            options.reference.display()
        )
    })?;

    let comparator = build_comparator(options)?;
    let size_class = SizeClass::classify(&actual, &reference);
    tracing::info!(
        "Comparing {} against {} ({} backend)",
        options.actual.display(),
        options.reference.display(),
        comparator.name()
    );

    let verdict = comparator.compare(&actual, &reference)?;
    let label = match options.backend {
        Backend::Remote if verdict.is_judged() => find_label(&verdict.render(), size_class),
        _ => None,
    };

    Ok(CompareReport {
        backend: options.backend,
        size_class,
        status: verdict.status(),
        verdict: verdict.into_text(),
        label,
    })
}

/// Defaults and label sets, as printed by `info`.
pub fn info() -> Value {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoint": DEFAULT_ENDPOINT,
        "model": DEFAULT_MODEL,
        "api_key_env": API_KEY_ENV,
        "full_frame_min_px": FULL_FRAME_MIN_PX,
        "size_check": "actual.width >= min && reference.height >= min",
        "labels": {
            "full_frame": SizeClass::FullFrame.labels(),
            "enlarged_icon": SizeClass::EnlargedIcon.labels(),
        },
    })
}
