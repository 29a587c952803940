use std::env;

use serde::{Deserialize, Serialize};

use crate::codec::Format;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Profiled lookup over an arbitrary key source: tries `{PROFILE}_{KEY}`
/// first, falls back to `{KEY}`.
struct Profiled<'a, F> {
    profile: &'a str,
    lookup: F,
}

impl<F> Profiled<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn opt(&self, key: &str) -> Option<String> {
        if !self.profile.is_empty() {
            let prefixed = format!("{}_{}", self.profile, key);
            if let Some(v) = (self.lookup)(&prefixed).filter(|s| !s.is_empty()) {
                return Some(v);
            }
        }
        (self.lookup)(key).filter(|s| !s.is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.opt(key).unwrap_or_else(|| default.to_string())
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        match self.opt(key).map(|v| v.to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            _ => default,
        }
    }

    fn usize(&self, key: &str, default: usize) -> usize {
        self.opt(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub engine: EngineConfig,
    pub output: OutputConfig,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DIAGNOSER_PROFILE`. When set (e.g. `STAGING`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_opt("DIAGNOSER_PROFILE").unwrap_or_default();
        Self::from_lookup(&profile, env_opt)
    }

    /// Build config for `profile` from any key source.
    pub fn from_lookup<F>(profile: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = profile.to_uppercase();
        let p = Profiled {
            profile: &profile,
            lookup,
        };
        Self {
            profile: profile.clone(),
            engine: EngineConfig::from_profiled(&p),
            output: OutputConfig::from_profiled(&p),
            log_filter: p.or("DIAGNOSER_LOG", "info"),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  engine:  mode={}, threads={}",
            self.engine.mode,
            self.engine.threads
        );
        tracing::info!("  output:  format={}", self.output.format);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup("", |_| None)
    }
}

// ── Engine ────────────────────────────────────────────────────

/// How the engine fans out across its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    #[default]
    Sequential,
    /// One task per rule on a rayon pool.
    Parallel,
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationMode::Sequential => write!(f, "sequential"),
            EvaluationMode::Parallel => write!(f, "parallel"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub mode: EvaluationMode,
    /// Worker threads for parallel mode; 0 lets rayon decide.
    pub threads: usize,
}

impl EngineConfig {
    fn from_profiled<F>(p: &Profiled<'_, F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = if p.bool("DIAGNOSER_PARALLEL", false) {
            EvaluationMode::Parallel
        } else {
            EvaluationMode::Sequential
        };
        Self {
            mode,
            threads: p.usize("DIAGNOSER_THREADS", 0),
        }
    }
}

// ── Output ────────────────────────────────────────────────────

/// How a front end renders a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Text,
}

impl OutputFormat {
    /// Structured codec format, or `None` for human-readable text.
    pub fn codec(self) -> Option<Format> {
        match self {
            OutputFormat::Json => Some(Format::Json),
            OutputFormat::Yaml => Some(Format::Yaml),
            OutputFormat::Text => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("unknown output format: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl OutputConfig {
    fn from_profiled<F>(p: &Profiled<'_, F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = p.or("DIAGNOSER_OUTPUT", "json");
        let format = raw.parse().unwrap_or_else(|e: String| {
            tracing::warn!(value = %raw, error = %e, "falling back to json output");
            OutputFormat::Json
        });
        Self { format }
    }
}
