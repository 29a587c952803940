//! Rule evaluation and ranking.
//!
//! The engine fans a snapshot out to every registered rule, collects the
//! hypotheses of the rules that matched, then orders them with a fixed
//! three-level comparator and assigns ranks. Invocation order never leaks
//! into the output, so rules can run sequentially or on a rayon pool.
//!
//! Evaluation cannot fail: an empty snapshot yields an empty result, and a
//! rule that panics is skipped (see [`guard`]).

mod guard;
mod ordering;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, warn};

use diagnoser_core::config::EngineConfig;
use diagnoser_core::{DiagnosisResult, EngineKind, EvaluationMode, Hypothesis, Snapshot};

use crate::registry::RuleRegistry;
use guard::run_rule;
use ordering::sort_and_rank;

// ── Engine ──────────────────────────────────────────────────────────

/// Rule-based diagnosis engine over a fixed [`RuleRegistry`].
pub struct DiagnosisEngine {
    registry: RuleRegistry,
    mode: EvaluationMode,
    /// Dedicated pool when a thread count was configured; otherwise rayon's global pool.
    pool: Option<rayon::ThreadPool>,
}

impl DiagnosisEngine {
    /// Sequential engine over `registry`.
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            mode: EvaluationMode::Sequential,
            pool: None,
        }
    }

    /// Engine over `registry` honoring the configured mode and thread count.
    pub fn with_config(registry: RuleRegistry, config: &EngineConfig) -> Self {
        let pool = match (config.mode, config.threads) {
            (EvaluationMode::Parallel, n) if n > 0 => {
                match rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("diagnoser-rule-{}", i))
                    .build()
                {
                    Ok(pool) => Some(pool),
                    Err(e) => {
                        warn!(threads = n, error = %e, "failed to build rule pool, using global pool");
                        None
                    }
                }
            }
            _ => None,
        };
        Self {
            registry,
            mode: config.mode,
            pool,
        }
    }

    /// Sequential engine over the built-in rules.
    pub fn builtin() -> Self {
        Self::new(RuleRegistry::builtin())
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Evaluate every rule against `snapshot` and return the ranked result.
    ///
    /// Re-running on an unchanged snapshot reproduces the same
    /// (component, issue, rank) sequence; only `generated_at` differs.
    pub fn evaluate(&self, snapshot: &Snapshot) -> DiagnosisResult {
        let mut hypotheses = match self.mode {
            EvaluationMode::Sequential => self.fan_out_sequential(snapshot),
            EvaluationMode::Parallel => match &self.pool {
                Some(pool) => pool.install(|| self.fan_out_parallel(snapshot)),
                None => self.fan_out_parallel(snapshot),
            },
        };

        sort_and_rank(&mut hypotheses);

        info!(
            rules = self.registry.len(),
            hypotheses = hypotheses.len(),
            mode = %self.mode,
            top = hypotheses.first().map(|h| h.component.as_str()).unwrap_or("-"),
            "diagnosis complete"
        );

        DiagnosisResult {
            hypotheses,
            generated_at: Utc::now(),
            engine: EngineKind::RuleBased,
        }
    }

    fn fan_out_sequential(&self, snapshot: &Snapshot) -> Vec<Hypothesis> {
        self.registry
            .rules()
            .iter()
            .filter_map(|rule| run_rule(rule.as_ref(), snapshot))
            .collect()
    }

    fn fan_out_parallel(&self, snapshot: &Snapshot) -> Vec<Hypothesis> {
        self.registry
            .rules()
            .par_iter()
            .filter_map(|rule| run_rule(rule.as_ref(), snapshot))
            .collect()
    }
}

impl Default for DiagnosisEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Evaluate the built-in rules sequentially.
pub fn analyze(snapshot: &Snapshot) -> DiagnosisResult {
    DiagnosisEngine::builtin().evaluate(snapshot)
}

// ── Tests ───────────────────────────────────────────────────────────
