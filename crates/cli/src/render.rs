//! Result rendering for stdout.

use std::fmt::Write;

use anyhow::Result;
use diagnoser_core::{codec, DiagnosisResult, OutputFormat};
use diagnoser_rules::RuleRegistry;

/// Render `result` in the requested format.
pub fn render(result: &DiagnosisResult, format: OutputFormat) -> Result<String> {
    match format.codec() {
        Some(codec_format) => Ok(codec::encode(result, codec_format)?),
        None => Ok(render_text(result)),
    }
}

/// One block per hypothesis: header, issue, evidence bullets, suggestion.
pub fn render_text(result: &DiagnosisResult) -> String {
    let mut out = String::new();
    if result.is_empty() {
        let _ = writeln!(out, "No failure hypotheses ({} engine).", result.engine);
        return out;
    }

    for (i, h) in result.hypotheses.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "#{} [{:.2}] {}: {}",
            h.rank, h.confidence, h.component, h.issue
        );
        for line in &h.evidence {
            let _ = writeln!(out, "  - {}", line);
        }
        if !h.suggestion.is_empty() {
            let _ = writeln!(out, "  Suggestion: {}", h.suggestion);
        }
    }
    out
}

/// `id  component` per registered rule, in registration order.
pub fn render_rules(registry: &RuleRegistry) -> String {
    let width = registry.ids().iter().map(|id| id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for rule in registry.rules() {
        let _ = writeln!(out, "{:<width$}  {}", rule.id(), rule.component(), width = width);
    }
    out
}
