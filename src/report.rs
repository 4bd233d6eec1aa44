//! Strip Reporting
//!
//! Diagnostic output for the stripping session: one log line per processed
//! (shader, pass) unit, plus session-wide running totals. Reporting is a
//! side channel and never feeds back into strip decisions.

use serde::{Deserialize, Serialize};

use crate::variant::{PassType, ShaderStage};

/// Verbosity of per-pass strip logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantLogLevel {
    /// No strip logging.
    #[default]
    Disabled,
    /// Log only shaders belonging to this pipeline's own family.
    PipelineShadersOnly,
    /// Log every processed shader.
    AllShaders,
}

impl VariantLogLevel {
    /// Whether a shader with `shader_name` should be logged at this level.
    /// `pipeline_family` is matched by substring containment, case-sensitive.
    #[must_use]
    pub fn wants(self, shader_name: &str, pipeline_family: &str) -> bool {
        match self {
            Self::Disabled => false,
            Self::PipelineShadersOnly => shader_name.contains(pipeline_family),
            Self::AllShaders => true,
        }
    }
}

/// Session-scoped monotonic counters.
///
/// Updated once per processed non-empty variant list, across all shader
/// compile callbacks of one build session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Variants examined before filtering.
    pub seen: u64,
    /// Variants retained after filtering.
    pub kept: u64,
}

impl RunStats {
    /// Variants removed so far.
    #[inline]
    #[must_use]
    pub fn stripped(&self) -> u64 {
        self.seen - self.kept
    }

    /// Percentage of examined variants that survived, `100.0` when nothing
    /// has been examined yet.
    #[must_use]
    pub fn kept_percentage(&self) -> f64 {
        if self.seen == 0 {
            100.0
        } else {
            self.kept as f64 / self.seen as f64 * 100.0
        }
    }
}

/// Outcome of one [`VariantFilter::process`](crate::filter::VariantFilter::process)
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Variants in the list before filtering.
    pub before: usize,
    /// Variants remaining after filtering.
    pub after: usize,
    /// Session totals after this invocation.
    pub totals: RunStats,
}

impl PassReport {
    /// Percentage of this list's variants that survived, `100.0` for an
    /// empty list.
    #[must_use]
    pub fn kept_percentage(&self) -> f64 {
        if self.before == 0 {
            100.0
        } else {
            self.after as f64 / self.before as f64 * 100.0
        }
    }
}

/// Emit the per-pass strip line.
///
/// Format mirrors what pipeline developers grep for in build logs:
/// remaining/total for this pass, then the running session totals.
pub(crate) fn log_pass(
    shader_name: &str,
    pass_name: &str,
    pass_type: PassType,
    stage: ShaderStage,
    report: &PassReport,
) {
    let pass_label = if pass_name.is_empty() {
        format!("{pass_type:?}")
    } else {
        pass_name.to_string()
    };
    log::info!(
        "STRIPPING: {} ({} pass) ({:?}) - remaining variants {}/{} = {:.1}% - total {}/{} = {:.1}%",
        shader_name,
        pass_label,
        stage,
        report.after,
        report.before,
        report.kept_percentage(),
        report.totals.kept,
        report.totals.seen,
        report.totals.kept_percentage(),
    );
}
