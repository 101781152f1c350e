use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How urgent a finding is. Conditions assign a fixed severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// A single positive finding from a condition check.
///
/// Conditions only emit findings that actually triggered, so `triggered`
/// is true for every result that reaches the dispatcher; the field is kept
/// so downstream consumers never have to infer it from context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertResult {
    pub condition_name: String,
    pub triggered: bool,
    pub message: String,
    pub severity: Severity,
    /// Observed value that tripped the threshold, when row-scoped.
    pub value: Option<f64>,
    /// The configured threshold, when applicable.
    pub threshold: Option<f64>,
    /// Forecast day the finding refers to, when row-scoped.
    pub date: Option<NaiveDate>,
}

/// Delivery result for one notifier within a single dispatch run.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub notifier: String,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}
