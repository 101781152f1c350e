use crate::validator::ValidationReport;

/// Errors from the transform pipeline.
///
/// Validation drops bad rows silently (reported via [`ValidationReport`]);
/// only a fully-rejected input is an error, because an empty record set
/// must never reach storage or alerting as if it were valid.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("validation rejected all {input_rows} input rows: {report}")]
    AllRowsRejected {
        input_rows: usize,
        report: ValidationReport,
    },

    #[error("input record set is empty")]
    EmptyInput,
}
