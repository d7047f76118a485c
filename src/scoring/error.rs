use thiserror::Error;

pub type ScoreResult<T> = std::result::Result<T, ScoreError>;

/// Failures that abort a scoring run. Every variant carries enough detail
/// for an operator to fix the upstream data and re-run; none of them is
/// recoverable within the run itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("class catalog is empty; at least one class is required")]
    EmptyVocabulary,

    #[error("unknown class `{label}`{}", format_record_id(.record_id))]
    UnknownClass {
        label: String,
        record_id: Option<String>,
    },

    #[error("record on line {line} has {found} field(s), expected at least {expected}")]
    MalformedRecord {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error(
        "identifier sequences of solution and prediction differ (only in solution: {}; only in prediction: {})",
        format_id_set(.only_in_solution),
        format_id_set(.only_in_prediction)
    )]
    IdentifierMismatch {
        only_in_solution: Vec<String>,
        only_in_prediction: Vec<String>,
    },

    #[error(
        "matrix shapes differ: prediction is {prediction_rows}x{prediction_columns}, solution is {solution_rows}x{solution_columns}"
    )]
    DimensionMismatch {
        prediction_rows: usize,
        prediction_columns: usize,
        solution_rows: usize,
        solution_columns: usize,
    },

    #[error("array lengths do not agree: {left} vs {right}")]
    ArrayLengthMismatch { left: usize, right: usize },
}

fn format_record_id(record_id: &Option<String>) -> String {
    match record_id {
        Some(id) => format!(" in record `{id}`"),
        None => String::new(),
    }
}

fn format_id_set(ids: &[String]) -> String {
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.join(", ")
    }
}
