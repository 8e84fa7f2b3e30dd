// Domain errors for KPI collections and selection values
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KpiError {
    #[error("duplicate KPI id: {0}")]
    DuplicateId(String),

    #[error("duplicate KPI title: {0}")]
    DuplicateTitle(String),

    #[error("KPI {id} has {data} chart samples but {labels} chart labels")]
    ChartLengthMismatch {
        id: String,
        data: usize,
        labels: usize,
    },

    #[error("KPI {id} has invalid trend percentage {value}")]
    InvalidTrendPercentage { id: String, value: f64 },

    #[error("KPI {0} has a non-finite numeric value")]
    NonFiniteValue(String),
}

/// Raised when a filter, view mode, theme or KPI type name is unknown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
