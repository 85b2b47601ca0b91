use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("report period ends ({end}) before it starts ({start})")]
    InvalidPeriod {
        start: jiff::civil::Date,
        end: jiff::civil::Date,
    },

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("date arithmetic failed: {0}")]
    Time(#[from] jiff::Error),
}
