use thiserror::Error;

/// Failure of a report function. Callers that want the original
/// "never raise" behavior log the error and fall back to an empty
/// payload; callers that care can tell an empty result apart from a
/// failed one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("unparseable date '{value}' (expected {format})")]
    BadDate {
        value: String,
        format: &'static str,
    },

    #[error("month {0} is out of range 1..=12")]
    MonthOutOfRange(u32),

    #[error("report window falls outside the representable calendar range")]
    WindowOverflow,
}
