use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Aggregation itself accepts zero records; only consumers that need
    /// something to show raise this.
    #[error("No order records were loaded; there is nothing to report on.")]
    EmptyInput,
}
