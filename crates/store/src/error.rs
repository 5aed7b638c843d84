use jigtrack_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level rejection (validation, conflict, not-found).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
