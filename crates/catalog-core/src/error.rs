use catalog_backends::BackendError;

/// A backend call made by the store failed; the store's state was left as it was.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed: {source}")]
pub struct StoreError {
    pub operation: &'static str,
    #[source]
    pub source: BackendError,
}

impl StoreError {
    pub(crate) fn new(operation: &'static str, source: BackendError) -> Self {
        Self { operation, source }
    }

    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}
