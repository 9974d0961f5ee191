//! Presentation of errors that no caller is waiting on

use tracing::error;

use crate::error::RestClientError;

/// Surface for errors raised by fire-and-forget requests.
///
/// A GUI plugs its modal error dialog in here; the client calls it exactly
/// once per failed eager request.
pub trait ErrorPresenter: Send + Sync {
    fn present(&self, error: &RestClientError);
}

/// Presenter that writes the error to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorPresenter;

impl ErrorPresenter for LogErrorPresenter {
    fn present(&self, err: &RestClientError) {
        match err.status() {
            Some(status) => error!(%status, error = %err, "backend request failed"),
            None => error!(error = %err, "backend request failed"),
        }
    }
}
