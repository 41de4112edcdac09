use tracing::span::Span;

pub trait LogError {
    /// Logs the error together with its chain of causes inside this span.
    fn log_error<E: Into<anyhow::Error>>(&self, error: E);
}

impl LogError for Span {
    fn log_error<E: Into<anyhow::Error>>(&self, error: E) {
        let error = error.into();
        self.in_scope(|| {
            tracing::error!("Error: {error:?}");
        });
    }
}
