use crate::error::DomainError;

/// Resolves named routes to paths.
pub trait UrlResolver: Send + Sync {
    /// Build the path of route `name` with its placeholders filled from `params`.
    fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, DomainError>;
}
