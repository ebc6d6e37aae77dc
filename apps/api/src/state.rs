use crate::analyzer::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything inside is immutable after construction, so cloning
/// per request is cheap and thread-safe.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: ResumeAnalyzer,
}
