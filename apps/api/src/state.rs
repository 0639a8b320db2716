use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::analyzer::GapAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. Immutable after startup; every interaction works only with
/// request-scoped values on top of it.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    /// Pluggable analyzer seam. Production: `LambdaAnalyzer`; tests stub it.
    pub analyzer: Arc<dyn GapAnalyzer>,
    pub config: Config,
}
