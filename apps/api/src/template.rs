//! One-shot read of the report template object from S3.

use aws_sdk_s3::error::DisplayErrorContext;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to fetch template object: {0}")]
    Fetch(String),
}

/// Fetches the base report template from the assets bucket. A failure here
/// aborts report generation for the current interaction; it never aborts the
/// interaction's analysis result.
pub async fn fetch_template(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<Vec<u8>, TemplateError> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| TemplateError::Fetch(DisplayErrorContext(&e).to_string()))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| TemplateError::Fetch(e.to_string()))?
        .into_bytes();

    info!(
        "Fetched report template s3://{}/{} ({} bytes)",
        bucket,
        key,
        data.len()
    );
    Ok(data.to_vec())
}
