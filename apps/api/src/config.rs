use anyhow::{Context, Result};

/// S3 bucket holding static SkillBridge assets (report template).
pub const S3_BUCKET: &str = "skillbridge-assets";
/// Object key of the base report template inside [`S3_BUCKET`].
pub const TEMPLATE_PATH: &str = "templates/SkillBridge_Template.pdf";
/// Name of the Bedrock-backed analyzer Lambda.
pub const LAMBDA_FUNCTION: &str = "skillbridge-bedrock-analyzer";
/// AWS region all service clients are pinned to.
pub const REGION: &str = "us-east-1";

/// Application configuration, constructed once at startup and carried in
/// `AppState`. The AWS identifiers are fixed deployment constants; only the
/// listen port and log level are environment-driven.
#[derive(Debug, Clone)]
pub struct Config {
    pub s3_bucket: String,
    pub template_path: String,
    pub lambda_function: String,
    pub region: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            s3_bucket: S3_BUCKET.to_string(),
            template_path: TEMPLATE_PATH.to_string(),
            lambda_function: LAMBDA_FUNCTION.to_string(),
            region: REGION.to_string(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
