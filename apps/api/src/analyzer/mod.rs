/// Remote Analyzer Client — the single point of entry for gap-analysis
/// inference in SkillBridge.
///
/// ARCHITECTURAL RULE: No other module may invoke the analyzer Lambda
/// directly. All inference calls MUST go through this module.
///
/// The Lambda fronts a Bedrock model and is treated as an opaque black box:
/// it receives `{resume_text, target_role}` and answers with an envelope
/// whose `body` field is a JSON-encoded string of recommendations.
use async_trait::async_trait;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invocation failed: {0}")]
    Invoke(String),

    #[error("remote function error: {0}")]
    Function(String),

    #[error("remote function returned no payload")]
    EmptyPayload,

    #[error("malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Structured gap-analysis result. Every key is optional; presence implies a
/// list of strings. Absent keys stay absent when serialized back to the
/// client so the raw result display mirrors what the model returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_skills: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_links: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    resume_text: &'a str,
    target_role: &'a str,
}

/// Response envelope produced by the Lambda: the actual result is a
/// JSON-encoded string under `body`.
#[derive(Debug, Deserialize)]
struct InvokeEnvelope {
    #[serde(default)]
    body: Option<String>,
}

/// The analyzer seam. Implement this to swap the inference backend without
/// touching the orchestrating handler.
///
/// Carried in `AppState` as `Arc<dyn GapAnalyzer>`.
#[async_trait]
pub trait GapAnalyzer: Send + Sync {
    /// Blocks the current interaction until the remote side answers or the
    /// call fails. A returned error is the explicit "no result" signal and
    /// the caller must not proceed to report generation.
    async fn analyze(&self, resume_text: &str, target_role: &str)
        -> Result<GapAnalysis, AnalyzerError>;
}

/// Production analyzer backed by a synchronous (RequestResponse) Lambda
/// invocation. No retries; a single failed call is terminal for the
/// interaction.
#[derive(Clone)]
pub struct LambdaAnalyzer {
    client: aws_sdk_lambda::Client,
    function_name: String,
}

impl LambdaAnalyzer {
    pub fn new(client: aws_sdk_lambda::Client, function_name: String) -> Self {
        Self {
            client,
            function_name,
        }
    }
}

#[async_trait]
impl GapAnalyzer for LambdaAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        target_role: &str,
    ) -> Result<GapAnalysis, AnalyzerError> {
        let request = AnalyzeRequest {
            resume_text,
            target_role,
        };
        let payload = serde_json::to_vec(&request)
            .map_err(|e| AnalyzerError::Invoke(format!("failed to encode request: {e}")))?;

        debug!(
            function = %self.function_name,
            payload_bytes = payload.len(),
            "Invoking analyzer Lambda"
        );

        let output = self
            .client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| AnalyzerError::Invoke(DisplayErrorContext(&e).to_string()))?;

        if let Some(function_error) = output.function_error() {
            return Err(AnalyzerError::Function(function_error.to_string()));
        }

        let payload = output.payload().ok_or(AnalyzerError::EmptyPayload)?;
        decode_invoke_payload(payload.as_ref())
    }
}

/// Decodes the invocation payload into a [`GapAnalysis`].
///
/// A payload that is not a valid envelope is an error; an envelope whose
/// inner `body` is absent or not itself valid JSON decodes to the empty
/// result (empty-but-valid is distinct from "no result").
pub fn decode_invoke_payload(bytes: &[u8]) -> Result<GapAnalysis, AnalyzerError> {
    let envelope: InvokeEnvelope = serde_json::from_slice(bytes)?;

    let Some(body) = envelope.body else {
        warn!("Analyzer response has no body field; treating as empty result");
        return Ok(GapAnalysis::default());
    };

    match serde_json::from_str(&body) {
        Ok(analysis) => Ok(analysis),
        Err(e) => {
            warn!("Analyzer response body is not valid JSON ({e}); treating as empty result");
            Ok(GapAnalysis::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_body() {
        let payload = serde_json::json!({
            "statusCode": 200,
            "body": "{\"missing_skills\":[\"AWS\",\"Terraform\"],\"certifications\":[\"SAA\"]}"
        });
        let analysis = decode_invoke_payload(payload.to_string().as_bytes()).unwrap();
        assert_eq!(
            analysis.missing_skills,
            Some(vec!["AWS".to_string(), "Terraform".to_string()])
        );
        assert_eq!(analysis.certifications, Some(vec!["SAA".to_string()]));
        assert_eq!(analysis.learning_links, None);
    }

    #[test]
    fn missing_body_decodes_to_empty_result() {
        let analysis = decode_invoke_payload(br#"{"statusCode": 200}"#).unwrap();
        assert_eq!(analysis, GapAnalysis::default());
    }

    #[test]
    fn malformed_body_decodes_to_empty_result() {
        let analysis =
            decode_invoke_payload(br#"{"body": "not json at all"}"#).unwrap();
        assert_eq!(analysis, GapAnalysis::default());
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        let err = decode_invoke_payload(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AnalyzerError::Envelope(_)));
    }

    #[test]
    fn unknown_body_keys_are_ignored() {
        let payload = serde_json::json!({
            "body": "{\"missing_skills\":[\"Go\"],\"confidence\":0.9}"
        });
        let analysis = decode_invoke_payload(payload.to_string().as_bytes()).unwrap();
        assert_eq!(analysis.missing_skills, Some(vec!["Go".to_string()]));
    }
}
