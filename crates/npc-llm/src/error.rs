use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} not set")]
    MissingKey(&'static str),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("no JSON object found in response")]
    NoJson,

    #[error("malformed blueprint: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type LlmResult<T> = Result<T, LlmError>;
