use serde::Deserialize;

/// Response body returned by the messages endpoint on success.
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    pub id: Option<String>,
    pub message: Option<String>,
}
