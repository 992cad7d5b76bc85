//! Pure Google Forms REST API client.
//!
//! A minimal client for the Forms API. Supports listing the responses
//! submitted to a form, following pagination when present.
//!
//! # Example
//!
//! ```rust,ignore
//! use forms_client::FormsClient;
//!
//! let client = FormsClient::new(access_token);
//! let responses = client.list_responses("1Eeiyjyh2...").await?;
//! for r in &responses {
//!     println!("{:?}", r.respondent_email);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{FormsError, Result};
pub use types::{Answer, FormResponse, ListResponsesPayload};

const BASE_URL: &str = "https://forms.googleapis.com/v1";

pub struct FormsClient {
    client: reqwest::Client,
    access_token: String,
}

impl FormsClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
        }
    }

    /// Fetch one page of responses for a form.
    pub async fn list_responses_page(
        &self,
        form_id: &str,
        page_token: Option<&str>,
    ) -> Result<ListResponsesPayload> {
        let mut url = format!("{}/forms/{}/responses", BASE_URL, form_id);
        if let Some(token) = page_token {
            url = format!("{}?pageToken={}", url, token);
        }

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FormsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: ListResponsesPayload = resp
            .json()
            .await
            .map_err(|e| FormsError::Parse(e.to_string()))?;
        Ok(payload)
    }

    /// Fetch all responses for a form, following `nextPageToken`.
    pub async fn list_responses(&self, form_id: &str) -> Result<Vec<FormResponse>> {
        let mut all = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .list_responses_page(form_id, page_token.as_deref())
                .await?;
            if let Some(responses) = page.responses {
                all.extend(responses);
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(form_id, count = all.len(), "Fetched form responses");
        Ok(all)
    }
}
