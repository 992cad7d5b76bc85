use serde::Deserialize;
use std::collections::HashMap;

/// Top-level payload of `forms.responses.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponsesPayload {
    pub responses: Option<Vec<FormResponse>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A single submission to the form.
#[derive(Debug, Clone, Deserialize)]
pub struct FormResponse {
    #[serde(rename = "responseId")]
    pub response_id: Option<String>,
    #[serde(rename = "createTime")]
    pub create_time: Option<String>,
    #[serde(rename = "respondentEmail")]
    pub respondent_email: Option<String>,
    /// Keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, Answer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    #[serde(rename = "questionId")]
    pub question_id: Option<String>,
    #[serde(rename = "textAnswers")]
    pub text_answers: Option<TextAnswers>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextAnswers {
    #[serde(default)]
    pub answers: Vec<TextAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextAnswer {
    pub value: Option<String>,
}

impl FormResponse {
    /// First text answer for a question id, if any.
    pub fn answer_text(&self, question_id: &str) -> Option<&str> {
        self.answers
            .get(question_id)?
            .text_answers
            .as_ref()?
            .answers
            .first()?
            .value
            .as_deref()
    }
}
