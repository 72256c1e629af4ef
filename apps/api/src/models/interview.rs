use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded resume and its question/answer transcript.
///
/// Serialized field names match the persisted file format: `resume`, `role`,
/// `questions`, `answers`. `session_id` and `created_at` were added later and
/// default when absent. A missing id loads as nil until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    #[serde(default = "Uuid::nil")]
    pub session_id: Uuid,
    #[serde(rename = "resume")]
    pub resume_text: String,
    pub role: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl InterviewRecord {
    /// A fresh record holding the first generated question and no answers.
    pub fn new(resume_text: String, role: String, first_question: String) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            resume_text,
            role,
            questions: vec![first_question],
            answers: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    /// Gives a record loaded without an id its own one. Returns whether it did.
    pub fn ensure_session_id(&mut self) -> bool {
        if !self.session_id.is_nil() {
            return false;
        }
        self.session_id = Uuid::new_v4();
        true
    }

    pub fn latest_question(&self) -> Option<&str> {
        self.questions.last().map(String::as_str)
    }
}
