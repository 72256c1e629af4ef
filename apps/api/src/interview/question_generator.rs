//! Question Generator: turns resume buckets and a target role into one
//! interview question via the completion client.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::prompts::{INTERVIEWER_SYSTEM, QUESTION_PROMPT_TEMPLATE};
use crate::llm_client::CompletionClient;

/// Result of one generation attempt. A failure is never a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionOutcome {
    Generated(String),
    Failed(String),
}

impl QuestionOutcome {
    /// Converts into the handler-facing result. Failures keep the
    /// "Error generating question: ..." wording clients already match on.
    pub fn into_result(self) -> Result<String, AppError> {
        match self {
            QuestionOutcome::Generated(question) => Ok(question),
            QuestionOutcome::Failed(reason) => Err(AppError::Llm(format!(
                "Error generating question: {reason}"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct QuestionGenerator {
    llm: Arc<dyn CompletionClient>,
}

impl QuestionGenerator {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    pub async fn generate(
        &self,
        experience: &[String],
        languages: &[String],
        projects: &[String],
        role: &str,
    ) -> QuestionOutcome {
        let prompt = build_question_prompt(experience, languages, projects, role);

        match self.llm.complete(INTERVIEWER_SYSTEM, &prompt).await {
            Ok(text) => {
                let question = text.trim();
                if question.is_empty() {
                    warn!("Completion for role '{role}' was blank");
                    return QuestionOutcome::Failed("empty response".to_string());
                }
                info!("Generated question for role '{role}'");
                QuestionOutcome::Generated(question.to_string())
            }
            Err(e) => {
                warn!("Question generation failed for role '{role}': {e}");
                QuestionOutcome::Failed(e.to_string())
            }
        }
    }
}

pub fn build_question_prompt(
    experience: &[String],
    languages: &[String],
    projects: &[String],
    role: &str,
) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{experience}", &experience.join(", "))
        .replace("{languages}", &languages.join(", "))
        .replace("{projects}", &projects.join(", "))
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedLlm;
    use super::*;
    use crate::llm_client::LlmError;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_embeds_joined_buckets_and_role() {
        let prompt = build_question_prompt(
            &strings(&["I have experience in Python.", "Experience at ACME."]),
            &strings(&["I have experience in Python."]),
            &strings(&["I built a project."]),
            "Backend Engineer",
        );
        assert_eq!(
            prompt,
            "Create a single interview question for a Backend Engineer based on the following details:\n\
             Experience: I have experience in Python., Experience at ACME.\n\
             Languages: I have experience in Python.\n\
             Projects: I built a project.\n\
             Ask one short, relevant question based on the details."
        );
    }

    #[test]
    fn test_prompt_with_empty_buckets() {
        let prompt = build_question_prompt(&[], &[], &[], "Designer");
        assert!(prompt.contains("for a Designer based"));
        assert!(prompt.contains("Experience: \n"));
        assert!(prompt.contains("Projects: \n"));
    }

    #[tokio::test]
    async fn test_generate_trims_reply_and_sends_system_instruction() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![Ok(
            "  Describe a Python project you led.\n".to_string(),
        )]));
        let generator = QuestionGenerator::new(llm.clone());

        let outcome = generator
            .generate(&[], &strings(&["Python."]), &[], "Backend Engineer")
            .await;

        assert_eq!(
            outcome,
            QuestionOutcome::Generated("Describe a Python project you led.".to_string())
        );
        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, INTERVIEWER_SYSTEM);
        assert!(calls[0].1.contains("Languages: Python."));
    }

    #[tokio::test]
    async fn test_generate_failure_is_tagged() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![Err(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        })]));
        let generator = QuestionGenerator::new(llm);

        let outcome = generator.generate(&[], &[], &[], "QA").await;

        assert_eq!(
            outcome,
            QuestionOutcome::Failed("API error (status 401): Incorrect API key provided".into())
        );
    }

    #[tokio::test]
    async fn test_blank_reply_is_a_failure() {
        let llm = Arc::new(ScriptedLlm::with_replies(vec![Ok("   ".to_string())]));
        let generator = QuestionGenerator::new(llm);

        let outcome = generator.generate(&[], &[], &[], "QA").await;
        assert!(matches!(outcome, QuestionOutcome::Failed(_)));
    }

    #[test]
    fn test_failed_outcome_maps_to_error_message() {
        let err = QuestionOutcome::Failed("timeout".into()).into_result().unwrap_err();
        assert_eq!(err.to_string(), "Error generating question: timeout");
    }
}
