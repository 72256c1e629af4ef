//! Interview Session Orchestrator.
//!
//! Composes PDF extraction, resume analysis, question generation and the
//! flat-file store into the four interview operations. Calls may address a
//! session explicitly; without an id they act on the most recent upload.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::pdf::{PdfError, TextExtractor};
use crate::analysis::resume_analyzer::{ResumeAnalyzer, ResumeBuckets};
use crate::errors::AppError;
use crate::interview::question_generator::QuestionGenerator;
use crate::models::interview::InterviewRecord;
use crate::store::InterviewStore;

const UPLOAD_FAILED: &str = "Failed to process upload";
const SAVE_ANSWER_FAILED: &str = "Failed to save answer";
const NEXT_QUESTION_FAILED: &str = "Failed to retrieve next question";
const CLEAR_FAILED: &str = "Failed to clear database";

const NO_DATA_FOR_ANSWER: &str = "No data found in the database.";
const NO_DATA_FOR_QUESTION: &str = "No interview data found in the database.";

/// Returned to the caller when a new session starts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionQuestion {
    pub session_id: Uuid,
    pub question: String,
}

pub struct InterviewService {
    store: Arc<InterviewStore>,
    extractor: Arc<dyn TextExtractor>,
    analyzer: ResumeAnalyzer,
    generator: QuestionGenerator,
}

impl InterviewService {
    pub fn new(
        store: Arc<InterviewStore>,
        extractor: Arc<dyn TextExtractor>,
        analyzer: ResumeAnalyzer,
        generator: QuestionGenerator,
    ) -> Self {
        Self {
            store,
            extractor,
            analyzer,
            generator,
        }
    }

    /// Extracts text from an uploaded PDF and starts a session for `role`.
    pub async fn upload(&self, resume: Bytes, role: String) -> Result<SessionQuestion, AppError> {
        let extractor = self.extractor.clone();
        let resume_text = tokio::task::spawn_blocking(move || extractor.extract_text(&resume))
            .await
            .unwrap_or_else(|e| Err(PdfError::Aborted(e.to_string())))
            .map_err(|e| AppError::UnprocessableEntity(format!("{UPLOAD_FAILED}: {e}")))?;

        self.start_session(resume_text, role).await
    }

    /// Generates the first question for `resume_text` and persists a new record.
    /// Nothing is stored when generation fails.
    pub async fn start_session(
        &self,
        resume_text: String,
        role: String,
    ) -> Result<SessionQuestion, AppError> {
        let buckets = self.analyzer.extract(&resume_text);
        log_buckets(&buckets);
        let question = self
            .generator
            .generate(&buckets.experience, &buckets.languages, &buckets.projects, &role)
            .await
            .into_result()?;

        let record = InterviewRecord::new(resume_text, role, question.clone());
        let session_id = record.session_id;

        self.store
            .modify(|records| {
                records.push(record);
                Ok::<_, AppError>(())
            })
            .await
            .map_err(|e| e.context(UPLOAD_FAILED))?;

        info!("Started interview session {session_id}");
        Ok(SessionQuestion {
            session_id,
            question,
        })
    }

    /// Appends a question/answer pair to the session transcript.
    pub async fn submit_answer(
        &self,
        session_id: Option<Uuid>,
        question: String,
        answer: String,
    ) -> Result<Uuid, AppError> {
        self.store
            .modify(|records| {
                let record = select_record(records, session_id, NO_DATA_FOR_ANSWER)?;
                if record.latest_question() != Some(question.as_str()) {
                    warn!(
                        "Answer for session {} references a question that is not the latest one",
                        record.session_id
                    );
                }
                record.questions.push(question);
                record.answers.push(answer);
                info!(
                    "Saved answer {} for session {}",
                    record.answers.len(),
                    record.session_id
                );
                Ok::<_, AppError>(record.session_id)
            })
            .await
            .map_err(|e| e.context(SAVE_ANSWER_FAILED))
    }

    /// Re-analyzes the stored resume, generates another question and appends it.
    pub async fn next_question(
        &self,
        session_id: Option<Uuid>,
    ) -> Result<SessionQuestion, AppError> {
        let mut records = self
            .store
            .snapshot()
            .await
            .map_err(|e| AppError::from(e).context(NEXT_QUESTION_FAILED))?;
        let record = select_record(&mut records, session_id, NO_DATA_FOR_QUESTION)?;
        let session_id = record.session_id;

        // Achievements are not part of the question prompt
        let buckets = self.analyzer.extract(&record.resume_text);
        log_buckets(&buckets);
        let question = self
            .generator
            .generate(
                &buckets.experience,
                &buckets.languages,
                &buckets.projects,
                &record.role,
            )
            .await
            .into_result()?;

        let appended = question.clone();
        self.store
            .modify(|records| {
                let record = select_record(records, Some(session_id), NO_DATA_FOR_QUESTION)?;
                record.questions.push(appended);
                Ok::<_, AppError>(())
            })
            .await
            .map_err(|e| e.context(NEXT_QUESTION_FAILED))?;

        info!("Appended next question to session {session_id}");
        Ok(SessionQuestion {
            session_id,
            question,
        })
    }

    /// Drops every stored session.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.store
            .clear()
            .await
            .map_err(|e| AppError::from(e).context(CLEAR_FAILED))
    }
}

fn log_buckets(buckets: &ResumeBuckets) {
    debug!(
        "Resume buckets: experience={}, languages={}, projects={}, achievements={}",
        buckets.experience.len(),
        buckets.languages.len(),
        buckets.projects.len(),
        buckets.achievements.len()
    );
}

/// Picks the addressed session, or the most recent one when no id is given.
fn select_record<'a>(
    records: &'a mut [InterviewRecord],
    session_id: Option<Uuid>,
    empty_message: &str,
) -> Result<&'a mut InterviewRecord, AppError> {
    if records.is_empty() {
        return Err(AppError::NotFound(empty_message.to_string()));
    }
    match session_id {
        Some(id) => records
            .iter_mut()
            .find(|r| r.session_id == id)
            .ok_or_else(|| AppError::NotFound(format!("Interview session {id} not found"))),
        None => records
            .last_mut()
            .ok_or_else(|| AppError::NotFound(empty_message.to_string())),
    }
}
