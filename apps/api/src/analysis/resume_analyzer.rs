//! Resume Analyzer: naive keyword bucketing of resume sentences.
//!
//! Each sentence is lower-cased and tested for substring membership against
//! four fixed marker sets. Classification is not exclusive: one sentence can
//! land in several buckets. Bucket order follows the source text, no dedup.

use std::sync::Arc;

use crate::analysis::segmenter::SentenceSplitter;

const EXPERIENCE_MARKERS: &[&str] = &["experience"];
const LANGUAGE_MARKERS: &[&str] = &["python", "javascript", "java", "c++", "typescript"];
const PROJECT_MARKERS: &[&str] = &["project"];
const ACHIEVEMENT_MARKERS: &[&str] = &["achievement", "certification"];

/// Sentences grouped by the signal they carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeBuckets {
    pub experience: Vec<String>,
    pub languages: Vec<String>,
    pub projects: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Clone)]
pub struct ResumeAnalyzer {
    splitter: Arc<dyn SentenceSplitter>,
}

impl ResumeAnalyzer {
    pub fn new(splitter: Arc<dyn SentenceSplitter>) -> Self {
        Self { splitter }
    }

    pub fn extract(&self, resume_text: &str) -> ResumeBuckets {
        let mut buckets = ResumeBuckets::default();

        for sentence in self.splitter.split(resume_text) {
            let lowered = sentence.to_lowercase();
            if contains_any(&lowered, EXPERIENCE_MARKERS) {
                buckets.experience.push(sentence.to_string());
            }
            if contains_any(&lowered, LANGUAGE_MARKERS) {
                buckets.languages.push(sentence.to_string());
            }
            if contains_any(&lowered, PROJECT_MARKERS) {
                buckets.projects.push(sentence.to_string());
            }
            if contains_any(&lowered, ACHIEVEMENT_MARKERS) {
                buckets.achievements.push(sentence.to_string());
            }
        }

        buckets
    }
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| haystack.contains(m))
}
