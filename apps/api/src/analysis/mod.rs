// Resume analysis: PDF text extraction, sentence segmentation and keyword bucketing.
// PDF decoding and segmentation are collaborators behind traits so tests can swap them.

pub mod pdf;
pub mod resume_analyzer;
pub mod segmenter;
