use unicode_segmentation::UnicodeSegmentation;

/// Splits free text into sentences, in order of appearance.
pub trait SentenceSplitter: Send + Sync {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Unicode (UAX #29) sentence boundaries. Surrounding whitespace is trimmed
/// and blank segments are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
