//! Wire envelopes shared with the upstream HSK API
//!
//! Field names mirror the upstream JSON contract exactly; these types are
//! deserialized from relayed responses and must round-trip without loss.

use serde::{Deserialize, Serialize};

/// Example usage attached to every vocabulary item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub hanzi: String,
    pub pinyin: String,
    pub english: String,
    pub indonesian: String,
}

/// A single vocabulary card
///
/// `id` is unique and stable across pages of the same level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: u64,
    pub hanzi: String,
    pub pinyin: String,
    pub english_translation: String,
    pub indonesian_translation: String,
    pub example: ExampleSentence,
}

/// One page of a level's word corpus
///
/// `total` is the corpus size at this level, not the page size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPage {
    pub list: Vec<VocabularyItem>,
    pub total: u64,
}

/// Generic upstream envelope: `{ data: ..., success: bool }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    pub success: bool,
}

pub type WordsResponse = ApiEnvelope<WordPage>;

/// Generated dialogue: parallel hanzi/pinyin/english lines
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueData {
    pub dialogue: Vec<String>,
    pub pinyin: Vec<String>,
    pub english: Vec<String>,
    pub error: Option<String>,
}

pub type DialogueResponse = ApiEnvelope<DialogueData>;

/// Per-word detail line in a graded text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedTextLine {
    pub word: String,
    pub pinyin: String,
    pub english: String,
}

/// Generated graded passage with per-word breakdown
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedTextData {
    pub title: String,
    pub line_details: Vec<GradedTextLine>,
    pub english: Vec<String>,
    pub error: Option<String>,
}

pub type GradedTextResponse = ApiEnvelope<GradedTextData>;
