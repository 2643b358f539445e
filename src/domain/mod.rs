//! Domain types for the BuBu HSK data plane
//!
//! Split between validated scalar newtypes (`levels`) and the upstream
//! wire envelopes (`hsk`), following type-driven development principles.

pub mod hsk;
pub mod levels;

pub use hsk::{
    ApiEnvelope, DialogueData, DialogueResponse, ExampleSentence, GradedTextData, GradedTextLine,
    GradedTextResponse, VocabularyItem, WordPage, WordsResponse,
};
pub use levels::{Complexity, HskLevel, PageLimit, PageNumber};
