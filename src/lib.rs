/// This crate ranks trading cards by how similar their rules text is,
/// using TF-IDF vectors and cosine similarity.
pub mod config;
pub mod corpus;
pub mod error;
pub mod repository;
pub mod search;
pub mod utils;
pub mod vectorizer;

/// Card Similarity Index
/// The top-level struct of this crate. It builds the corpus from a card
/// repository, fits the vector model and answers queries by card name or by
/// free text.
///
/// Internally, it holds:
/// - The corpus (card names and normalized rules text, index aligned)
/// - The fitted vector model
/// - The default result count
///
/// Both parts are immutable after `build`; the index can be shared across
/// threads for concurrent queries.
pub use search::CardSimilarityIndex;

/// Query functions
/// Free functions composing the pipeline step by step:
/// - `build_corpus`: repository + exclusion filter -> corpus
/// - `fit_model`: corpus + stop words -> vector model
/// - `find_similar_by_text`: rank the corpus against free text
/// - `find_similar_by_card_name`: rank the corpus against a card's own text
pub use search::{build_corpus, find_similar_by_card_name, find_similar_by_text, fit_model};

/// Vector Model
/// TF-IDF vocabulary, IDF weights and one unit-length sparse vector per corpus
/// document.
///
/// `VectorModel<N, A, E>` has the following generic parameters:
/// - `N`: float type of the weights (f32, f64)
/// - `A`: analyzer turning text into terms (e.g., PorterAnalyzer)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// # Serialization
/// Not supported. Models are rebuilt from the card database on every run.
pub use vectorizer::VectorModel;

/// Corpus
/// Card names and their normalized rules text as two aligned sequences.
/// Names are unique and keep the repository's iteration order.
pub use corpus::Corpus;

/// Token Frequency structure
/// Counts token occurrences within one document.
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::TokenFrequency;

/// Analyzers
/// The `Analyzer` trait turns normalized text into terms.
/// - `PorterAnalyzer`: word tokenizer + English Snowball stemmer (default)
/// - `PlainAnalyzer`: word tokenizer only
pub use vectorizer::token::{Analyzer, PlainAnalyzer, PorterAnalyzer};

/// TF IDF Calculation Engine Trait
/// Plug different weighting strategies into `VectorModel<N, A, E>`.
/// `DefaultTFIDFEngine` uses raw counts and the smoothed IDF
/// `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Stop word list, matched before and after stemming
pub use vectorizer::stop_words::StopWords;

/// Search Hits and Hit Entry structures
/// - `Hits`: ranked results, descending by score, ties in corpus order
/// - `HitEntry`: one card name and its cosine score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

/// Card data
/// - `CardRepository`: name -> faces lookup plus an iteration order
/// - `InMemoryRepository`: the in-memory implementation, loadable from JSON
pub use repository::{CardFace, CardRecord, CardRepository, InMemoryRepository};

/// Exclusion filters for corpus construction
pub use corpus::filter::{AcceptAll, CardFilter, ExclusionConfig};

pub use config::SimilarityConfig;
pub use error::{Error, Result};
