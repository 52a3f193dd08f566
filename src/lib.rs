/// This crate resolves a small set of canonical products against a large
/// set of noisy free-text listings using TF-IDF weighted cosine similarity.
pub mod error;
pub mod io;
pub mod matcher;

/// The matching pipeline.
/// Runs the full chain over two in-memory record collections:
/// per-record term frequencies, a shared document-frequency corpus,
/// IDF estimation over the combined corpus, TF-IDF weighting, inverted
/// indices, candidate generation, and thresholded best-match selection.
///
/// Every stage is a pure function over in-memory maps; results are
/// deterministic, including iteration order.
pub use matcher::{Matcher, MatcherConfig};

/// Record types and pipeline output.
/// `ProductRecord` is identified by its lower-cased `product_name`;
/// `ListingRecord` by its zero-based input ordinal. `MatchResults` maps
/// each matched product to its single winning listing and score.
pub use matcher::{ListingRecord, MatchResults, ProductRecord};

/// Token Frequency structure
/// Per-record token occurrence counts in first-seen order, the base data
/// for TF calculation, plus the record's deduplicated corpus contribution.
pub use matcher::token::TokenFrequency;

/// Tokenizer
/// Lower-cases and splits on runs of non-alphanumeric characters
/// (underscore included), discarding empty fragments and keeping
/// duplicates.
pub use matcher::token::tokenize;

/// Corpus for IDF estimation
/// The flat multiset of per-record deduplicated token occurrences across
/// both collections. IDF divides the multiset size by raw entry counts;
/// that arithmetic is part of the contract and is not classic
/// per-document IDF.
pub use matcher::corpus::Corpus;

/// Cosine similarity with the numerator restricted to a shared-token
/// list and the denominator over the full vector norms.
pub use matcher::scoring::cosine;

/// A single match: the winning listing id and its cosine score, always
/// strictly above the configured threshold.
pub use matcher::scoring::MatchHit;

/// Failure taxonomy of the pipeline. All failures are fatal; this is a
/// batch tool, not a service.
pub use error::Error;
