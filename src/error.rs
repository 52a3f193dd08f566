use thiserror::Error;

/// Failure taxonomy of the matching pipeline.
///
/// Every variant is fatal: this is a batch tool, there is no transient
/// failure source and no skip-and-continue behavior for bad input lines.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of an input file was not a valid JSON object.
    /// `line` is 1-based.
    #[error("invalid json on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },

    #[error("failed to serialize result line: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("product record on line {line} has no \"product_name\" string field")]
    MissingProductName { line: usize },

    /// A record tokenized to nothing. TF is a fraction of the record's
    /// total token count, so an empty record is rejected upfront instead
    /// of dividing by zero.
    #[error("record {id:?} produced no tokens")]
    EmptyRecord { id: String },

    /// A token present in a TF map was absent from the IDF map.
    /// Every token fed into a TF map is also fed into the corpus, so this
    /// is an internal-consistency violation, never an input problem.
    #[error("token {token:?} missing from the idf map")]
    MissingIdf { token: String },

    #[error("match result refers to unknown listing {id}")]
    UnknownListing { id: usize },
}
