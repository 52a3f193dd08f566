pub mod corpus;
pub mod index;
pub mod scoring;
pub mod tfidf;
pub mod token;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::Error;
use scoring::MatchHit;

/// Tipping point between losing true positives and accumulating false
/// positives; a candidate must score strictly above this to match.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.25;

/// Sparse token weight vector of one record (TF or TF-IDF values).
pub type TokenWeights = IndexMap<String, f64>;

/// Record id to sparse weight vector, in record insertion order.
pub type RecordWeights<K> = IndexMap<K, TokenWeights>;

/// Token to the ids of records whose weight vector contains it.
pub type InvertedIndex<K> = IndexMap<String, Vec<K>>;

/// (product, listing) pair to the tokens the two share. Sparse by
/// construction: pairs sharing zero tokens have no entry.
pub type CandidateMap<P, L> = IndexMap<(P, L), Vec<String>>;

/// Final result: at most one listing per product.
pub type MatchResults = IndexMap<String, MatchHit<usize>>;

/// A canonical product record. The lower-cased `product_name` doubles as
/// the record id; `fields` is the raw JSON object in input order.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub name: String,
    pub fields: Map<String, Value>,
}

/// A noisy listing record, identified by its zero-based input ordinal.
#[derive(Debug, Clone)]
pub struct ListingRecord {
    pub id: usize,
    pub fields: Map<String, Value>,
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Exclusive lower bound on the cosine score of a reported match.
    pub score_threshold: f64,
    /// Product fields skipped during tokenization. The announced date
    /// adds no signal to the listing comparison.
    pub excluded_product_fields: Vec<String>,
    /// Listing fields skipped during tokenization. Empty by default, so
    /// price and currency still contribute tokens;
    /// [`exclude_listing_fields`](Self::exclude_listing_fields) opts into
    /// dropping them.
    pub excluded_listing_fields: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            excluded_product_fields: vec!["announced-date".to_string()],
            excluded_listing_fields: Vec::new(),
        }
    }
}

impl MatcherConfig {
    /// Opt into actually dropping the low-signal price and currency
    /// fields from listing tokenization.
    pub fn exclude_listing_fields(mut self) -> Self {
        self.excluded_listing_fields = vec!["price".to_string(), "currency".to_string()];
        self
    }
}

/// The matching pipeline: TF maps and a shared corpus per collection,
/// IDF over the combined corpus, TF-IDF weighting, inverted indices,
/// candidate generation, and thresholded best-match selection.
///
/// Every stage is a pure function over in-memory maps; running the same
/// inputs twice yields identical results, including iteration order.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Matcher { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Run the full pipeline over the two collections.
    ///
    /// Returns at most one listing per product; products with no
    /// candidate above the threshold are simply absent. A listing may be
    /// claimed by more than one product: selection is greedy and
    /// independent per product, no global assignment is attempted.
    pub fn run(
        &self,
        products: &[ProductRecord],
        listings: &[ListingRecord],
    ) -> Result<MatchResults, Error> {
        let product_stats = corpus::build_products(products, &self.config.excluded_product_fields)?;
        let listing_stats = corpus::build_listings(listings, &self.config.excluded_listing_fields)?;

        let combined = product_stats.corpus.concat(listing_stats.corpus);
        let idfs = tfidf::idf(&combined);

        let product_weights = tfidf::tf_idf(&product_stats.tf, &idfs)?;
        let listing_weights = tfidf::tf_idf(&listing_stats.tf, &idfs)?;

        let product_index = index::invert(&product_weights);
        let listing_index = index::invert(&listing_weights);
        let candidates = index::common_tokens(&product_index, &listing_index);

        Ok(scoring::best_matches(
            &product_weights,
            &listing_weights,
            &candidates,
            self.config.score_threshold,
        ))
    }
}
