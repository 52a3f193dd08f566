use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::error::Error;

use super::token::{tokenize, TokenFrequency};
use super::{ListingRecord, ProductRecord, RecordWeights};

/// Flat multiset of corpus entries used for document-frequency counting.
///
/// Each record contributes its distinct tokens once; products contribute
/// their lower-cased name as one extra entry. The multiset is flat on
/// purpose: IDF divides by raw entry counts, not per-document presence,
/// and that arithmetic is part of the contract.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Corpus {
            entries: Vec::new(),
        }
    }

    /// Append one record's distinct tokens.
    #[inline]
    pub fn add_record_set<T>(&mut self, unique_tokens: &[T])
    where
        T: AsRef<str>,
    {
        for token in unique_tokens {
            self.entries.push(token.as_ref().to_string());
        }
    }

    /// Append a single raw entry, e.g. a product's own name.
    #[inline]
    pub fn add_entry(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Concatenate two per-collection corpora into the combined multiset.
    pub fn concat(mut self, other: Corpus) -> Corpus {
        self.entries.extend(other.entries);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence count of each distinct entry, in first-seen order.
    pub fn entry_counts(&self) -> IndexMap<String, u64> {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for entry in &self.entries {
            *counts.entry(entry.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// TF maps and corpus contribution of one record collection.
#[derive(Debug, Clone)]
pub struct CollectionStats<K> {
    pub tf: RecordWeights<K>,
    pub corpus: Corpus,
}

/// Concatenate the tokens of every non-excluded field of a record.
/// Non-string values tokenize their JSON rendering.
fn record_tokens(fields: &Map<String, Value>, excluded: &[String]) -> TokenFrequency {
    let mut freq = TokenFrequency::new();
    for (key, value) in fields {
        if excluded.iter().any(|ex| ex == key) {
            continue;
        }
        match value {
            Value::String(text) => freq.add_tokens(tokenize(text)),
            other => freq.add_tokens(tokenize(&other.to_string())),
        };
    }
    freq
}

/// Build the product collection's TF maps and corpus contribution.
///
/// Tokenization is a pure per-record map, so it runs in parallel; the
/// fold into the TF map and corpus stays in input order.
pub fn build_products(
    products: &[ProductRecord],
    excluded_fields: &[String],
) -> Result<CollectionStats<String>, Error> {
    let per_record: Vec<(String, TokenFrequency)> = products
        .par_iter()
        .map(|product| {
            let freq = record_tokens(&product.fields, excluded_fields);
            if freq.is_empty() {
                return Err(Error::EmptyRecord {
                    id: product.name.clone(),
                });
            }
            Ok((product.name.clone(), freq))
        })
        .collect::<Result<_, _>>()?;

    let mut tf = IndexMap::with_capacity(per_record.len());
    let mut corpus = Corpus::new();
    for (name, freq) in per_record {
        corpus.add_record_set(&freq.token_set_ref_str());
        // the product name itself is a vocabulary term: exact name
        // matches carry document-frequency weight
        corpus.add_entry(name.clone());
        tf.insert(name, freq.tf_map());
    }
    Ok(CollectionStats { tf, corpus })
}

/// Build the listing collection's TF maps and corpus contribution.
pub fn build_listings(
    listings: &[ListingRecord],
    excluded_fields: &[String],
) -> Result<CollectionStats<usize>, Error> {
    let per_record: Vec<(usize, TokenFrequency)> = listings
        .par_iter()
        .map(|listing| {
            let freq = record_tokens(&listing.fields, excluded_fields);
            if freq.is_empty() {
                return Err(Error::EmptyRecord {
                    id: listing.id.to_string(),
                });
            }
            Ok((listing.id, freq))
        })
        .collect::<Result<_, _>>()?;

    let mut tf = IndexMap::with_capacity(per_record.len());
    let mut corpus = Corpus::new();
    for (id, freq) in per_record {
        corpus.add_record_set(&freq.token_set_ref_str());
        tf.insert(id, freq.tf_map());
    }
    Ok(CollectionStats { tf, corpus })
}
