use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::Error;

use super::corpus::Corpus;
use super::{RecordWeights, TokenWeights};

/// Inverse document frequency over the combined corpus multiset.
///
/// For a multiset of size N, `IDF(token) = N / occurrences(token)`.
/// Entries are per-record deduplicated token occurrences, so this divides
/// by raw entry counts rather than per-document presence; the result is
/// always >= 1.0. Tokens absent from the corpus are absent from the map.
pub fn idf(corpus: &Corpus) -> TokenWeights {
    let n = corpus.len() as f64;
    corpus
        .entry_counts()
        .into_iter()
        .map(|(token, count)| (token, n / count as f64))
        .collect()
}

/// Combine per-record TF maps with the shared IDF map.
///
/// Every token of every TF map must have an IDF entry; corpus
/// construction guarantees it, and a miss is reported as
/// [`Error::MissingIdf`] instead of silently defaulting.
pub fn tf_idf<K>(tfs: &RecordWeights<K>, idfs: &TokenWeights) -> Result<RecordWeights<K>, Error>
where
    K: Clone + Eq + Hash,
{
    let mut weighted = IndexMap::with_capacity(tfs.len());
    for (key, tf) in tfs {
        let mut vector = IndexMap::with_capacity(tf.len());
        for (token, tf_value) in tf {
            let idf_value = idfs.get(token).ok_or_else(|| Error::MissingIdf {
                token: token.clone(),
            })?;
            vector.insert(token.clone(), tf_value * idf_value);
        }
        weighted.insert(key.clone(), vector);
    }
    Ok(weighted)
}
