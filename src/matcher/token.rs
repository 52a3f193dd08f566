use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Split a raw text field into normalized tokens.
///
/// The string is lower-cased and split on every run of non-alphanumeric
/// characters; underscore counts as a separator. Empty fragments are
/// discarded, duplicates are kept. Whitespace-only input yields an empty
/// iterator. Calling the function again restarts the sequence.
///
/// # Examples
/// ```
/// use listing_matcher::tokenize;
/// let tokens: Vec<String> = tokenize("A quick brown fox.").collect();
/// assert_eq!(tokens, vec!["a", "quick", "brown", "fox"]);
/// ```
#[inline]
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() || c == '_')
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| fragment.to_lowercase())
}

/// Per-record token occurrence counts, the base data for TF calculation.
///
/// Tokens keep their first-seen insertion order, which makes every map
/// derived from this structure deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count one token occurrence.
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Count every token produced by an iterator.
    #[inline]
    pub fn add_tokens<I, T>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Build directly from a token iterator.
    #[inline]
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(tokens);
        freq
    }

    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Sum of all occurrence counts.
    #[inline]
    pub fn token_total_count(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens.
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }

    /// Distinct tokens in first-seen order.
    ///
    /// This is the record's contribution to the document-frequency corpus:
    /// one entry per distinct token, regardless of how often it occurred.
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }

    /// Term frequencies: occurrence count divided by the record's total
    /// token count. Values sum to 1.0 barring floating-point drift.
    ///
    /// An empty record yields an empty map; callers that require at least
    /// one token must check [`is_empty`](Self::is_empty) first.
    #[inline]
    pub fn tf_map(&self) -> IndexMap<String, f64> {
        let total = self.total_token_count as f64;
        self.token_count
            .iter()
            .map(|(token, &count)| (token.clone(), count as f64 / total))
            .collect()
    }
}
