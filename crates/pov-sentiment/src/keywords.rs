//! Word-frequency summary over an excerpt pool.

use std::collections::HashMap;
use std::sync::LazyLock;

use pov_core::{KeywordCount, KeywordFrequency};
use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// English stopwords, matched after lowercasing.
///
/// Includes the fragments a `\w+` split leaves behind from contractions
/// (`don't` → `don`, `t`).
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Lowercased word tokens of `text` with stopwords removed.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|token| !STOPWORDS.contains(&token.as_str()))
}

/// Count tokens across `texts`, most frequent first.
///
/// Ties keep the order in which tokens were first seen. At most `limit`
/// entries are returned.
pub fn keyword_frequency<'a, I>(texts: I, limit: usize) -> KeywordFrequency
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for text in texts {
        for token in tokenize(text) {
            if let Some(&slot) = index.get(&token) {
                counts[slot].count += 1;
            } else {
                index.insert(token.clone(), counts.len());
                counts.push(KeywordCount { token, count: 1 });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    KeywordFrequency::new(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_drops_stopwords() {
        let tokens: Vec<String> = tokenize("The Camera is GREAT and the battery lasts").collect();
        assert_eq!(tokens, vec!["camera", "great", "battery", "lasts"]);
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        let tokens: Vec<String> = tokenize("don't-stop, loving_it!!").collect();
        assert_eq!(tokens, vec!["stop", "loving_it"]);
    }

    #[test]
    fn counts_sorted_descending() {
        let summary = keyword_frequency(["love screen", "love love battery", "screen"], 20);
        let entries: Vec<(&str, usize)> = summary
            .entries()
            .iter()
            .map(|k| (k.token.as_str(), k.count))
            .collect();
        assert_eq!(entries, vec![("love", 3), ("screen", 2), ("battery", 1)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let summary = keyword_frequency(["zebra apple", "mango"], 20);
        let tokens: Vec<&str> = summary.entries().iter().map(|k| k.token.as_str()).collect();
        assert_eq!(tokens, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn limit_caps_entries() {
        let summary = keyword_frequency(["one two three four five"], 3);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.entries()[0].token, "one");
    }

    #[test]
    fn empty_pool_yields_empty_summary() {
        let summary = keyword_frequency(std::iter::empty(), 20);
        assert!(summary.is_empty());
    }
}
