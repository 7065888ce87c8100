//! Lexicon polarity scorer for general English opinion text.

/// Computes a compound polarity score in `[-1.0, 1.0]` for cleaned text.
///
/// Implementations must be deterministic for a given input and lexicon.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> f32;
}

/// Word weights for reviews, posts, and headlines.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("fantastic", 0.5),
    ("wonderful", 0.5),
    ("superb", 0.5),
    ("outstanding", 0.5),
    ("incredible", 0.5),
    ("brilliant", 0.5),
    ("perfect", 0.5),
    ("masterpiece", 0.6),
    ("love", 0.5),
    ("loved", 0.5),
    ("loves", 0.5),
    ("best", 0.5),
    ("better", 0.2),
    ("nice", 0.3),
    ("happy", 0.4),
    ("glad", 0.3),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("fun", 0.3),
    ("favorite", 0.4),
    ("beautiful", 0.4),
    ("stunning", 0.5),
    ("impressive", 0.4),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("worth", 0.3),
    ("solid", 0.2),
    ("reliable", 0.3),
    ("smooth", 0.2),
    ("fast", 0.2),
    ("win", 0.4),
    ("wins", 0.4),
    ("victory", 0.5),
    ("thanks", 0.2),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("horrible", -0.6),
    ("worst", -0.6),
    ("hate", -0.6),
    ("hated", -0.6),
    ("poor", -0.4),
    ("boring", -0.4),
    ("dull", -0.3),
    ("mediocre", -0.3),
    ("meh", -0.2),
    ("disappointing", -0.5),
    ("disappointed", -0.5),
    ("disappointment", -0.5),
    ("broken", -0.5),
    ("broke", -0.3),
    ("waste", -0.5),
    ("useless", -0.5),
    ("fail", -0.4),
    ("failed", -0.4),
    ("failure", -0.4),
    ("problem", -0.3),
    ("problems", -0.3),
    ("slow", -0.2),
    ("overpriced", -0.4),
    ("refund", -0.3),
    ("scam", -0.7),
    ("fake", -0.5),
    ("annoying", -0.4),
    ("sad", -0.4),
    ("angry", -0.5),
    ("crash", -0.4),
    ("crashes", -0.4),
    ("buggy", -0.4),
    ("dangerous", -0.6),
    ("lawsuit", -0.5),
    ("recall", -0.5),
    ("crisis", -0.5),
    ("war", -0.5),
    ("attack", -0.5),
];

/// Words that invert the polarity of a weighted word shortly after them.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "dont", "doesnt", "didnt",
    "isnt", "wasnt", "arent", "werent", "cant", "cannot", "wont", "wouldnt", "shouldnt",
];

/// How many following words a negator reaches.
const NEGATION_WINDOW: usize = 3;
/// Negated words keep most, not all, of their magnitude.
const NEGATION_SCALAR: f32 = -0.75;

/// Default scorer backed by [`LEXICON`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f32 {
        lexicon_score(text)
    }
}

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, sums matching weights (flipping a weight
/// that falls within [`NEGATION_WINDOW`] words after a negator), and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    let mut negation_left = 0usize;

    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if w.is_empty() {
            continue;
        }

        if is_negator(&w) {
            negation_left = NEGATION_WINDOW;
            continue;
        }

        if let Some(weight) = weight_of(&w) {
            if negation_left > 0 {
                score += weight * NEGATION_SCALAR;
                negation_left = 0;
            } else {
                score += weight;
            }
            continue;
        }

        negation_left = negation_left.saturating_sub(1);
    }

    score.clamp(-1.0, 1.0)
}

fn weight_of(word: &str) -> Option<f32> {
    LEXICON
        .iter()
        .find(|&&(lex_word, _)| lex_word == word)
        .map(|&(_, weight)| weight)
}

fn is_negator(word: &str) -> bool {
    let folded: String = word.chars().filter(|c| *c != '\'' && *c != '’').collect();
    NEGATORS.contains(&folded.as_str()) || word.ends_with("n't") || word.ends_with("n’t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_returns_zero() {
        assert_eq!(lexicon_score(""), 0.0);
    }

    #[test]
    fn whitespace_only_returns_zero() {
        assert_eq!(lexicon_score("   "), 0.0);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert_eq!(lexicon_score("the quick brown fox"), 0.0);
    }

    #[test]
    fn positive_keyword_returns_positive() {
        let score = lexicon_score("this product is great");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn negative_keyword_returns_negative() {
        let score = lexicon_score("battery life is terrible");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn mixed_text_returns_intermediate() {
        // great (+0.4) + recall (-0.5) = -0.1
        let score = lexicon_score("great product but there was a recall");
        assert!(
            score > -1.0 && score < 1.0,
            "expected intermediate score, got {score}"
        );
    }

    #[test]
    fn score_clamps_to_positive_one() {
        let text = "great excellent best love recommend perfect amazing";
        assert_eq!(lexicon_score(text), 1.0);
    }

    #[test]
    fn score_clamps_to_negative_one() {
        let text = "terrible awful worst hate scam useless broken";
        assert_eq!(lexicon_score(text), -1.0);
    }

    #[test]
    fn punctuation_stripped_from_words() {
        let score = lexicon_score("great!");
        assert!(score > 0.0, "expected positive score for 'great!', got {score}");
    }

    #[test]
    fn negation_flips_following_word() {
        let score = lexicon_score("not good at all");
        assert!(score < 0.0, "expected negated score, got {score}");
    }

    #[test]
    fn contraction_negates() {
        let score = lexicon_score("I don't love it");
        assert!(score < 0.0, "expected negated score, got {score}");
        let score = lexicon_score("it isn’t great");
        assert!(score < 0.0, "expected negated score, got {score}");
    }

    #[test]
    fn negation_window_expires() {
        // "not" reaches three words; "great" is the fifth word after it.
        let score = lexicon_score("not a single one of these great");
        assert!(score > 0.0, "expected window to expire, got {score}");
    }

    #[test]
    fn negation_applies_once() {
        // Only "bad" is flipped; "awful" keeps its sign.
        let score = lexicon_score("not bad but awful");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn scorer_trait_matches_free_function() {
        let text = "Great product!! Love it";
        assert_eq!(LexiconScorer.score(text), lexicon_score(text));
        assert!(LexiconScorer.score(text) >= 0.2);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "solid phone, slow charger, never disappointing";
        assert_eq!(lexicon_score(text), lexicon_score(text));
    }
}
