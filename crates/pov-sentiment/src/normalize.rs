//! Noise stripping for free-text evidence before scoring.
//!
//! Steps run in a fixed order: pictographs, leading reshare marker,
//! `@handle` mentions, whitespace. The result is a fixpoint:
//! `normalize(&normalize(s)) == normalize(s)`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Marker social feeds prepend to re-shared posts.
const RESHARE_MARKER: &str = "RT @";
/// The marker collapses to a bare mention, which step 3 then strips.
const RESHARE_TOKEN: &str = "@";

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\S*").expect("valid regex"));

/// Clean one raw text. May return an empty string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let without_pictographs: String = raw.chars().filter(|&c| !is_pictograph(c)).collect();
    let reshare_replaced = replace_leading_reshare(&without_pictographs);
    let without_mentions = MENTION_RE.replace_all(&reshare_replaced, "");
    without_mentions.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a batch, dropping items that clean to nothing and repeated
/// texts. First-seen order is kept.
pub fn normalize_batch<'a, I>(bodies: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut cleaned: Vec<String> = bodies
        .into_iter()
        .map(normalize)
        .filter(|text| !text.is_empty())
        .collect();
    cleaned.retain(|text| seen.insert(text.clone()));
    cleaned
}

fn replace_leading_reshare(text: &str) -> String {
    match text.trim_start().strip_prefix(RESHARE_MARKER) {
        Some(rest) => format!("{RESHARE_TOKEN}{rest}"),
        None => text.to_string(),
    }
}

/// Emoji, pictographs, and the joiners/selectors that glue them together.
fn is_pictograph(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF // emoticons, pictographs, transport, flags, supplemental
            | 0x2300..=0x23FF // misc technical (watch, hourglass, media controls)
            | 0x2500..=0x2BFF // box drawing through misc symbols, dingbats, arrows
            | 0x24C2
            | 0x3030
            | 0x303D
            | 0x200D // zero-width joiner
            | 0x20E3 // keycap
            | 0xFE00..=0xFE0F // variation selectors
            | 0xE0020..=0xE007F // tag sequences
    )
}
