//! Fuzzy matching of free-text series names against the catalog.
//!
//! Media servers report series titles as display strings ("S.W.A.T.", "The
//! Office (US)") that rarely equal Sonarr's stored title byte-for-byte, so the
//! lookup runs two similarity passes: first over slugs, then over raw titles.
//! Slugs absorb punctuation and casing differences, while the raw-title pass
//! preserves tokens that slugging washes out (a year suffix, an abbreviation's
//! dots), so each pass catches names the other misses.

use crate::models::Series;
use strsim::normalized_levenshtein;
use tracing::debug;

/// Minimum 0-100 similarity score for a catalog entry to count as a match.
const MATCH_THRESHOLD: f64 = 80.0;

/// Reduce a title to a lowercase, punctuation-free, hyphen-joined form
/// comparable with Sonarr's stored `titleSlug`.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Similarity ratio between two strings on a 0-100 scale, based on
/// edit distance normalized by the longer string's length.
pub fn similarity(left: &str, right: &str) -> f64 {
    normalized_levenshtein(left, right) * 100.0
}

fn best_match<'a, I>(query: &str, candidates: I) -> Option<(usize, f64)>
where
    I: Iterator<Item = &'a str>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.enumerate() {
        let score = similarity(query, candidate);
        // Strictly greater, so the first of equally-scored entries wins.
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best
}

/// Find the catalog entry that best matches `query`, with its 0-100 score.
/// Entries scoring below the threshold on both the slug pass and the raw-title
/// pass are never returned.
pub fn find_best_match(query: &str, series: &[Series]) -> Option<(usize, f64)> {
    let query_slug = slugify(query);
    debug!("Finding best match for \"{}\" (\"{}\").", query, query_slug);

    if let Some((index, score)) = best_match(&query_slug, series.iter().map(|s| s.title_slug.as_str())) {
        if score >= MATCH_THRESHOLD {
            return Some((index, score));
        }
    }

    if let Some((index, score)) = best_match(query, series.iter().map(|s| s.title.as_str())) {
        if score >= MATCH_THRESHOLD {
            return Some((index, score));
        }
    }

    None
}
