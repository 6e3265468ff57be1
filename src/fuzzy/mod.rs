//! Approximate title matching for poll selection. Scores are 0-100,
//! case-insensitive, and tolerant of word reordering and partial substring
//! overlap, so "lnch" still finds "Lunch?".

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Similarity between a free-text query and a candidate title, 0-100.
pub fn similarity(query: &str, title: &str) -> u8 {
    let query = query.to_lowercase();
    let title = title.to_lowercase();
    if query.trim().is_empty() || title.trim().is_empty() {
        return 0;
    }

    let best = token_set_ratio(&query, &title).max(partial_ratio(&query, &title));
    (best * 100.0).round() as u8
}

fn tokens(s: &str) -> BTreeSet<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

// Compare the shared tokens against each side's full token set, taking the
// best pairwise ratio. Word order stops mattering and a query that is a
// subset of the title scores very high.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let common: Vec<&str> = ta.intersection(&tb).copied().collect();
    let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
    let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

    let base = common.join(" ");
    let with_a = join_nonempty(&base, &only_a.join(" "));
    let with_b = join_nonempty(&base, &only_b.join(" "));

    normalized_levenshtein(&base, &with_a)
        .max(normalized_levenshtein(&base, &with_b))
        .max(normalized_levenshtein(&with_a, &with_b))
}

// Best alignment of the shorter string against every same-length window of
// the longer one.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    if short_len >= long_chars.len() {
        return normalized_levenshtein(short, long);
    }

    long_chars
        .windows(short_len)
        .map(|window| {
            let candidate: String = window.iter().collect();
            normalized_levenshtein(short, &candidate)
        })
        .fold(0.0, f64::max)
}

fn join_nonempty(base: &str, rest: &str) -> String {
    if base.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, rest)
    }
}
