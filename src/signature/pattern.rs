//! Wildcard matching of remote URLs against signature patterns.
//!
//! A pattern is plain text where `*` matches any run of characters,
//! including the empty run. There is no other wildcard syntax and no
//! escaping. The match is always against the whole URL.
//!
//! A successful match scores the number of non-wildcard characters in the
//! pattern, so more specific patterns outrank general ones:
//!
//! ```text
//! git@github.com:user/repo.git   28
//! git@github.com:user/*          20
//! git@github.com:*               15
//! git@*.com:*                     9
//! git@*:*                         5
//! *                               0
//! ```

/// Score returned when a pattern does not match.
pub const NO_MATCH: isize = -1;

const WILDCARD: char = '*';

/// Score `pattern` against `remote_url`.
///
/// Returns [`NO_MATCH`] when the pattern does not accept the whole URL,
/// otherwise the count of non-wildcard characters in the pattern.
pub fn match_remote_pattern(pattern: &str, remote_url: &str) -> isize {
    if !matches_glob(pattern, remote_url) {
        return NO_MATCH;
    }
    count_non_wildcard_chars(pattern) as isize
}

/// Count the characters of `pattern` that are not `*`.
pub fn count_non_wildcard_chars(pattern: &str) -> usize {
    pattern.chars().filter(|&c| c != WILDCARD).count()
}

/// Whole-string glob match.
fn matches_glob(pattern: &str, remote_url: &str) -> bool {
    if pattern == remote_url {
        return true;
    }
    if !pattern.contains(WILDCARD) {
        return false;
    }

    let url: Vec<char> = remote_url.chars().collect();

    // row[j]: the pattern consumed so far matches the first j URL chars.
    let mut row = vec![false; url.len() + 1];
    row[0] = true;
    let mut next = vec![false; url.len() + 1];

    for pc in pattern.chars() {
        if pc == WILDCARD {
            next[0] = row[0];
            for j in 1..=url.len() {
                next[j] = row[j] || next[j - 1];
            }
        } else {
            next[0] = false;
            for j in 1..=url.len() {
                next[j] = row[j - 1] && url[j - 1] == pc;
            }
        }
        std::mem::swap(&mut row, &mut next);

        if !row.iter().any(|&reachable| reachable) {
            return false;
        }
    }

    row[url.len()]
}
