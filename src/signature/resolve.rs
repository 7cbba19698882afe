//! Best-signature selection for a remote URL.

use super::SignatureConfig;
use super::pattern::{NO_MATCH, match_remote_pattern};

/// Pick the signature whose best pattern scores highest against `remote_url`.
///
/// Signatures are visited in list order and each signature's patterns in
/// their given order. A candidate replaces the current best only when its
/// score is strictly greater, so on a tie the first one seen wins.
///
/// Returns `None` when the list is empty or no pattern matches.
pub fn resolve_best_signature<'a>(
    remote_url: &str,
    signatures: &'a [SignatureConfig],
) -> Option<&'a SignatureConfig> {
    let mut best: Option<&SignatureConfig> = None;
    let mut best_score = NO_MATCH;

    for signature in signatures {
        for pattern in &signature.remote_patterns {
            let score = match_remote_pattern(pattern, remote_url);
            if score > best_score {
                best_score = score;
                best = Some(signature);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(name: &str, patterns: &[&str]) -> SignatureConfig {
        SignatureConfig {
            name: name.to_string(),
            username: format!("{name}-user"),
            mailbox: format!("{name}@example.com"),
            remote_patterns: patterns.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_more_specific_signature_wins_regardless_of_order() {
        let signatures = vec![
            signature("general", &["git@github.com:*"]),
            signature("specific", &["git@github.com:specific/*"]),
        ];

        let best = resolve_best_signature("git@github.com:specific/repo.git", &signatures)
            .expect("expected a match");
        assert_eq!(best.name, "specific");
    }

    #[test]
    fn test_tie_keeps_first_signature() {
        let signatures = vec![
            signature("first", &["git@github.com:*"]),
            signature("second", &["git@github.com:*"]),
        ];

        let best = resolve_best_signature("git@github.com:user/repo.git", &signatures).unwrap();
        assert_eq!(best.name, "first");
    }

    #[test]
    fn test_tie_across_different_patterns_keeps_first() {
        let url = "git@github.com:user/repo.git";
        let signatures = vec![
            signature("first", &["*github.com:user/*"]),
            signature("second", &["git@github.com:u*"]),
        ];
        assert_eq!(match_remote_pattern("*github.com:user/*", url), 16);
        assert_eq!(match_remote_pattern("git@github.com:u*", url), 16);

        let best = resolve_best_signature(url, &signatures).unwrap();
        assert_eq!(best.name, "first");
    }

    #[test]
    fn test_later_pattern_in_same_signature_can_raise_score() {
        let url = "git@github.com:user/repo.git";
        let signatures = vec![
            signature("first", &["*", "git@github.com:*"]),
            signature("second", &["git@github.com:*"]),
        ];

        let best = resolve_best_signature(url, &signatures).unwrap();
        assert_eq!(best.name, "first");
    }

    #[test]
    fn test_best_pattern_within_signature_counts() {
        let signatures = vec![
            signature("broad", &["*", "https://*"]),
            signature("narrow", &["git@gitlab.com:*", "git@github.com:*"]),
        ];

        let best = resolve_best_signature("git@github.com:user/repo.git", &signatures).unwrap();
        assert_eq!(best.name, "narrow");
    }

    #[test]
    fn test_fallback_signature_when_nothing_specific_matches() {
        let signatures = vec![
            signature("fallback", &["*"]),
            signature("github", &["git@github.com:*"]),
        ];

        let best = resolve_best_signature("https://gitlab.com/group/repo.git", &signatures).unwrap();
        assert_eq!(best.name, "fallback");
    }

    #[test]
    fn test_no_match_returns_none() {
        let signatures = vec![signature("gitlab", &["git@gitlab.com:*"])];
        assert!(resolve_best_signature("git@github.com:user/repo.git", &signatures).is_none());
    }

    #[test]
    fn test_empty_signature_list_returns_none() {
        assert!(resolve_best_signature("git@github.com:user/repo.git", &[]).is_none());
    }

    #[test]
    fn test_signature_without_patterns_never_matches() {
        let signatures = vec![signature("empty", &[]), signature("any", &["*"])];
        let best = resolve_best_signature("", &signatures).unwrap();
        assert_eq!(best.name, "any");
    }

    #[test]
    fn test_exact_match_beats_wildcards() {
        let url = "https://github.com/company/critical-project.git";
        let signatures = vec![
            signature("team", &["https://github.com/company/*"]),
            signature("exact", &[url]),
            signature("any-https", &["https://*"]),
        ];

        let best = resolve_best_signature(url, &signatures).unwrap();
        assert_eq!(best.name, "exact");
    }
}
