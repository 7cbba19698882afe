//! Starter configuration built from a repository's remote URL.

use super::{CommitConfig, SignatureConfig};

/// Remote used when the repository has none.
pub const DEFAULT_REMOTE_URL: &str = "git@github.com:username/repo.git";

const PLACEHOLDER_USERNAME: &str = "your-username";
const PLACEHOLDER_EMAIL: &str = "your-email@example.com";

/// Build a one-signature config for `remote_url`.
///
/// The pattern keeps everything up to the last `/` and wildcards the
/// repository name, so the template covers every repository of the same
/// owner.
pub fn generate_config_template(remote_url: Option<&str>) -> CommitConfig {
    let remote_url = remote_url
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_REMOTE_URL);

    CommitConfig {
        signatures: vec![SignatureConfig {
            name: config_name(remote_url),
            username: PLACEHOLDER_USERNAME.to_string(),
            mailbox: PLACEHOLDER_EMAIL.to_string(),
            remote_patterns: vec![owner_pattern(remote_url)],
            ..Default::default()
        }],
    }
}

fn config_name(remote_url: &str) -> String {
    match remote_url.rsplit_once('/') {
        Some((_, repo)) => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            format!("{repo}-git-config")
        }
        None => "git-config".to_string(),
    }
}

fn owner_pattern(remote_url: &str) -> String {
    match remote_url.rsplit_once('/') {
        Some((owner, _)) => format!("{owner}/*"),
        None => remote_url.to_string(),
    }
}
