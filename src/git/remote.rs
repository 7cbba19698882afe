//! Remote selection for signature resolution.

use super::repository::RemoteInfo;

/// Name of the preferred remote.
pub const ORIGIN: &str = "origin";

/// Pick the URL used to resolve a signature.
///
/// Prefers `origin` when it has a URL, otherwise the first remote with a
/// URL in enumeration order. `None` means there is nothing to match.
pub fn select_remote_url(remotes: &[RemoteInfo]) -> Option<&str> {
    if let Some(origin) = remotes
        .iter()
        .find(|r| r.name == ORIGIN && !r.url.is_empty())
    {
        return Some(origin.url.as_str());
    }

    remotes
        .first()
        .filter(|r| !r.url.is_empty())
        .map(|r| r.url.as_str())
}
