//! Link handling for rendered help pages.
//!
//! Help pages link to each other with paths relative to the page's own
//! directory. Once a page is shown outside the help server those links have
//! no base, so they are rewritten into full request paths before rendering.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\bhref\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).expect("href pattern is valid")
});

/// What a clicked link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A request path to resolve through the provider.
    Path(String),
    /// An anchor within the current page.
    Fragment(String),
    /// Anything outside the help system (`https://`, `mailto:`, ...).
    External(String),
}

/// Whether `href` is relative to the page that contains it.
pub fn is_relative_href(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') || href.starts_with('/') {
        return false;
    }
    matches!(
        Url::parse(href),
        Err(url::ParseError::RelativeUrlWithoutBase)
    )
}

/// Prefix every relative `href` in `html` with `request_dirname`.
///
/// Absolute URLs, root-absolute paths and fragment links are left untouched,
/// as is everything when `request_dirname` is empty.
pub fn rewrite_relative_links(html: &str, request_dirname: &str) -> String {
    let dir = request_dirname.trim_end_matches('/');
    if dir.is_empty() {
        return html.to_string();
    }

    HREF_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let prefix = &caps[1];
            let (href, quote) = match (caps.get(2), caps.get(3)) {
                (Some(m), _) => (m.as_str(), '"'),
                (None, Some(m)) => (m.as_str(), '\''),
                (None, None) => return caps[0].to_string(),
            };

            if is_relative_href(href) {
                format!("{prefix}{quote}{dir}/{href}{quote}")
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// All `href` values in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Classify a clicked link.
///
/// Links served by a help server on the loop-back interface are reduced to
/// their path so they resolve like any other request. Fragments on request
/// paths are dropped.
pub fn classify_link(href: &str) -> LinkTarget {
    let href = href.trim();
    if let Some(anchor) = href.strip_prefix('#') {
        return LinkTarget::Fragment(anchor.to_string());
    }

    match Url::parse(href) {
        Ok(url) if is_loop_back(&url) => {
            LinkTarget::Path(url.path().trim_start_matches('/').to_string())
        }
        Ok(_) => LinkTarget::External(href.to_string()),
        Err(_) => {
            let path = href.split(['#', '?']).next().unwrap_or_default();
            LinkTarget::Path(path.trim_start_matches('/').to_string())
        }
    }
}

fn is_loop_back(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && matches!(
            url.host_str(),
            Some("127.0.0.1" | "localhost" | "[::1]")
        )
}
