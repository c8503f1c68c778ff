// file: src/fetch/rules.rs
// description: site-aware extraction rule registry keyed by URL host
// reference: per-site DOM scopes for content extraction

use url::Url;

/// Extraction rule variants, one per known site plus a generic fallback.
///
/// Adding a site means adding a variant and a registry entry, not a branch
/// in the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteRule {
    Arxiv,
    Wikipedia,
    Medium,
    Default,
}

/// Host-substring registry, evaluated in fixed priority order.
const HOST_RULES: &[(&str, SiteRule)] = &[
    ("arxiv.org", SiteRule::Arxiv),
    ("wikipedia.org", SiteRule::Wikipedia),
    ("medium.com", SiteRule::Medium),
];

impl SiteRule {
    /// Picks the rule for a URL by substring match on its host.
    ///
    /// Unparseable URLs and unknown hosts fall back to `Default`.
    pub fn for_url(url: &str) -> Self {
        let host = match Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => host.to_ascii_lowercase(),
                None => return SiteRule::Default,
            },
            Err(_) => return SiteRule::Default,
        };

        for (pattern, rule) in HOST_RULES {
            if host.contains(pattern) {
                return *rule;
            }
        }

        SiteRule::Default
    }

    /// CSS selector for the DOM scope this rule extracts from.
    pub fn scope_selector(&self) -> &'static str {
        match self {
            SiteRule::Arxiv => "blockquote.abstract",
            SiteRule::Wikipedia => "div#mw-content-text",
            SiteRule::Medium => "article",
            SiteRule::Default => "body",
        }
    }

    /// Literal prefix stripped from the extracted text, if any.
    pub fn strip_prefix(&self) -> Option<&'static str> {
        match self {
            SiteRule::Arxiv => Some("Abstract:"),
            _ => None,
        }
    }
}
