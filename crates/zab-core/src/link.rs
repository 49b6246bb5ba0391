//! Link resolution and site-specific normalization
//!
//! Listing pages link to detail pages with relative hrefs that carry
//! sort or session parameters. Each site gets its own [`LinkRule`] so that
//! two listings differing only in that parameter produce the same link.

use url::Url;

use crate::error::{Result, ScrapeError};

/// Sort marker in Bürgernetz detail links; everything after it is dropped.
pub const BUERGERNETZ_SORT_MARKER: &str = "=angebot&";

/// Site-specific rule applied to a resolved detail link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRule {
    /// Keep the URL up to and including the first occurrence of the marker.
    TruncateAfter(String),
    /// Remove every query parameter with this name, keep the rest verbatim.
    StripQueryParam(String),
    /// Leave the resolved URL untouched.
    Keep,
}

impl LinkRule {
    /// Apply the rule to an already absolute URL.
    ///
    /// Applying a rule twice gives the same result as applying it once.
    ///
    /// # Examples
    /// ```
    /// use zab_core::link::LinkRule;
    ///
    /// let rule = LinkRule::TruncateAfter("=angebot&".to_string());
    /// assert_eq!(
    ///     rule.apply("https://x.de/a?sort=angebot&page=2"),
    ///     "https://x.de/a?sort=angebot&"
    /// );
    ///
    /// let rule = LinkRule::StripQueryParam("sid".to_string());
    /// assert_eq!(rule.apply("https://x.de/p?id=4&sid=abc"), "https://x.de/p?id=4");
    /// ```
    pub fn apply(&self, url: &str) -> String {
        match self {
            LinkRule::TruncateAfter(marker) => truncate_after(url, marker),
            LinkRule::StripQueryParam(name) => strip_query_param(url, name),
            LinkRule::Keep => url.to_string(),
        }
    }

    /// Resolve `href` against `base` and apply the rule.
    ///
    /// An empty `href` resolves to `base` itself.
    ///
    /// # Errors
    /// Returns `ScrapeError::InvalidUrl` if `base` is not an absolute URL or
    /// `href` cannot be joined onto it.
    pub fn normalize(&self, base: &str, href: &str) -> Result<String> {
        let resolved = resolve(base, href)?;
        Ok(self.apply(&resolved))
    }
}

/// Resolve a possibly relative reference against a base URL.
///
/// # Examples
/// ```
/// use zab_core::link::resolve;
///
/// let url = resolve("https://x.de/zab/liste.html?q=1", "detail?id=7").unwrap();
/// assert_eq!(url, "https://x.de/zab/detail?id=7");
/// ```
pub fn resolve(base: &str, href: &str) -> Result<String> {
    let base = Url::parse(base)
        .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", base, e)))?;
    let joined = base
        .join(href.trim())
        .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", href, e)))?;
    Ok(joined.to_string())
}

fn truncate_after(url: &str, marker: &str) -> String {
    if marker.is_empty() {
        return url.to_string();
    }
    match url.find(marker) {
        Some(pos) => url[..pos + marker.len()].to_string(),
        None => url.to_string(),
    }
}

fn strip_query_param(url: &str, name: &str) -> String {
    // Fragment first: a '?' inside it is not a query separator
    let (before_fragment, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let Some((path, query)) = before_fragment.split_once('?') else {
        return url.to_string();
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| pair.split('=').next() != Some(name))
        .collect();

    if kept.is_empty() {
        format!("{}{}", path, fragment)
    } else {
        format!("{}?{}{}", path, kept.join("&"), fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_keeps_marker() {
        let rule = LinkRule::TruncateAfter(BUERGERNETZ_SORT_MARKER.to_string());
        let url = "https://www.iska-nuernberg.de/zab/buergernetz_alle.html?database%5Bsort%5D=angebot&database%5Bcsv%5D=be-stellen";
        assert_eq!(
            rule.apply(url),
            "https://www.iska-nuernberg.de/zab/buergernetz_alle.html?database%5Bsort%5D=angebot&"
        );
    }

    #[test]
    fn test_truncate_without_marker_is_unchanged() {
        let rule = LinkRule::TruncateAfter(BUERGERNETZ_SORT_MARKER.to_string());
        assert_eq!(rule.apply("https://x.de/detail?id=3"), "https://x.de/detail?id=3");
    }

    #[test]
    fn test_truncate_uses_first_marker() {
        let rule = LinkRule::TruncateAfter("=angebot&".to_string());
        assert_eq!(
            rule.apply("https://x.de/?a=angebot&b=angebot&c=1"),
            "https://x.de/?a=angebot&"
        );
    }

    #[test]
    fn test_strip_query_param_middle() {
        let rule = LinkRule::StripQueryParam("sid".to_string());
        assert_eq!(
            rule.apply("https://x.de/p.html?id=4&sid=abc&lang=de"),
            "https://x.de/p.html?id=4&lang=de"
        );
    }

    #[test]
    fn test_strip_query_param_only_param() {
        let rule = LinkRule::StripQueryParam("sid".to_string());
        assert_eq!(rule.apply("https://x.de/p.html?sid=abc"), "https://x.de/p.html");
        assert_eq!(rule.apply("https://x.de/p.html?sid=abc#top"), "https://x.de/p.html#top");
    }

    #[test]
    fn test_strip_query_param_keeps_similar_names() {
        let rule = LinkRule::StripQueryParam("sid".to_string());
        assert_eq!(
            rule.apply("https://x.de/p?sidebar=1&id=2"),
            "https://x.de/p?sidebar=1&id=2"
        );
    }

    #[test]
    fn test_strip_query_param_keeps_encoding() {
        let rule = LinkRule::StripQueryParam("sid".to_string());
        assert_eq!(
            rule.apply("https://x.de/p?q=M%C3%BCll+trennen&sid=1"),
            "https://x.de/p?q=M%C3%BCll+trennen"
        );
    }

    #[test]
    fn test_strip_query_param_no_query() {
        let rule = LinkRule::StripQueryParam("sid".to_string());
        assert_eq!(rule.apply("https://x.de/p#a?sid=1"), "https://x.de/p#a?sid=1");
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve("https://x.de/zab/liste.html", "detail?id=1").unwrap(),
            "https://x.de/zab/detail?id=1"
        );
        assert_eq!(
            resolve("https://x.de/zab/liste.html", "/other/page.html").unwrap(),
            "https://x.de/other/page.html"
        );
    }

    #[test]
    fn test_resolve_absolute_href_wins() {
        assert_eq!(
            resolve("https://x.de/zab/liste.html", "https://y.de/a").unwrap(),
            "https://y.de/a"
        );
    }

    #[test]
    fn test_resolve_empty_href_is_base() {
        assert_eq!(
            resolve("https://x.de/zab/liste.html?a=1", "").unwrap(),
            "https://x.de/zab/liste.html?a=1"
        );
    }

    #[test]
    fn test_resolve_invalid_base() {
        let result = resolve("not a url", "detail");
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[test]
    fn test_normalize_resolves_then_applies() {
        let rule = LinkRule::TruncateAfter("=angebot&".to_string());
        let link = rule
            .normalize("https://x.de/zab/liste.html", "detail.html?s=angebot&id=9")
            .unwrap();
        assert_eq!(link, "https://x.de/zab/detail.html?s=angebot&");
    }

    proptest! {
        #[test]
        fn prop_truncate_is_idempotent(url in "\\PC*") {
            let rule = LinkRule::TruncateAfter(BUERGERNETZ_SORT_MARKER.to_string());
            let once = rule.apply(&url);
            prop_assert_eq!(rule.apply(&once), once);
        }

        #[test]
        fn prop_strip_is_idempotent(url in "\\PC*") {
            let rule = LinkRule::StripQueryParam("sid".to_string());
            let once = rule.apply(&url);
            prop_assert_eq!(rule.apply(&once), once);
        }

        #[test]
        fn prop_strip_is_idempotent_on_query_urls(
            params in proptest::collection::vec(("(sid|id|lang|page)", "[a-z0-9%]{0,6}"), 0..6),
            fragment in "(#[a-z]{1,4})?",
        ) {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            let url = format!("https://x.de/p.html?{}{}", query.join("&"), fragment);
            let rule = LinkRule::StripQueryParam("sid".to_string());
            let once = rule.apply(&url);
            prop_assert!(!once.contains("sid="));
            prop_assert_eq!(rule.apply(&once), once);
        }

        #[test]
        fn prop_normalize_is_idempotent(href in "[a-z]{1,8}\\.html\\?s=angebot&[a-z]{0,5}=[0-9]{0,3}") {
            let rule = LinkRule::TruncateAfter(BUERGERNETZ_SORT_MARKER.to_string());
            let once = rule.normalize("https://x.de/zab/liste.html", &href).unwrap();
            let twice = rule.normalize("https://x.de/zab/liste.html", &once).unwrap();
            prop_assert_eq!(twice, once);
        }
    }
}
