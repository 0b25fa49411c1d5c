//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a query component
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/first-post") // -> "/site/blog/first-post"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the configured domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.site_url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Canonical URL of a request.
///
/// With `site_url` configured this is the site URL followed by the request
/// path. Otherwise the absolute URI the request arrived with is used as is.
pub fn canonical_url(config: &SiteConfig, path: &str, absolute_uri: &str) -> String {
    let base = config.site_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return absolute_uri.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encode a single query component
pub fn encode_query_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Build `key=value&...` from pairs, keeping their order. Empty input gives "".
pub fn query_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", encode_query_component(k), encode_query_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Split a raw query string into decoded pairs, repeated keys included
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            site_url: "https://example.com/".to_string(),
            root: "/site/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog/first"), "/site/blog/first");
        assert_eq!(url_for(&config, "projects"), "/site/projects");
        assert_eq!(url_for(&config, ""), "/site/");
        assert_eq!(url_for(&SiteConfig::default(), "blog"), "/blog");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/"),
            "https://example.com/site/blog/"
        );
    }

    #[test]
    fn test_canonical_url_uses_site_url() {
        let config = test_config();
        assert_eq!(
            canonical_url(&config, "/blog", "http://localhost:4000/blog?page=2"),
            "https://example.com/blog"
        );
    }

    #[test]
    fn test_canonical_url_falls_back_to_request() {
        let config = SiteConfig::default();
        assert_eq!(
            canonical_url(&config, "/blog", "http://localhost:4000/blog?page=2"),
            "http://localhost:4000/blog?page=2"
        );
    }

    #[test]
    fn test_query_string_encodes() {
        let query = query_string([("category", "c++ & rust"), ("page", "2")]);
        assert_eq!(query, "category=c%2B%2B%20%26%20rust&page=2");
        assert_eq!(query_string(Vec::<(&str, &str)>::new()), "");
    }

    #[test]
    fn test_parse_query_keeps_repeats() {
        let pairs = parse_query("?tag=a&tag=b%20c&page=3&category=x+y&flag");
        assert_eq!(
            pairs,
            vec![
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b c".to_string()),
                ("page".to_string(), "3".to_string()),
                ("category".to_string(), "x y".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }
}
