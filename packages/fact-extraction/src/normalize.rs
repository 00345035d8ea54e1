//! URL canonicalization used as the dedup key everywhere a URL is tracked.

use url::Url;

/// Two-letter first path segments treated as locale prefixes (`/jp/...`).
///
/// Section codes that happen to be two letters (`/ir`) are deliberately absent.
pub const LOCALE_CODES: &[&str] = &[
    "jp", "ja", "en", "us", "uk", "gb", "zh", "cn", "tw", "hk", "kr", "ko", "fr", "de", "es",
    "it", "th", "vn", "id", "sg", "my", "in", "au", "br", "pt", "ru", "nl", "ph",
];

/// Canonicalize a URL: drop query and fragment, collapse `index.html` /
/// `index.htm`, drop trailing slashes and return `origin + path`.
///
/// Scheme and host are lowercased by the parser and default ports vanish,
/// so equivalent spellings collapse to one key. Strings that are not
/// absolute HTTP(S) URLs get the same suffix treatment on the raw text.
///
/// Idempotent: `normalize_url(&normalize_url(u)) == normalize_url(u)`.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if is_web_url(&url) => {
            let origin = url.origin().ascii_serialization();
            format!("{}{}", origin, trim_path(url.path()))
        }
        _ => {
            let end = raw.find(['?', '#']).unwrap_or(raw.len());
            trim_path(&raw[..end]).to_string()
        }
    }
}

/// True when both URLs normalize to the same key.
pub fn same_page(a: &str, b: &str) -> bool {
    normalize_url(a) == normalize_url(b)
}

/// Return the locale prefix segment of a path (`/jp/news` -> `Some("jp")`).
pub fn locale_prefix(path: &str) -> Option<&str> {
    let first = path.trim_start_matches('/').split('/').next()?;
    let lower = first.to_ascii_lowercase();
    LOCALE_CODES
        .iter()
        .find(|code| **code == lower)
        .map(|_| first)
}

/// Remove a leading locale segment from a path (`/jp/ir/` -> `/ir/`).
pub fn strip_locale_prefix(path: &str) -> &str {
    match locale_prefix(path) {
        Some(prefix) => {
            let trimmed = path.trim_start_matches('/');
            &trimmed[prefix.len()..]
        }
        None => path,
    }
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.has_host()
}

fn trim_path(path: &str) -> &str {
    let mut current = path;
    loop {
        let before = current.len();
        current = current.trim_end_matches('/');
        for suffix in ["/index.html", "/index.htm"] {
            if current.len() >= suffix.len()
                && current[current.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
            {
                current = &current[..current.len() - suffix.len()];
            }
        }
        if current.len() == before {
            return current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(
            normalize_url("https://example.com/news/?page=2#top"),
            "https://example.com/news"
        );
    }

    #[test]
    fn test_index_and_trailing_slash_collapse() {
        let variants = [
            "https://example.com/ir",
            "https://example.com/ir/",
            "https://example.com/ir/index.html",
            "https://example.com/ir/index.htm",
            "https://EXAMPLE.com/ir/INDEX.HTML",
            "https://example.com:443/ir/",
        ];
        for v in variants {
            assert_eq!(normalize_url(v), "https://example.com/ir", "variant {}", v);
        }
    }

    #[test]
    fn test_root_normalizes_to_origin() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com");
        assert_eq!(normalize_url("https://example.com/index.html"), "https://example.com");
        assert_eq!(normalize_url("http://example.com:8080/"), "http://example.com:8080");
    }

    #[test]
    fn test_non_web_input_is_trimmed_textually() {
        assert_eq!(normalize_url("/news/index.html?x=1"), "/news");
        assert_eq!(normalize_url("not a url/"), "not a url");
    }

    #[test]
    fn test_same_page() {
        assert!(same_page("https://example.com/a/", "https://example.com/a#b"));
        assert!(!same_page("https://example.com/a", "https://example.com/b"));
    }

    #[test]
    fn test_locale_prefix() {
        assert_eq!(locale_prefix("/jp/news"), Some("jp"));
        assert_eq!(locale_prefix("/JA/"), Some("JA"));
        assert_eq!(locale_prefix("/ir/library"), None);
        assert_eq!(locale_prefix("/news"), None);
        assert_eq!(locale_prefix("/"), None);
        assert_eq!(strip_locale_prefix("/jp/ir/"), "/ir/");
        assert_eq!(strip_locale_prefix("/company"), "/company");
    }

    fn url_strategy() -> impl Strategy<Value = String> {
        (
            prop_oneof![Just("http"), Just("https"), Just("HTTPS")],
            prop_oneof![Just("example.com"), Just("Example.CO.jp"), Just("sub.example.org")],
            prop::collection::vec("[a-z0-9-]{1,8}", 0..4),
            prop_oneof![Just(""), Just("/"), Just("/index.html"), Just("/index.htm/")],
            prop::option::of("[a-z]{1,5}=[a-z0-9]{0,5}"),
            prop::option::of("[a-z]{1,6}"),
        )
            .prop_map(|(scheme, host, segments, tail, query, fragment)| {
                let mut url = format!("{}://{}", scheme, host);
                for segment in segments {
                    url.push('/');
                    url.push_str(&segment);
                }
                url.push_str(tail);
                if let Some(q) = query {
                    url.push('?');
                    url.push_str(&q);
                }
                if let Some(f) = fragment {
                    url.push('#');
                    url.push_str(&f);
                }
                url
            })
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(url in url_strategy()) {
            let once = normalize_url(&url);
            prop_assert_eq!(normalize_url(&once), once.clone());
            prop_assert!(!once.ends_with('/'));
            prop_assert!(!once.contains('?'));
            prop_assert!(!once.contains('#'));
        }

        #[test]
        fn trailing_slash_is_irrelevant(url in url_strategy()) {
            let base = normalize_url(&url);
            prop_assert_eq!(normalize_url(&format!("{}/", base)), base.clone());
            prop_assert_eq!(normalize_url(&format!("{}/index.html", base)), base);
        }
    }
}
