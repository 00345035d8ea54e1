//! Regex-based HTML helpers: visible text, title and anchor hrefs.
//!
//! Pages are only mined for prose and links, so a tolerant regex pass is
//! enough and keeps the crawler free of a DOM dependency.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref NON_CONTENT_BLOCKS: Vec<Regex> = [
        "head", "script", "style", "noscript", "template", "svg", "nav", "header", "footer",
        "aside",
    ]
    .iter()
    .map(|tag| Regex::new(&format!(r"(?is)<{0}\b[^>]*>.*?</{0}\s*>", tag)).unwrap())
    .collect();
    static ref BLOCK_BREAK: Regex =
        Regex::new(r"(?i)<(br|/p|/div|/li|/h[1-6]|/tr|/section|/article)\b[^>]*>").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]+>").unwrap();
    static ref INLINE_SPACE: Regex = Regex::new(r"[ \t\u{3000}\u{a0}]+").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n+").unwrap();
    static ref TITLE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    static ref HREF: Regex =
        Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap();
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap();
}

/// Extract the visible prose of a page, truncated to `max_chars` characters.
///
/// Scripts, styles, navigation, headers and footers are dropped before the
/// remaining tags are stripped.
pub fn visible_text(html: &str, max_chars: usize) -> String {
    let text = COMMENT.replace_all(html, "");
    let text = NON_CONTENT_BLOCKS
        .iter()
        .fold(text.into_owned(), |acc, block| block.replace_all(&acc, "").into_owned());
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, " ");
    let text = decode_entities(&text);
    let text = INLINE_SPACE.replace_all(&text, " ");

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let text = lines.join("\n");
    let text = BLANK_LINES.replace_all(&text, "\n");

    truncate_chars(text.trim(), max_chars).to_string()
}

/// Extract the document title, if any.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| {
            let title = TAG.replace_all(m.as_str(), "");
            let title = decode_entities(&title);
            INLINE_SPACE.replace_all(title.trim(), " ").to_string()
        })
        .filter(|title| !title.is_empty())
}

/// Raw `href` values of every anchor, in document order.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    let html = COMMENT.replace_all(html, "");
    HREF.captures_iter(&html)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)).or_else(|| cap.get(3)))
        .map(|m| decode_entities(m.as_str().trim()))
        .filter(|href| !href.is_empty())
        .collect()
}

/// Truncate at a char boundary, never splitting a multi-byte character.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_strips_chrome() {
        let html = r#"
            <html><head><title>ニュース</title><style>.a{color:red}</style></head>
            <body>
              <header><a href="/">ロゴ</a></header>
              <nav><ul><li>メニュー</li></ul></nav>
              <script>var x = "hidden";</script>
              <h1>新工場を稼働</h1>
              <p>2024年4月、北九州に新工場を稼働しました。</p>
              <footer>Copyright</footer>
            </body></html>
        "#;

        let text = visible_text(html, 1000);
        assert!(text.contains("新工場を稼働"));
        assert!(text.contains("2024年4月、北九州に新工場を稼働しました。"));
        assert!(!text.contains("メニュー"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("color:red"));
    }

    #[test]
    fn test_visible_text_truncates_on_char_boundary() {
        let html = "<p>あいうえおかきくけこ</p>";
        assert_eq!(visible_text(html, 3), "あいう");
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>R&amp;D&nbsp;center &#x6771;&#20140;</p>";
        assert_eq!(visible_text(html, 100), "R&D center 東京");
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("<html><head><title> 会社概要 | Example </title></head></html>"),
            Some("会社概要 | Example".to_string())
        );
        assert_eq!(extract_title("<html><body>No title</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
    }

    #[test]
    fn test_anchor_hrefs_in_document_order() {
        let html = r##"
            <a href="/news/2024/0401.html">A</a>
            <a class="x" href='/news/2024/0315.html'>B</a>
            <!-- <a href="/news/hidden.html">C</a> -->
            <a href=/news/2024/0301.html>D</a>
            <a name="anchor">no href</a>
        "##;

        assert_eq!(
            anchor_hrefs(html),
            vec![
                "/news/2024/0401.html",
                "/news/2024/0315.html",
                "/news/2024/0301.html",
            ]
        );
    }
}
