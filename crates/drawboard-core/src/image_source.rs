//! Helpers for background image sources.

use url::{Position, Url};

/// Pull an image URL out of host input.
///
/// Input that already starts with `http` is returned unchanged. Otherwise
/// the first `src=` attribute (case-insensitive, quotes optional) is used.
pub fn extract_image_src(input: &str) -> Option<&str> {
    if input.starts_with("http") {
        return Some(input);
    }

    let lower = input.to_ascii_lowercase();
    let start = lower.find("src=")? + "src=".len();
    let rest = &input[start..];
    let rest = rest.strip_prefix(['\'', '"']).unwrap_or(rest);
    let end = rest.find(['\'', '"']).unwrap_or(rest.len());
    let src = &rest[..end];
    (!src.is_empty()).then_some(src)
}

/// Rewrite an absolute `http(s)` URL to a root-relative one (`/path?query`).
///
/// With `keep_slash` false the leading `/` is dropped too. Anything that is
/// not an absolute http(s) URL is returned unchanged.
pub fn to_root_relative(raw: &str, keep_slash: bool) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return raw.to_string();
    }

    let relative = &url[Position::BeforePath..];
    if keep_slash {
        relative.to_string()
    } else {
        relative.trim_start_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_url() {
        let url = "https://cdn.example.com/a.png";
        assert_eq!(extract_image_src(url), Some(url));
    }

    #[test]
    fn test_extract_from_markup() {
        assert_eq!(
            extract_image_src(r#"<img class="x" SRC="/files/page1.jpg" alt="">"#),
            Some("/files/page1.jpg")
        );
        assert_eq!(
            extract_image_src("<img src='a.png'>"),
            Some("a.png")
        );
        assert_eq!(extract_image_src("<img src=b.png>"), Some("b.png>"));
        assert_eq!(extract_image_src("<p>no image</p>"), None);
        assert_eq!(extract_image_src(r#"<img src="">"#), None);
    }

    #[test]
    fn test_to_root_relative() {
        assert_eq!(
            to_root_relative("https://example.com/img/a.png?v=2", true),
            "/img/a.png?v=2"
        );
        assert_eq!(
            to_root_relative("http://example.com:8080/img/a.png", false),
            "img/a.png"
        );
        assert_eq!(to_root_relative("/already/relative.png", true), "/already/relative.png");
        let inline = "data:image/png;base64,AAAA";
        assert_eq!(to_root_relative(inline, true), inline);
    }
}
