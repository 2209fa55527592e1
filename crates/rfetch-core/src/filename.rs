//! Local filename derivation for saved fetches.
//!
//! Prefers the Content-Disposition header (quoted, token, and RFC 5987
//! `filename*` forms), falls back to the last URL path segment, and sanitizes
//! the result for Linux filesystems.

/// Default filename when URL path and Content-Disposition yield nothing usable.
const DEFAULT_FILENAME: &str = "fetch.out";

/// Derives a safe filename for saving a fetched body.
///
/// # Examples
///
/// - `derive_filename("https://example.com/archive.zip", None)` → `"archive.zip"`
/// - `derive_filename("https://example.com/", Some("attachment; filename=\"report.pdf\""))` → `"report.pdf"`
pub fn derive_filename(url: &str, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(content_disposition_filename)
        .filter(|s| !s.is_empty())
        .or_else(|| filename_from_url_path(url));

    let raw = match candidate {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Last non-empty path segment of the URL, or `None` for root/unparseable URLs.
fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Extracts the filename from a Content-Disposition header value.
///
/// `filename*=UTF-8''percent-encoded` (RFC 5987) takes precedence over a
/// plain `filename=` token or quoted string.
fn content_disposition_filename(header_value: &str) -> Option<String> {
    let mut from_token: Option<String> = None;

    for param in header_value.trim().split(';') {
        let param = param.trim();
        if let Some((name, v)) = param.split_once('=') {
            let name = name.trim().to_ascii_lowercase();
            let v = v.trim();

            if name == "filename*" {
                if let Some(rest) = v
                    .strip_prefix("UTF-8''")
                    .or_else(|| v.strip_prefix("utf-8''"))
                {
                    let decoded = percent_decode(rest);
                    if !decoded.is_empty() {
                        return Some(decoded);
                    }
                }
            }

            if name == "filename" {
                let unquoted = if v.starts_with('"') && v.ends_with('"') && v.len() >= 2 {
                    v[1..v.len() - 1].replace("\\\"", "\"").replace("\\\\", "\\")
                } else {
                    v.to_string()
                };
                if !unquoted.is_empty() {
                    from_token = Some(unquoted);
                }
            }
        }
    }

    from_token
}

/// Percent-decode an RFC 5987 value; malformed escapes pass through literally.
fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let h = bytes.next().and_then(hex_digit);
            let l = bytes.next().and_then(hex_digit);
            match (h, l) {
                (Some(high), Some(low)) => out.push(high << 4 | low),
                _ => out.push(b'%'),
            }
        } else {
            out.push(b);
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Strip characters unsafe in Linux filenames: `/`, NUL, and control chars;
/// trim leading/trailing dots and spaces.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| *c != '/' && *c != '\0' && !c.is_control())
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == ' ').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_path() {
        assert_eq!(
            derive_filename("https://example.com/a/b/data.tar.gz", None),
            "data.tar.gz"
        );
        assert_eq!(
            derive_filename("https://example.com/file.zip?token=abc", None),
            "file.zip"
        );
    }

    #[test]
    fn root_url_falls_back_to_default() {
        assert_eq!(derive_filename("https://example.com/", None), "fetch.out");
        assert_eq!(derive_filename("https://example.com", None), "fetch.out");
    }

    #[test]
    fn content_disposition_overrides_url() {
        assert_eq!(
            derive_filename(
                "https://example.com/archive.zip",
                Some("attachment; filename=\"real-name.tar.gz\"")
            ),
            "real-name.tar.gz"
        );
        assert_eq!(
            derive_filename("https://example.com/x", Some("attachment; filename=simple.bin")),
            "simple.bin"
        );
    }

    #[test]
    fn rfc5987_filename_star_takes_precedence() {
        assert_eq!(
            derive_filename(
                "https://example.com/x",
                Some("attachment; filename=\"plain.txt\"; filename*=UTF-8''na%C3%AFve.txt")
            ),
            "naïve.txt"
        );
    }

    #[test]
    fn sanitizes_hostile_names() {
        assert_eq!(
            derive_filename("https://example.com/x", Some("attachment; filename=\"a/b\"")),
            "ab"
        );
        assert_eq!(
            derive_filename("https://example.com/x", Some("attachment; filename=\"..\"")),
            "fetch.out"
        );
    }
}
