//! Response header parsing.

/// Metadata headers of interest, parsed from the raw response header lines.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
    /// `Content-Disposition` value if present (filename hint).
    pub content_disposition: Option<String>,
    /// `ETag` value if present.
    pub etag: Option<String>,
    /// `Last-Modified` value if present.
    pub last_modified: Option<String>,
    /// True if the server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

/// Parse collected header lines into [`ResponseMeta`].
///
/// Lines from all responses in a redirect chain may be present; later values
/// overwrite earlier ones, so the final response wins.
pub fn parse_header_lines(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    meta.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-disposition") {
                meta.content_disposition = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("etag") {
                meta.etag = Some(value.trim_matches('"').to_string());
            }
            if name.eq_ignore_ascii_case("last-modified") {
                meta.last_modified = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                meta.accept_ranges = value.eq_ignore_ascii_case("bytes");
            }
        }
    }

    meta
}
