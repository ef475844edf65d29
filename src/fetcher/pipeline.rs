//! Charset detection, decoding and relabeling for fetched documents.
//!
//! Pages routinely declare one charset and serve another. We detect the real
//! encoding (header, then `<meta>` scan, then chardetng), decode to UTF-8,
//! and rewrite the declared `charset=` token so the declaration matches the
//! bytes we actually hand downstream.

use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

static CHARSET_DECL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(charset\s*=\s*["']?)([^"'\s;/>]+)"#).unwrap());

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> PageResponse {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = normalize_charset_decl(&decode_to_utf8(&body_bytes, &charset));

    PageResponse {
        url_final,
        status,
        body_raw: body_bytes,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    }
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Content-Type header
    if let Some(captures) = CHARSET_REGEX.captures(content_type)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().to_lowercase().as_bytes())
    {
        return Charset::from_encoding(encoding);
    }

    // 2. <meta charset> / http-equiv scan in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(captures) = META_CHARSET_REGEX.captures(&search_str)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().to_lowercase().as_bytes())
    {
        return Charset::from_encoding(encoding);
    }

    if let Some(captures) = META_HTTP_EQUIV_REGEX.captures(&search_str)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().to_lowercase().as_bytes())
    {
        return Charset::from_encoding(encoding);
    }

    // 3. chardetng heuristics
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    Charset::from_encoding(detector.guess(None, true))
}

/// Lossy decode: invalid sequences become replacement characters rather than
/// failing the crawl, since non-HTML bodies (direct image URLs) flow through
/// this path too.
fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = match charset {
        Charset::Utf8 => encoding_rs::UTF_8,
        Charset::Latin1 | Charset::Iso88591 => encoding_rs::WINDOWS_1252,
        Charset::Windows1252 => encoding_rs::WINDOWS_1252,
        Charset::ShiftJis => encoding_rs::SHIFT_JIS,
        Charset::Gb2312 => encoding_rs::GBK,
        Charset::Big5 => encoding_rs::BIG5,
        Charset::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
    };

    let (decoded, _encoding, _had_errors) = encoding.decode(body_bytes);
    decoded.into_owned()
}

/// Rewrites declared `charset=` tokens to `utf-8`. The decoded body is UTF-8
/// regardless of what the page claimed, so a stale declaration would make a
/// downstream parser re-decode with a Latin default.
fn normalize_charset_decl(body: &str) -> String {
    CHARSET_DECL_REGEX
        .replace_all(body, "${1}utf-8")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_charset_from_content_type() {
        let content_type = "text/html; charset=utf-8";
        let body = b"<html><head><title>Test</title></head></html>";

        let charset = detect_charset(content_type, body);
        assert!(matches!(charset, Charset::Utf8));
    }

    #[test]
    fn test_detect_charset_from_meta_tag() {
        let content_type = "text/html";
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";

        let charset = detect_charset(content_type, body);
        // ISO-8859-1 maps to Windows1252 in encoding_rs since it's a superset
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn test_detect_charset_from_meta_http_equiv() {
        let content_type = "text/html";
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><title>Test</title></head></html>";

        let charset = detect_charset(content_type, body);
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn test_decode_windows_1252() {
        // 0xE9 is 'é' in windows-1252
        let body = b"caf\xe9";
        let decoded = decode_to_utf8(body, &Charset::Windows1252);
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_relabels_declared_charset() {
        let body = r#"<html><head><meta charset="ISO-8859-1"></head><body>ok</body></html>"#;
        let relabeled = normalize_charset_decl(body);
        assert!(relabeled.contains(r#"charset="utf-8""#));
        assert!(!relabeled.contains("ISO-8859-1"));
    }

    #[test]
    fn test_process_response_decodes_and_relabels() {
        let body = Bytes::from_static(
            b"<html><head><meta charset=\"iso-8859-1\"></head><body>caf\xe9</body></html>",
        );
        let resp = process_response(
            Url::parse("http://example.com").unwrap(),
            StatusCode::OK,
            body,
            "text/html",
        );
        assert!(resp.body_utf8.contains("café"));
        assert!(resp.body_utf8.contains("charset=\"utf-8\""));
        assert!(matches!(resp.charset, Charset::Windows1252));
    }
}
