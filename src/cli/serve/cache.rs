//! Cache-control header policies.
//!
//! Two fixed policies cover the whole URL space: fingerprinted paths get
//! the forever set (their content can never change under that name),
//! everything else gets the no-cache set so stale logical URLs are
//! re-resolved on every visit.

use tiny_http::Header;

/// One year, shared caches included. Safe only for content-addressed paths.
const FOREVER: &str =
    "public, max-age=31536000, s-maxage=31536000, must-revalidate, proxy-revalidate, immutable";

/// Deny caching at every layer, HTTP/1.0 proxies included.
const NO_CACHE: &str = "no-cache, no-store, no-transform, must-revalidate, private, max-age=0";

/// Headers for an immutable fingerprinted asset.
pub fn forever() -> Vec<Header> {
    vec![make_header("Cache-Control", FOREVER)]
}

/// Headers for everything that is not content-addressed.
pub fn none() -> Vec<Header> {
    vec![
        make_header("Cache-Control", NO_CACHE),
        make_header("Pragma", "no-cache"),
        make_header("X-Accel-Expires", "0"),
    ]
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of<'a>(headers: &'a [Header], field: &str) -> Option<String> {
        headers
            .iter()
            .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(field))
            .map(|h| h.value.to_string())
    }

    #[test]
    fn test_forever_is_immutable_for_a_year() {
        let headers = forever();
        let cc = value_of(&headers, "Cache-Control").unwrap();
        assert!(cc.contains("max-age=31536000"));
        assert!(cc.contains("s-maxage=31536000"));
        assert!(cc.contains("immutable"));
        assert!(cc.contains("public"));
        assert!(!cc.contains("no-store"));
    }

    #[test]
    fn test_none_denies_every_cache_layer() {
        let headers = none();
        let cc = value_of(&headers, "Cache-Control").unwrap();
        assert!(cc.contains("no-cache"));
        assert!(cc.contains("no-store"));
        assert!(cc.contains("private"));
        assert!(cc.contains("max-age=0"));

        assert_eq!(value_of(&headers, "Pragma").as_deref(), Some("no-cache"));
        assert_eq!(value_of(&headers, "X-Accel-Expires").as_deref(), Some("0"));
    }
}
