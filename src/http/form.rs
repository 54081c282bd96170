//! `application/x-www-form-urlencoded` decoding for request bodies and query strings.

use std::collections::HashMap;

/// Decodes URL-encoded `key=value&...` pairs.
///
/// `+` and percent escapes are decoded. When a key repeats, the first value is kept.
pub fn parse(body: &[u8]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        fields
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    fields
}
