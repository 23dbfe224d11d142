//! Reversible encoding of node names into path-safe tokens.
//!
//! A flat path is stored by the backend as one string: the encoded node
//! tokens joined with the separator. Encoding percent-escapes the escape
//! character itself, the separator and ASCII control characters, so splitting
//! an encoded path on the separator never cuts through a single name.

use std::fmt::Write;

use funnel_error::{Error, Result};

/// Separator used by the session indexer when flattening paths.
pub const DEFAULT_SEPARATOR: char = '>';

/// Escape prefix; each escaped byte becomes `%XX` (uppercase hex).
pub const ESCAPE: char = '%';

/// Token reserved for the empty name, so that no valid token is empty.
pub const EMPTY_TOKEN: &str = "%_";

/// Encodes and decodes node names for one separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameCodec {
    separator: char,
}

impl Default for NameCodec {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl NameCodec {
    /// Create a codec for `separator`.
    ///
    /// The separator must not collide with the escape syntax: `%`, `_` and
    /// ASCII alphanumerics are rejected.
    pub fn new(separator: char) -> Result<Self> {
        if separator == ESCAPE || separator == '_' || separator.is_ascii_alphanumeric() {
            return Err(Error::config_invalid(format!(
                "separator '{}' collides with the token escape syntax",
                separator.escape_debug()
            ))
            .with_context("separator", separator.to_string()));
        }
        Ok(Self { separator })
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Encode a display name. Never fails.
    pub fn encode(&self, name: &str) -> String {
        if name.is_empty() {
            return EMPTY_TOKEN.to_string();
        }

        let mut out = String::with_capacity(name.len());
        for ch in name.chars() {
            if self.needs_escape(ch) {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "%{byte:02X}");
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Decode a single token back into its display name.
    ///
    /// A token that does not decode means the upstream encoding is corrupt or
    /// incompatible; the error is `DecodeFailed` and is never retryable.
    pub fn decode(&self, token: &str) -> Result<String> {
        if token == EMPTY_TOKEN {
            return Ok(String::new());
        }
        if token.is_empty() {
            return Err(Error::decode_failed(token, "empty token"));
        }

        let bytes = token.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == ESCAPE as u8 {
                let pair = bytes
                    .get(i + 1..i + 3)
                    .ok_or_else(|| Error::decode_failed(token, "truncated escape"))?;
                let (Some(hi), Some(lo)) = (hex_value(pair[0]), hex_value(pair[1])) else {
                    return Err(Error::decode_failed(token, "invalid escape"));
                };
                out.push((hi << 4) | lo);
                i += 3;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }

        String::from_utf8(out)
            .map_err(|err| Error::decode_failed(token, "invalid utf-8").set_source(err))
    }

    /// Encode every name and join the tokens into one flat path.
    pub fn encode_path<S: AsRef<str>>(&self, names: &[S]) -> String {
        let mut out = String::new();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                out.push(self.separator);
            }
            out.push_str(&self.encode(name.as_ref()));
        }
        out
    }

    /// Split an encoded flat path into decoded names, in traversal order.
    ///
    /// Splitting happens on the raw encoded string; decoding first would turn
    /// escaped separators back into split points.
    pub fn decode_path(&self, path: &str) -> Result<Vec<String>> {
        path.split(self.separator)
            .map(|token| self.decode(token))
            .collect::<Result<Vec<_>>>()
            .map_err(|err| err.with_context("path", path))
    }

    fn needs_escape(&self, ch: char) -> bool {
        ch == ESCAPE || ch == self.separator || ch.is_ascii_control()
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_error::ErrorKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_round_trip_reserved_names() {
        let codec = NameCodec::default();
        for name in [
            "",
            "login",
            ">",
            "%",
            "%_",
            "%25",
            "a>b>c",
            "checkout > payment",
            "tab\there",
            "line\nbreak",
            "zaměstnanec>日本",
        ] {
            let token = codec.encode(name);
            assert!(!token.is_empty(), "empty token for {name:?}");
            assert!(!token.contains('>'), "separator leaked for {name:?}: {token}");
            assert_eq!(codec.decode(&token).unwrap(), name);
        }
    }

    #[test]
    fn test_plain_names_are_unchanged() {
        let codec = NameCodec::default();
        assert_eq!(codec.encode("signup"), "signup");
        assert_eq!(codec.encode("a>b"), "a%3Eb");
        assert_eq!(codec.encode("100%"), "100%25");
        assert_eq!(codec.encode(""), EMPTY_TOKEN);
    }

    #[test]
    fn test_non_ascii_separator() {
        let codec = NameCodec::new('→').unwrap();
        let token = codec.encode("a→b");
        assert!(!token.contains('→'));
        assert_eq!(codec.decode(&token).unwrap(), "a→b");
    }

    #[test]
    fn test_rejects_colliding_separator() {
        for sep in ['%', '_', 'a', '7'] {
            let err = NameCodec::new(sep).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
        assert!(NameCodec::new('|').is_ok());
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = NameCodec::default();
        for token in ["", "abc%", "abc%4", "%zz", "a%_", "%FF"] {
            let err = codec.decode(token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DecodeFailed, "token {token:?}");
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_path_split_respects_escaped_separator() {
        let codec = NameCodec::default();
        let names = vec!["home", "a>b", "", "done"];
        let path = codec.encode_path(&names);
        assert_eq!(path, "home>a%3Eb>%_>done");
        assert_eq!(codec.decode_path(&path).unwrap(), names);
    }

    #[test]
    fn test_empty_segment_is_decode_failure() {
        let codec = NameCodec::default();
        let err = codec.decode_path("a>>b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailed);
        assert_eq!(err.context_value("path"), Some("a>>b"));
    }

    fn accepted_separator() -> impl Strategy<Value = char> {
        any::<char>().prop_filter("collides with the escape alphabet", |sep| {
            NameCodec::new(*sep).is_ok()
        })
    }

    /// Arbitrary strings, plus short ones dense in escape-relevant characters.
    fn name() -> impl Strategy<Value = String> {
        prop_oneof![any::<String>(), "[%_>|a\\t\\n→]{0,8}"]
    }

    proptest! {
        #[test]
        fn prop_name_round_trips(sep in accepted_separator(), name in name()) {
            let codec = NameCodec::new(sep).unwrap();
            let token = codec.encode(&name);
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains(sep), "separator {:?} leaked into {:?}", sep, token);
            prop_assert_eq!(codec.decode(&token).unwrap(), name);
        }

        #[test]
        fn prop_path_round_trips(
            sep in accepted_separator(),
            names in prop::collection::vec(name(), 1..8),
        ) {
            let codec = NameCodec::new(sep).unwrap();
            let path = codec.encode_path(&names);
            prop_assert_eq!(codec.decode_path(&path).unwrap(), names);
        }
    }
}
