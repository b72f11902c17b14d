//! Compression codec for favorites tokens
//!
//! Booth labels are joined with commas and compressed into lz-string's
//! "encoded URI component" alphabet, so tokens are fragment-safe and links
//! made by the web front end decode unchanged.

use tracing::debug;

use crate::constants::codec::DELIMITER;
use crate::error::CodecError;

/// Encode a sequence of booth labels into a URL-safe token
pub fn encode<S: AsRef<str>>(labels: &[S]) -> String {
    let joined = labels
        .iter()
        .map(|label| label.as_ref())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string());
    lz_str::compress_to_encoded_uri_component(joined.as_str())
}

/// Decode a token back into booth labels
///
/// Items are trimmed and empty items dropped, so `decode(encode(s))` equals
/// `s` after the same normalization.
pub fn decode(token: &str) -> Result<Vec<String>, CodecError> {
    // Query-string parsing turns '+' into ' '; the alphabet uses '+'
    let token = token.trim().replace(' ', "+");
    if token.is_empty() {
        return Ok(Vec::new());
    }

    let wide = lz_str::decompress_from_encoded_uri_component(token.as_str())
        .ok_or(CodecError::Decompress)?;
    let joined = String::from_utf16(&wide).map_err(|_| CodecError::InvalidUtf16)?;

    let labels = split_labels(&joined);
    debug!(count = labels.len(), "Decoded favorites token");
    Ok(labels)
}

/// Split a comma-joined label string, trimming and dropping empty items
pub fn split_labels(joined: &str) -> Vec<String> {
    joined
        .split(DELIMITER)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_labels() {
        let labels = vec!["A1", "B12", "C3-4", "Hall 2 / 17"];
        let token = encode(&labels);
        assert_eq!(decode(&token).unwrap(), labels);
    }

    #[test]
    fn test_round_trip_empty_sequence() {
        let labels: Vec<String> = Vec::new();
        let token = encode(&labels);
        assert_eq!(decode(&token).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_round_trip_normalizes_whitespace_and_empty_items() {
        let labels = vec![" A1 ", "", "   ", "B2"];
        let token = encode(&labels);
        assert_eq!(decode(&token).unwrap(), vec!["A1", "B2"]);
    }

    #[test]
    fn test_token_is_fragment_safe() {
        let labels: Vec<String> = (0..200).map(|i| format!("X{i}")).collect();
        let token = encode(&labels);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '$'),
            "unexpected character in token {token}"
        );
    }

    #[test]
    fn test_decode_accepts_plus_decoded_as_space() {
        // Find a token containing '+' and feed it back the way a query parser would
        let token = (0..500)
            .map(|i| encode(&[format!("booth-{i}"), format!("Z{}", i * 7)]))
            .find(|t| t.contains('+'))
            .expect("some token contains '+'");
        let mangled = token.replace('+', " ");
        assert_eq!(decode(&mangled).unwrap(), decode(&token).unwrap());
    }

    #[test]
    fn test_decode_empty_token() {
        assert_eq!(decode("").unwrap(), Vec::<String>::new());
        assert_eq!(decode("   ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_decode_foreign_input_does_not_panic() {
        for junk in ["%%%", "not a token at all!", "\u{1F600}", "$$$$$$$$", "A"] {
            // Either an error or some labels; never a panic
            let _ = decode(junk);
        }
    }

    #[test]
    fn test_split_labels() {
        assert_eq!(split_labels("A1, B2 ,,C3"), vec!["A1", "B2", "C3"]);
        assert!(split_labels("").is_empty());
    }
}
