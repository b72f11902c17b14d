//! Navigable location fragment (`#list=<key>&favs=<token>`)
//!
//! `UrlState` is the parsed projection of the fragment; `Location` is where
//! the fragment lives. The file-backed location keeps the fragment between
//! CLI invocations the way a browser tab keeps its address.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::constants::fragment::{FAVS_PARAM, LIST_PARAM};

/// Characters kept literal in list keys; everything else is escaped
const KEY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// List key and favorites token carried by the fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pub list_key: Option<String>,
    pub encoded_favorites: Option<String>,
}

impl UrlState {
    pub fn new(list_key: impl Into<String>, encoded_favorites: impl Into<String>) -> Self {
        Self {
            list_key: Some(list_key.into()),
            encoded_favorites: Some(encoded_favorites.into()),
        }
    }

    /// Parse a fragment, a `#fragment`, or a full URL containing one
    ///
    /// Query-string rules apply: `+` is a space, percent escapes are decoded,
    /// the first occurrence of a parameter wins, empty values are absent.
    pub fn parse(input: &str) -> Self {
        let fragment = match input.find('#') {
            Some(idx) => &input[idx + 1..],
            None => input,
        };

        let mut state = UrlState::default();
        for pair in fragment.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode_component(name);
            let value = decode_component(value);
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                LIST_PARAM if state.list_key.is_none() => state.list_key = Some(value),
                FAVS_PARAM if state.encoded_favorites.is_none() => {
                    state.encoded_favorites = Some(value)
                }
                _ => {}
            }
        }
        state
    }

    /// Fragment text without the leading `#`; empty when no list key
    pub fn to_fragment(&self) -> String {
        let Some(key) = &self.list_key else {
            return String::new();
        };
        let mut fragment = format!("{LIST_PARAM}={}", utf8_percent_encode(key, KEY_ESCAPE));
        if let Some(favs) = &self.encoded_favorites {
            fragment.push_str(&format!("&{FAVS_PARAM}={favs}"));
        }
        fragment
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Where the current fragment is kept
pub trait Location {
    /// Current fragment, without the leading `#`
    fn fragment(&self) -> String;
    fn set_fragment(&mut self, fragment: &str);
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryLocation {
    fragment: String,
}

#[cfg(test)]
impl MemoryLocation {
    pub fn new(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            fragment: fragment.strip_prefix('#').map(str::to_string).unwrap_or(fragment),
        }
    }
}

#[cfg(test)]
impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
    }
}

/// Fragment persisted to a small text file
#[derive(Debug)]
pub struct FileLocation {
    path: PathBuf,
    fragment: String,
}

impl FileLocation {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let fragment = fs::read_to_string(&path)
            .map(|s| s.trim().trim_start_matches('#').to_string())
            .unwrap_or_default();
        debug!(path = %path.display(), fragment = %fragment, "Opened location");
        Self { path, fragment }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Location for FileLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!(path = %parent.display(), error = %e, "Failed to create location directory");
                return;
            }
        }
        // A failed write leaves the fragment stale on disk; the store stays authoritative
        if let Err(e) = fs::write(&self.path, fragment) {
            error!(path = %self.path.display(), error = %e, "Failed to write location fragment");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_fragment() {
        let state = UrlState::parse("#list=brave-otter&favs=ABC+def");
        assert_eq!(state.list_key.as_deref(), Some("brave-otter"));
        // '+' decodes to a space, the codec maps it back
        assert_eq!(state.encoded_favorites.as_deref(), Some("ABC def"));
    }

    #[test]
    fn test_parse_url_with_fragment() {
        let state = UrlState::parse("https://example.com/map?x=1#list=my%20list");
        assert_eq!(state.list_key.as_deref(), Some("my list"));
        assert_eq!(state.encoded_favorites, None);
    }

    #[test]
    fn test_parse_empty_and_missing() {
        assert_eq!(UrlState::parse(""), UrlState::default());
        assert_eq!(UrlState::parse("#"), UrlState::default());
        assert_eq!(UrlState::parse("list=&favs="), UrlState::default());
        assert_eq!(UrlState::parse("other=1"), UrlState::default());
    }

    #[test]
    fn test_parse_first_occurrence_wins() {
        let state = UrlState::parse("list=a&list=b");
        assert_eq!(state.list_key.as_deref(), Some("a"));
    }

    #[test]
    fn test_parse_plus_in_key_is_space() {
        let state = UrlState::parse("list=day+one");
        assert_eq!(state.list_key.as_deref(), Some("day one"));
    }

    #[test]
    fn test_to_fragment() {
        assert_eq!(UrlState::default().to_fragment(), "");
        assert_eq!(
            UrlState::new("brave-otter", "Q").to_fragment(),
            "list=brave-otter&favs=Q"
        );
        let no_favs = UrlState {
            list_key: Some("x".to_string()),
            encoded_favorites: None,
        };
        assert_eq!(no_favs.to_fragment(), "list=x");
    }

    #[test]
    fn test_to_fragment_escapes_key() {
        let state = UrlState::new("Day 1 & more", "Q");
        let fragment = state.to_fragment();
        assert_eq!(fragment, "list=Day%201%20%26%20more&favs=Q");
        assert_eq!(UrlState::parse(&fragment), state);
    }

    #[test]
    fn test_memory_location_strips_hash() {
        let location = MemoryLocation::new("#list=a");
        assert_eq!(location.fragment(), "list=a");
    }

    #[test]
    fn test_file_location_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("location");

        let mut location = FileLocation::open(&path);
        assert_eq!(location.fragment(), "");
        location.set_fragment("list=brave-otter&favs=Q");

        let reopened = FileLocation::open(&path);
        assert_eq!(reopened.fragment(), "list=brave-otter&favs=Q");
    }
}
