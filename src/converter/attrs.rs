//! Attribute blocks: `name="value"` pairs taken from an opening tag.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// One whitespace-led `name="value"` pair. Values cannot contain escaped quotes.
static ATTRIBUTE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+(.+?)="([^"]*)""#).expect("invalid attribute regex"));

/// Attributes parsed from one tag match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    /// Parse the text between the tag name and the closing `>`.
    ///
    /// Anything that does not look like `name="value"` is ignored, so a
    /// malformed block gives an empty map rather than an error. A repeated
    /// name keeps its last value.
    pub fn parse(block: &str) -> Self {
        if block.is_empty() {
            return Self::default();
        }
        let padded = format!(" {block}");
        let values = ATTRIBUTE_PAIR
            .captures_iter(&padded)
            .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing attribute is an error naming `tag`.
    pub fn require(&self, tag: &str, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::MissingAttribute {
            tag: tag.to_owned(),
            attribute: name.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
