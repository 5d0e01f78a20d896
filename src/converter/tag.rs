//! Tag rewriting.
//!
//! A [`TagSpec`] names the markup region to rewrite. [`Transformer::apply`]
//! finds every occurrence, hands its attributes and trimmed inner text to a
//! converter, and splices the converter's output over the whole match. Text
//! outside the matches is copied through unchanged.
//!
//! ```
//! use readme2md::{TagSpec, transform};
//!
//! let out = transform("<h2> Title </h2>", &TagSpec::name("h2"), |_, inner| {
//!     Ok(format!("## {inner}\n"))
//! })
//! .unwrap();
//! assert_eq!(out, "## Title\n");
//! ```

use std::borrow::Cow;
use std::ops::Range;

use regex::Regex;
use serde::Deserialize;

use super::attrs::Attributes;
use super::balanced;
use crate::error::Result;

/// How a closing tag is paired with its opening tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nesting {
    /// Close at the first closing delimiter, even when a tag of the same name
    /// was opened in between. `<div><div>a</div></div>` matches up to the
    /// first `</div>`.
    #[default]
    FirstClose,
    /// Count same-name opening tags and close at the delimiter that brings the
    /// depth back to zero. Only used for [`TagSpec::Name`].
    Balanced,
}

impl Nesting {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstClose => "first-close",
            Self::Balanced => "balanced",
        }
    }
}

/// Which markup region a transform targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSpec {
    /// `<name>` or `<name ATTRS>` closed by `</name>`.
    Name(String),
    /// Literal delimiters. `open` is written with its angle brackets, e.g.
    /// `<div class="code-toolbar">`; `close` may span several elements and
    /// lines.
    Delimiters { open: String, close: String },
}

impl TagSpec {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn delimiters(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self::Delimiters {
            open: open.into(),
            close: close.into(),
        }
    }

    /// The opening tag without its angle brackets.
    fn opening(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Delimiters { open, .. } => {
                let open = open.strip_prefix('<').unwrap_or(open);
                open.strip_suffix('>').unwrap_or(open)
            }
        }
    }

    fn closing(&self) -> Cow<'_, str> {
        match self {
            Self::Name(name) => Cow::Owned(format!("</{name}>")),
            Self::Delimiters { close, .. } => Cow::Borrowed(close),
        }
    }

    /// The first-close pattern: either opening form, a lazy optional body and
    /// the closing delimiter, with `.` matching newlines.
    pub fn pattern(&self) -> Result<Regex> {
        let open = regex::escape(self.opening());
        let close = regex::escape(&self.closing());
        let pattern = format!(r"(?s)(?:<{open}>|<{open} (?P<attrs>.+?)>)(?P<inner>.+?)?{close}");
        Ok(Regex::new(&pattern)?)
    }
}

/// One match region and its raw parts, all borrowed from the haystack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagMatch<'h> {
    pub(crate) region: Range<usize>,
    pub(crate) attrs: &'h str,
    pub(crate) inner: &'h str,
}

/// Applies tag rewrites with a fixed [`Nesting`] mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    nesting: Nesting,
}

impl Transformer {
    pub fn new(nesting: Nesting) -> Self {
        Self { nesting }
    }

    /// Rewrite every occurrence of `spec` in `buffer`.
    ///
    /// The converter receives the parsed attributes (empty when the tag has
    /// none) and the inner text with surrounding whitespace trimmed (empty
    /// when there is none). The first converter error aborts the call.
    pub fn apply<F>(&self, buffer: &str, spec: &TagSpec, converter: F) -> Result<String>
    where
        F: FnMut(&Attributes, &str) -> Result<String>,
    {
        let matches = match (self.nesting, spec) {
            (Nesting::Balanced, TagSpec::Name(name)) => balanced::matches(buffer, name),
            _ => first_close_matches(buffer, &spec.pattern()?),
        };
        tracing::trace!(
            tag = spec.opening(),
            nesting = self.nesting.as_str(),
            count = matches.len(),
            "Rewriting tag"
        );
        splice(buffer, matches, converter)
    }
}

/// [`Transformer::apply`] in first-close mode.
pub fn transform<F>(buffer: &str, spec: &TagSpec, converter: F) -> Result<String>
where
    F: FnMut(&Attributes, &str) -> Result<String>,
{
    Transformer::default().apply(buffer, spec, converter)
}

fn first_close_matches<'h>(haystack: &'h str, pattern: &Regex) -> Vec<TagMatch<'h>> {
    pattern
        .captures_iter(haystack)
        .filter_map(|caps| {
            let region = caps.get(0)?.range();
            Some(TagMatch {
                region,
                attrs: caps.name("attrs").map_or("", |m| m.as_str()),
                inner: caps.name("inner").map_or("", |m| m.as_str()),
            })
        })
        .collect()
}

fn splice<F>(buffer: &str, matches: Vec<TagMatch<'_>>, mut converter: F) -> Result<String>
where
    F: FnMut(&Attributes, &str) -> Result<String>,
{
    let mut out = String::with_capacity(buffer.len());
    let mut last = 0;
    for m in matches {
        let attrs = Attributes::parse(m.attrs);
        out.push_str(&buffer[last..m.region.start]);
        out.push_str(&converter(&attrs, m.inner.trim())?);
        last = m.region.end;
    }
    out.push_str(&buffer[last..]);
    Ok(out)
}
