//! Depth-tracking matcher for tags that nest inside themselves.
//!
//! Opening forms are the same as the first-close pattern: `<name>` or
//! `<name ATTRS>` where the attribute text runs to the next `>`.

use std::ops::Range;

use super::tag::TagMatch;

struct Opening {
    attrs: Range<usize>,
    end: usize,
}

/// All outermost `name` elements in `haystack`, in order.
///
/// An opening tag that is never closed is skipped and scanning resumes right
/// after its `<`.
pub(crate) fn matches<'h>(haystack: &'h str, name: &str) -> Vec<TagMatch<'h>> {
    let close = format!("</{name}>");
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = haystack[pos..].find('<') {
        let start = pos + offset;
        let Some(open) = opening_at(haystack, start, name) else {
            pos = start + 1;
            continue;
        };
        match closing_after(haystack, open.end, name, &close) {
            Some(closing) => {
                found.push(TagMatch {
                    region: start..closing.end,
                    attrs: &haystack[open.attrs],
                    inner: &haystack[open.end..closing.start],
                });
                pos = closing.end;
            }
            None => pos = start + 1,
        }
    }
    found
}

fn opening_at(haystack: &str, start: usize, name: &str) -> Option<Opening> {
    let rest = haystack[start..].strip_prefix('<')?.strip_prefix(name)?;
    let after_name = start + 1 + name.len();
    if rest.starts_with('>') {
        return Some(Opening {
            attrs: after_name..after_name,
            end: after_name + 1,
        });
    }
    let body = rest.strip_prefix(' ')?;
    // at least one attribute character before the `>`
    let gt = match body.find('>')? {
        0 => 1 + body[1..].find('>')?,
        n => n,
    };
    let attrs_start = after_name + 1;
    Some(Opening {
        attrs: attrs_start..attrs_start + gt,
        end: attrs_start + gt + 1,
    })
}

fn closing_after(haystack: &str, from: usize, name: &str, close: &str) -> Option<Range<usize>> {
    let mut depth = 1usize;
    let mut pos = from;
    while let Some(offset) = haystack[pos..].find('<') {
        let at = pos + offset;
        if haystack[at..].starts_with(close) {
            depth -= 1;
            if depth == 0 {
                return Some(at..at + close.len());
            }
            pos = at + close.len();
        } else if let Some(open) = opening_at(haystack, at, name) {
            depth += 1;
            pos = open.end;
        } else {
            pos = at + 1;
        }
    }
    None
}
