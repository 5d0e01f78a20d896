use super::Context;
use crate::converter::TagSpec;
use crate::error::Result;

/// An `<a>` without `href` fails the stage instead of producing an
/// `(undefined)` link target.
pub(super) fn link(buffer: &str, cx: &Context<'_>) -> Result<String> {
    cx.transform(buffer, &TagSpec::name("a"), |attrs, inner| {
        let href = attrs.require("a", "href")?;
        Ok(format!("[{inner}]({href})"))
    })
}

pub(super) fn strong(buffer: &str, cx: &Context<'_>) -> Result<String> {
    cx.transform(buffer, &TagSpec::name("strong"), |_, inner| {
        Ok(format!("**{inner}**"))
    })
}

/// Only `&lt;` and `&gt;`; other entities stay as exported.
pub(super) fn unescape_entities(buffer: &str, _cx: &Context<'_>) -> Result<String> {
    Ok(buffer.replace("&lt;", "<").replace("&gt;", ">"))
}

pub(super) fn code(buffer: &str, cx: &Context<'_>) -> Result<String> {
    cx.transform(buffer, &TagSpec::name("code"), |_, inner| Ok(format!("`{inner}`")))
}
