//! Sections, headings, paragraphs and lists.

use super::Context;
use crate::converter::TagSpec;
use crate::error::Result;

pub(super) fn section(buffer: &str, cx: &Context<'_>) -> Result<String> {
    cx.transform(buffer, &TagSpec::name("section"), |_, inner| {
        Ok(inner.to_owned())
    })
}

pub(super) fn heading<const LEVEL: usize>(buffer: &str, cx: &Context<'_>) -> Result<String> {
    let marker = "#".repeat(LEVEL);
    cx.transform(buffer, &TagSpec::name(format!("h{LEVEL}")), |_, inner| {
        Ok(format!("{marker} {inner}\n"))
    })
}

pub(super) fn paragraph(buffer: &str, cx: &Context<'_>) -> Result<String> {
    cx.transform(buffer, &TagSpec::name("p"), |_, inner| Ok(format!("{inner}\n")))
}

pub(super) fn unordered_list(buffer: &str, cx: &Context<'_>) -> Result<String> {
    list(buffer, cx, "ul", "-")
}

pub(super) fn ordered_list(buffer: &str, cx: &Context<'_>) -> Result<String> {
    list(buffer, cx, "ol", "1.")
}

/// Items are rewritten inside each list body, then a blank line closes the list.
fn list(buffer: &str, cx: &Context<'_>, tag: &str, marker: &str) -> Result<String> {
    cx.transform(buffer, &TagSpec::name(tag), |_, body| {
        let items = cx.transform(body, &TagSpec::name("li"), |_, item| {
            Ok(format!("{marker} {item}\n"))
        })?;
        Ok(format!("{items}\n"))
    })
}
