//! The fixed sequence of rewrite stages from exported HTML to Markdown.
//!
//! Order matters: the engine closes a tag at its first closing delimiter, so
//! leaf elements are rewritten before the elements that wrap them, and `&lt;`
//! is only unescaped once every tag stage that could trip over a literal `<`
//! has already run.

mod block;
mod inline;
mod media;

use crate::config::Settings;
use crate::converter::{Attributes, TagSpec, Transformer};
use crate::error::{Error, Result};

type StageFn = fn(&str, &Context<'_>) -> Result<String>;

/// Everything a stage may read besides the buffer itself.
pub struct Context<'a> {
    settings: &'a Settings,
    transformer: Transformer,
}

impl<'a> Context<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            transformer: Transformer::new(settings.nesting),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn transform<F>(&self, buffer: &str, spec: &TagSpec, converter: F) -> Result<String>
    where
        F: FnMut(&Attributes, &str) -> Result<String>,
    {
        self.transformer.apply(buffer, spec, converter)
    }
}

/// One named `buffer -> buffer` step.
pub struct Stage {
    pub name: &'static str,
    apply: StageFn,
}

impl Stage {
    const fn new(name: &'static str, apply: StageFn) -> Self {
        Self { name, apply }
    }

    pub fn apply(&self, buffer: &str, cx: &Context<'_>) -> Result<String> {
        (self.apply)(buffer, cx).map_err(|source| Error::Stage {
            stage: self.name,
            source: Box::new(source),
        })
    }
}

pub static STAGES: &[Stage] = &[
    Stage::new("section", block::section),
    Stage::new("h2", block::heading::<2>),
    Stage::new("h3", block::heading::<3>),
    Stage::new("h4", block::heading::<4>),
    Stage::new("p", block::paragraph),
    Stage::new("ul", block::unordered_list),
    Stage::new("ol", block::ordered_list),
    Stage::new("a", inline::link),
    Stage::new("strong", inline::strong),
    Stage::new("code-toolbar", media::code_block),
    Stage::new("entities", inline::unescape_entities),
    Stage::new("code", inline::code),
    Stage::new("image", media::image),
    Stage::new("video", media::video),
    Stage::new("logo", media::logo),
];

/// Run every stage in order; the first failure stops the pipeline.
pub fn run(buffer: String, cx: &Context<'_>) -> Result<String> {
    STAGES.iter().try_fold(buffer, |buffer, stage| {
        let out = stage.apply(&buffer, cx)?;
        tracing::debug!(
            stage = stage.name,
            before = buffer.len(),
            after = out.len(),
            "Applied stage"
        );
        Ok(out)
    })
}
