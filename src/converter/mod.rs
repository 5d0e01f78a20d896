pub mod attrs;
mod balanced;
pub mod tag;

pub use attrs::Attributes;
pub use tag::{Nesting, TagSpec, Transformer, transform};
