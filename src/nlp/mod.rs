//! Text primitives used by the classifier.

pub mod pain;
pub mod text;

pub use text::{contains, normalize, NormalizedText};
