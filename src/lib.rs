//! Clinical text routing engine: picks one body-system visualization asset
//! for a clinical summary and its diagnosis list.
//!
//! The rule path ([`classify::RuleClassifier`]) is deterministic and always
//! answers. [`select::Selector`] optionally layers an AI suggestion on top and
//! falls back to the rules whenever the AI is disabled, silent, or failing.

pub mod ai;
pub mod api;
pub mod catalog;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod report;
pub mod select;

pub use catalog::{AssetId, Catalog};
pub use classify::{ClassificationInput, ClassificationResult, Provenance, RuleClassifier};
pub use error::{RouterError, RouterResult};
pub use select::Selector;
