#![warn(missing_docs)]
//! Structural validation of add-on JSON documents.
//!
//! Every problem found in user input lands in a [`ValidationResult`]; nothing
//! here returns `Err` or panics on malformed documents.

mod components;
mod kind;
mod loot;
mod manifest;
mod recipe;
mod report;
mod rules;

use addonforge_schema::SchemaRegistry;
use serde_json::Value;
use tracing::debug;

pub use kind::{detect_kind, ContentKind, KindSelector, RECIPE_KEYS};
pub use report::ValidationResult;
pub use rules::compare_versions;

use report::Report;

/// Oldest `format_version` that does not draw a warning by default.
pub const DEFAULT_MIN_FORMAT_VERSION: &str = "1.20.0";

/// Validates documents against a schema registry.
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
    min_format_version: String,
}

impl<'a> Validator<'a> {
    /// Validator with the default format-version recommendation.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            min_format_version: DEFAULT_MIN_FORMAT_VERSION.to_string(),
        }
    }

    /// Warn on entity/block/item/recipe documents older than `version`.
    pub fn with_min_format_version(mut self, version: impl Into<String>) -> Self {
        self.min_format_version = version.into();
        self
    }

    /// Check an already parsed document.
    pub fn validate(&self, document: &Value, selector: KindSelector) -> ValidationResult {
        let kind = match selector {
            KindSelector::Explicit(kind) => kind,
            KindSelector::Auto => match detect_kind(document) {
                Some(kind) => kind,
                None => return ValidationResult::single_error("cannot determine file type"),
            },
        };

        let mut report = Report::default();
        match document.as_object() {
            None => rules::type_error(&mut report, "", "object at the document root", document),
            Some(root) => match kind {
                ContentKind::LootTable => loot::check_loot_table(&mut report, root, self.registry),
                ContentKind::Entity | ContentKind::Block | ContentKind::Item => {
                    components::check_component_document(
                        &mut report,
                        root,
                        kind,
                        self.registry,
                        &self.min_format_version,
                    )
                }
                ContentKind::Recipe => {
                    recipe::check_recipe(&mut report, root, &self.min_format_version)
                }
                ContentKind::Manifest => manifest::check_manifest(&mut report, root),
            },
        }

        let result = report.finish(Some(kind));
        debug!(
            kind = %kind,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated document"
        );
        result
    }

    /// Parse `text` as JSON, then check it.
    ///
    /// A syntax error is the only finding reported for unparsable text.
    pub fn validate_str(&self, text: &str, selector: KindSelector) -> ValidationResult {
        match serde_json::from_str::<Value>(text) {
            Ok(document) => self.validate(&document, selector),
            Err(err) => {
                debug!(%err, "document is not JSON");
                ValidationResult::single_error(format!("invalid JSON: {err}"))
            }
        }
    }
}

/// [`Validator::validate`] with the built-in registry and default settings.
pub fn validate(document: &Value, selector: KindSelector) -> ValidationResult {
    let registry = SchemaRegistry::builtin();
    Validator::new(&registry).validate(document, selector)
}

/// [`Validator::validate_str`] with the built-in registry and default settings.
pub fn validate_str(text: &str, selector: KindSelector) -> ValidationResult {
    let registry = SchemaRegistry::builtin();
    Validator::new(&registry).validate_str(text, selector)
}
