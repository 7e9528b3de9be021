//! Validation wrapper around the `jsonschema` crate.
//!
//! The reconciliation engine never reimplements JSON Schema semantics. It
//! compiles the raw schema document once, runs documents through it, and
//! interprets the structured errors for reporting:
//!
//! - Known false positives (a restrictive enum on a free-form field) are
//!   suppressed by a static denylist of (path-substring, keyword) pairs.
//! - `additionalProperties` violations are downgraded to soft issues:
//!   canonical validation is permissive, so unknown properties are accepted
//!   and surfaced through coverage warnings instead of hard failures.

use jsonschema::Validator;
use serde_json::Value;

use crate::model::{SchemaError, SchemaModel};

/// Known false positives filtered from the validator's error stream.
///
/// Each entry is (instance-path substring, keyword). The `purpose` field on
/// GIS records is free-form text in every observed export, but some schema
/// revisions constrain it with an enum.
const ISSUE_DENYLIST: &[(&str, &str)] = &[("purpose", "enum")];

/// One interpreted validation error.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationIssue {
    /// Instance path of the offending value (JSON Pointer form).
    pub path: String,

    /// Schema keyword that failed (`required`, `type`, `enum`, ...).
    pub keyword: String,

    /// Human-readable message from the validator.
    pub message: String,
}

/// Outcome of validating one document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationOutcome {
    /// True when no hard issues remain after filtering.
    pub valid: bool,

    /// Hard issues: these fail the document.
    pub issues: Vec<ValidationIssue>,

    /// Soft issues: reported but never block (unknown properties).
    pub warnings: Vec<ValidationIssue>,

    /// Count of denylisted issues that were suppressed entirely.
    pub suppressed: usize,
}

/// Compiled validator for the authoritative schema.
pub struct SchemaValidator {
    compiled: Validator,
}

impl SchemaValidator {
    /// Compile the schema document. Compilation failure is a schema-file
    /// problem and therefore fatal.
    pub fn new(model: &SchemaModel) -> Result<Self, SchemaError> {
        let compiled = jsonschema::validator_for(&model.raw)
            .map_err(|e| SchemaError::Invalid(format!("schema failed to compile: {}", e)))?;
        Ok(Self { compiled })
    }

    /// Validate a document, returning interpreted and filtered issues.
    pub fn validate(&self, document: &Value) -> ValidationOutcome {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();
        let mut suppressed = 0usize;

        for error in self.compiled.iter_errors(document) {
            let path = error.instance_path.to_string();
            let keyword = keyword_of(&error.schema_path.to_string());
            let message = error.to_string();

            if ISSUE_DENYLIST
                .iter()
                .any(|(frag, kw)| *kw == keyword && path.contains(frag))
            {
                suppressed += 1;
                continue;
            }

            let issue = ValidationIssue {
                path,
                keyword: keyword.clone(),
                message,
            };

            if keyword == "additionalProperties" {
                warnings.push(issue);
            } else {
                issues.push(issue);
            }
        }

        ValidationOutcome {
            valid: issues.is_empty(),
            issues,
            warnings,
            suppressed,
        }
    }
}

/// The failing keyword is the last segment of the schema path
/// (`/definitions/project/required` -> `required`).
fn keyword_of(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("schema")
        .to_string()
}
