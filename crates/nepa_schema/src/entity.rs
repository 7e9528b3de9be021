//! Canonical entity kinds.
//!
//! The NEPA schema defines a closed set of entities. This is the CANONICAL
//! list - every table binding, coverage result, and transformed record refers
//! back to one of these kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the canonical NEPA entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Process,
    Document,
    PublicComment,
    PublicEngagementEvent,
    CaseEvent,
    GisData,
    GisDataElement,
    LegalStructure,
    DecisionElement,
    ProcessModel,
    DecisionPayload,
    UserRole,
}

impl EntityKind {
    /// All canonical entities, in document order.
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Project,
        EntityKind::Process,
        EntityKind::Document,
        EntityKind::PublicComment,
        EntityKind::PublicEngagementEvent,
        EntityKind::CaseEvent,
        EntityKind::GisData,
        EntityKind::GisDataElement,
        EntityKind::LegalStructure,
        EntityKind::DecisionElement,
        EntityKind::ProcessModel,
        EntityKind::DecisionPayload,
        EntityKind::UserRole,
    ];

    /// Canonical (singular) entity name as it appears in the schema's
    /// definitions section.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Process => "process",
            EntityKind::Document => "document",
            EntityKind::PublicComment => "public_comment",
            EntityKind::PublicEngagementEvent => "public_engagement_event",
            EntityKind::CaseEvent => "case_event",
            EntityKind::GisData => "gis_data",
            EntityKind::GisDataElement => "gis_data_element",
            EntityKind::LegalStructure => "legal_structure",
            EntityKind::DecisionElement => "decision_element",
            EntityKind::ProcessModel => "process_model",
            EntityKind::DecisionPayload => "decision_payload",
            EntityKind::UserRole => "user_role",
        }
    }

    /// Canonical identifier property for this entity.
    ///
    /// Identifier values are ALWAYS strings in canonical records, regardless
    /// of the source column type.
    pub fn id_field(&self) -> &'static str {
        match self {
            EntityKind::Project => "project_id",
            EntityKind::Process => "process_id",
            EntityKind::Document => "document_id",
            EntityKind::PublicComment => "public_comment_id",
            EntityKind::PublicEngagementEvent => "public_engagement_event_id",
            EntityKind::CaseEvent => "case_event_id",
            EntityKind::GisData => "gis_id",
            EntityKind::GisDataElement => "gis_data_element_id",
            EntityKind::LegalStructure => "legal_structure_id",
            EntityKind::DecisionElement => "decision_element_id",
            EntityKind::ProcessModel => "process_model_id",
            EntityKind::DecisionPayload => "decision_payload_id",
            EntityKind::UserRole => "user_role_id",
        }
    }

    /// Top-level array key for this entity in a canonical document.
    pub fn collection_key(&self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Process => "processes",
            EntityKind::Document => "documents",
            EntityKind::PublicComment => "public_comments",
            EntityKind::PublicEngagementEvent => "public_engagement_events",
            EntityKind::CaseEvent => "case_events",
            EntityKind::GisData => "gis_data",
            EntityKind::GisDataElement => "gis_data_elements",
            EntityKind::LegalStructure => "legal_structures",
            EntityKind::DecisionElement => "decision_elements",
            EntityKind::ProcessModel => "process_models",
            EntityKind::DecisionPayload => "decision_payloads",
            EntityKind::UserRole => "user_roles",
        }
    }

    /// Resolve a canonical collection key back to its entity.
    pub fn from_collection_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.collection_key() == key)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown entity: '{}'", s))
    }
}
