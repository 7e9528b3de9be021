//! Enumerated value translators.
//!
//! Pure functions from arbitrary source spellings to canonical enum values.
//! Unknown inputs are preserved rather than rejected - status translators
//! fall back to a lower-cased copy, type translators pass the input through
//! unchanged. Coverage analysis, not hard failure, surfaces data-quality
//! problems.

/// Canonical process/project/document status.
///
/// `"In Progress"`, `"IN_PROGRESS"`, and `"in-progress"` all map to
/// `in-progress`; unknown values become a lower-cased copy of the input.
pub fn translate_status(input: &str) -> String {
    let normalized = input.trim().to_lowercase().replace([' ', '_'], "-");
    match normalized.as_str() {
        "in-progress" | "underway" | "active" | "ongoing" => "in-progress".to_string(),
        "complete" | "completed" | "done" | "final" => "completed".to_string(),
        "planned" | "pending" | "not-started" => "planned".to_string(),
        "paused" | "on-hold" | "suspended" => "paused".to_string(),
        "cancelled" | "canceled" | "terminated" => "cancelled".to_string(),
        "withdrawn" => "withdrawn".to_string(),
        _ => input.trim().to_lowercase(),
    }
}

/// Canonical NEPA document type abbreviation.
///
/// Long-form names collapse to the standard abbreviation; unrecognized
/// inputs pass through unchanged.
pub fn translate_document_type(input: &str) -> String {
    let canonical = match input.trim().to_lowercase().as_str() {
        "environmental assessment" | "ea" => "EA",
        "environmental impact statement" | "eis" => "EIS",
        "categorical exclusion" | "ce" | "catex" => "CE",
        "finding of no significant impact" | "fonsi" => "FONSI",
        "record of decision" | "rod" => "ROD",
        "notice of intent" | "noi" => "NOI",
        _ => return input.to_string(),
    };
    canonical.to_string()
}

/// Canonical public engagement type.
///
/// Unrecognized inputs pass through unchanged.
pub fn translate_engagement_type(input: &str) -> String {
    let canonical = match input.trim().to_lowercase().as_str() {
        "public meeting" | "meeting" => "public-meeting",
        "comment period" => "comment-period",
        "public hearing" | "hearing" => "hearing",
        "webinar" => "webinar",
        "open house" => "open-house",
        _ => return input.to_string(),
    };
    canonical.to_string()
}

/// Canonical event status (engagement and case events).
///
/// Unknown values become a lower-cased copy of the input.
pub fn translate_event_status(input: &str) -> String {
    let normalized = input.trim().to_lowercase().replace([' ', '_'], "-");
    match normalized.as_str() {
        "scheduled" | "upcoming" => "scheduled".to_string(),
        "held" | "occurred" | "complete" | "completed" => "completed".to_string(),
        "cancelled" | "canceled" => "cancelled".to_string(),
        "postponed" | "rescheduled" => "postponed".to_string(),
        _ => input.trim().to_lowercase(),
    }
}

/// Translator dispatch for a canonical property name, if it is one of the
/// recognized enumerated fields.
pub fn translator_for(canonical_field: &str) -> Option<fn(&str) -> String> {
    match canonical_field {
        "project_status" | "process_status" | "document_status" => Some(translate_status),
        "document_type" => Some(translate_document_type),
        "engagement_type" => Some(translate_engagement_type),
        "event_status" => Some(translate_event_status),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_spellings() {
        assert_eq!(translate_status("In Progress"), "in-progress");
        assert_eq!(translate_status("IN_PROGRESS"), "in-progress");
        assert_eq!(translate_status("Complete"), "completed");
        assert_eq!(translate_status("On Hold"), "paused");
        assert_eq!(translate_status("Canceled"), "cancelled");
    }

    #[test]
    fn test_status_unknown_falls_back_to_lowercase() {
        assert_eq!(translate_status("Special Review"), "special review");
    }

    #[test]
    fn test_document_type_abbreviations() {
        assert_eq!(translate_document_type("Environmental Assessment"), "EA");
        assert_eq!(translate_document_type("eis"), "EIS");
        assert_eq!(translate_document_type("Record of Decision"), "ROD");
    }

    #[test]
    fn test_document_type_unknown_passes_through() {
        assert_eq!(translate_document_type("Biological Opinion"), "Biological Opinion");
    }

    #[test]
    fn test_engagement_types() {
        assert_eq!(translate_engagement_type("Public Meeting"), "public-meeting");
        assert_eq!(translate_engagement_type("Comment Period"), "comment-period");
        assert_eq!(translate_engagement_type("Tribal Consultation"), "Tribal Consultation");
    }

    #[test]
    fn test_event_status() {
        assert_eq!(translate_event_status("Held"), "completed");
        assert_eq!(translate_event_status("Postponed"), "postponed");
        assert_eq!(translate_event_status("TBD"), "tbd");
    }

    #[test]
    fn test_translator_dispatch() {
        assert!(translator_for("process_status").is_some());
        assert!(translator_for("document_type").is_some());
        assert!(translator_for("project_title").is_none());
    }
}
