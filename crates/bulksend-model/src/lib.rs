//! Data model for mapping CSV imports onto broadcast recipients.
//!
//! Everything here is transient: types are built for one matching or
//! transformation call and handed back to the caller.

pub mod error;
pub mod field;
pub mod mapping;
pub mod recipient;

pub use error::{MappingError, Result};
pub use field::{
    CUSTOM_FIELD_PREFIX, EMAIL_FIELD, FULLNAME_FIELD, FieldDefinition, PHONE_FIELD, ParamCounts,
    ParamKind,
};
pub use mapping::{
    ConfidenceLevel, ConfidenceThresholds, MANUAL_CONFIDENCE, MappingProfile, MappingResult,
    Suggestion,
};
pub use recipient::{BroadcastPayload, CsvRow, RecipientRecord, TemplateParams, ValidationError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_omits_absent_optional_fields() {
        let recipient = RecipientRecord {
            phone: "+254712345678".to_string(),
            fullname: None,
            email: Some("alice@example.com".to_string()),
            template_params: TemplateParams::default(),
        };
        let json = serde_json::to_value(&recipient).expect("serialize recipient");
        assert!(json.get("fullname").is_none());
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["template_params"]["body_params"], serde_json::json!([]));
    }

    #[test]
    fn validation_error_display() {
        let error = ValidationError::new(2, PHONE_FIELD, "Invalid phone number format")
            .with_value("12345");
        assert_eq!(
            error.to_string(),
            "row 2, phone: Invalid phone number format (12345)"
        );
    }
}
