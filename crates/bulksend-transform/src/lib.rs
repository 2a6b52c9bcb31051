//! Recipient transformation for bulk template broadcasts.
//!
//! Takes CSV rows and a confirmed field mapping and produces send-ready
//! recipients with dense template parameter lists. Row problems are
//! collected as [`ValidationError`](bulksend_model::ValidationError)s rather
//! than returned as `Err`.
//!
//! Also home to the helpers an import flow needs around that step: phone
//! number checks, placeholder parsing, message previews and pre-flight
//! mapping validation.

mod fields;
mod phone;
mod preview;
mod template;
mod transform;
mod validate;

pub use fields::{extract_custom_fields, mapped_value};
pub use phone::{
    MIN_INTERNATIONAL_DIGITS, format_phone_number, is_valid_phone_number, strip_phone_separators,
};
pub use preview::{PreviewParams, preview_message};
pub use template::{
    MessageTemplate, ParameterFormat, count_placeholders, detect_parameter_format,
    named_placeholders, param_counts_from_template, placeholder_indices,
};
pub use transform::{RecipientTransformer, TransformOptions, TransformResult, transform_recipients};
pub use validate::{MappingIssue, MappingValidation, Severity, validate_mappings};
