//! Target field definitions and template parameter slots.

use serde::{Deserialize, Serialize};

/// Key of the recipient phone number field.
pub const PHONE_FIELD: &str = "phone";
/// Key of the recipient display name field.
pub const FULLNAME_FIELD: &str = "fullname";
/// Key of the recipient email field.
pub const EMAIL_FIELD: &str = "email";
/// Namespace prefix for user-defined contact attributes.
pub const CUSTOM_FIELD_PREFIX: &str = "custom.";

/// A mappable target: contact attribute, custom field, or template slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field key, optionally namespaced with `.` (e.g. `custom.city`).
    pub key: String,
    /// Human-readable label shown next to the field.
    pub label: String,
    /// Required fields get first pick of ambiguous columns.
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    /// Creates an optional field.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required: false,
        }
    }

    /// Creates a required field.
    pub fn required(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(key, label)
        }
    }

    /// Creates the field for a template parameter slot.
    pub fn slot(kind: ParamKind, index: usize) -> Self {
        Self::new(
            kind.slot_key(index),
            format!("{} parameter {}", kind.label(), index + 1),
        )
    }

    /// A `custom.<key>` field.
    pub fn custom(key: &str, label: impl Into<String>) -> Self {
        Self::new(format!("{CUSTOM_FIELD_PREFIX}{key}"), label)
    }

    /// The built-in contact fields: phone (required), full name and email.
    pub fn contact_fields() -> Vec<Self> {
        vec![
            Self::required(PHONE_FIELD, "Phone number"),
            Self::new(FULLNAME_FIELD, "Full name"),
            Self::new(EMAIL_FIELD, "Email"),
        ]
    }

    /// Segment after the last `.` of the key.
    pub fn base_key(&self) -> &str {
        match self.key.rsplit_once('.') {
            Some((_, base)) => base,
            None => &self.key,
        }
    }

    /// True for `custom.*` fields.
    pub fn is_custom(&self) -> bool {
        self.key.starts_with(CUSTOM_FIELD_PREFIX)
    }
}

/// Kind of positional template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Header,
    Body,
    Button,
}

impl ParamKind {
    /// All kinds in slot-filling order.
    pub const ALL: [ParamKind; 3] = [ParamKind::Header, ParamKind::Body, ParamKind::Button];

    /// Prefix used for slot keys (`header`, `body`, `button`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Button => "button",
        }
    }

    /// Capitalized name for labels and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Body => "Body",
            Self::Button => "Button",
        }
    }

    /// Field key of the slot at a 0-based index, e.g. `body_0`.
    pub fn slot_key(self, index: usize) -> String {
        format!("{}_{index}", self.prefix())
    }

    /// Parses a slot key such as `button_2` back into kind and index.
    pub fn parse_slot(key: &str) -> Option<(ParamKind, usize)> {
        let (prefix, index) = key.rsplit_once('_')?;
        let kind = Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        index.parse().ok().map(|index| (kind, index))
    }
}

/// Number of positional parameter slots a message template declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamCounts {
    #[serde(default)]
    pub header: usize,
    #[serde(default)]
    pub body: usize,
    #[serde(default)]
    pub button: usize,
}

impl ParamCounts {
    pub fn new(header: usize, body: usize, button: usize) -> Self {
        Self {
            header,
            body,
            button,
        }
    }

    /// Slot count for one parameter kind.
    pub fn count(&self, kind: ParamKind) -> usize {
        match kind {
            ParamKind::Header => self.header,
            ParamKind::Body => self.body,
            ParamKind::Button => self.button,
        }
    }

    /// Total number of slots across all kinds.
    pub fn total(&self) -> usize {
        self.header + self.body + self.button
    }

    /// Every slot as `(kind, index)` in slot-filling order.
    pub fn slots(&self) -> impl Iterator<Item = (ParamKind, usize)> + '_ {
        ParamKind::ALL
            .into_iter()
            .flat_map(move |kind| (0..self.count(kind)).map(move |index| (kind, index)))
    }
}
