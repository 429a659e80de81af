//! Form field value objects

use std::collections::BTreeMap;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text, numbers-as-strings and date-times
    Text(String),
    /// Single checkbox
    Flag(bool),
    /// Ordered multi-select selection
    Choices(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Empty text, an unchecked flag and an empty selection all count as empty
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Choices(c) => c.is_empty(),
        }
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    pub fn as_choices(&self) -> &[String] {
        match self {
            FieldValue::Choices(c) => c,
            _ => &[],
        }
    }
}

/// Current user-entered values of one form instance, keyed by field name
pub type FormValues = BTreeMap<String, FieldValue>;

/// Current validation failures, keyed by field name
pub type FormErrors = BTreeMap<String, String>;

/// Typed lookups on a [`FormValues`] record. Missing keys read as empty.
pub trait ValuesExt {
    fn text(&self, name: &str) -> &str;
    fn flag(&self, name: &str) -> bool;
    fn choices(&self, name: &str) -> &[String];
    fn is_blank(&self, name: &str) -> bool;
}

impl ValuesExt for FormValues {
    fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::as_flag)
    }

    fn choices(&self, name: &str) -> &[String] {
        self.get(name).map(FieldValue::as_choices).unwrap_or(&[])
    }

    fn is_blank(&self, name: &str) -> bool {
        self.get(name).map_or(true, FieldValue::is_empty)
    }
}

/// Widget kind of a field, which also determines its default value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Toggle,
    Select(&'static [&'static str]),
    MultiSelect(&'static [&'static str]),
}

/// Static description of a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Must be non-empty before the form can be submitted
    pub required: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: true,
        }
    }

    pub const fn multiline(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Multiline,
            required: true,
        }
    }

    pub const fn toggle(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Toggle,
            required: false,
        }
    }

    pub const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select(options),
            required: true,
        }
    }

    pub const fn multi_select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::MultiSelect(options),
            required: true,
        }
    }

    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Toggle => FieldValue::Flag(false),
            FieldKind::MultiSelect(_) => FieldValue::Choices(Vec::new()),
            _ => FieldValue::Text(String::new()),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline)
    }

    /// Options offered by select and multi-select fields
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Select(options) | FieldKind::MultiSelect(options) => options,
            _ => &[],
        }
    }
}
