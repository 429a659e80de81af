//! Governing-field switches

use super::field::{FieldValue, FormValues};
use super::schema::FormSchema;
use super::store::FormStore;

/// Record for a new governing selection: the fields of every branch are
/// dropped and the fields of the selected branch start from their defaults.
fn branch_values(
    schema: &dyn FormSchema,
    current: &FormValues,
    selection: FieldValue,
) -> FormValues {
    let exclusive = schema.exclusive_fields();
    let mut values: FormValues = current
        .iter()
        .filter(|(name, _)| !exclusive.iter().any(|e| *e == name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    for spec in schema.branch_fields(&selection) {
        values.insert(spec.name.to_string(), spec.default_value());
    }
    values.insert(schema.governing_field().to_string(), selection);
    values
}

/// Change the governing field in one store update.
///
/// Values and errors of the previous branch disappear together, and the new
/// record is validated as a whole so that newly relevant required fields are
/// flagged straight away. Returns false if the selection did not change.
pub fn switch_branch(
    store: &mut FormStore,
    schema: &dyn FormSchema,
    selection: FieldValue,
) -> bool {
    let governing = schema.governing_field();
    if store.values().get(governing) == Some(&selection) {
        return false;
    }
    let values = branch_values(schema, store.values(), selection);
    let errors = (schema.validator())(&values);
    tracing::debug!(
        form = schema.title(),
        field = governing,
        errors = errors.len(),
        "Switched branch"
    );
    store.set_fields_and_errors(values, errors);
    true
}
