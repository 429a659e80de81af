//! Observable form state store

use super::field::{FieldValue, FormErrors, FormValues};
use super::schema::Validator;
use std::fmt;

/// Kind of mutation a listener is notified about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Initialized,
    FieldChanged(String),
    Replaced,
    FieldValidated(String),
    Validated { accepted: bool },
}

/// Read-only view handed to listeners after a mutation
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub values: &'a FormValues,
    pub errors: &'a FormErrors,
    pub submitting: bool,
}

pub type Listener = Box<dyn FnMut(&StoreChange, StoreSnapshot<'_>)>;

/// Values, errors and the submitting flag of one form instance.
///
/// Every mutation notifies the subscribed listeners synchronously, after the
/// new state is in place.
pub struct FormStore {
    values: FormValues,
    errors: FormErrors,
    submitting: bool,
    validator: Validator,
    listeners: Vec<Listener>,
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("submitting", &self.submitting)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FormStore {
    /// An empty store. Mount a form with [`FormStore::initialize`].
    pub fn new(validator: Validator) -> Self {
        Self {
            values: FormValues::new(),
            errors: FormErrors::new(),
            submitting: false,
            validator,
            listeners: Vec::new(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Listeners live as long as the store
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreChange, StoreSnapshot<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: StoreChange) {
        let snapshot = StoreSnapshot {
            values: &self.values,
            errors: &self.errors,
            submitting: self.submitting,
        };
        for listener in self.listeners.iter_mut() {
            listener(&change, snapshot);
        }
    }

    pub fn initialize(&mut self, defaults: FormValues) {
        self.values = defaults;
        self.errors.clear();
        self.submitting = false;
        self.notify(StoreChange::Initialized);
    }

    /// Replace or append a value. When the current value is a multi-select
    /// selection, a text value toggles its membership instead.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        let toggled = match (&value, self.values.get_mut(name)) {
            (FieldValue::Text(choice), Some(FieldValue::Choices(selected))) => {
                if let Some(pos) = selected.iter().position(|c| c == choice) {
                    selected.remove(pos);
                } else {
                    selected.push(choice.clone());
                }
                true
            }
            _ => false,
        };
        if !toggled {
            self.values.insert(name.to_string(), value);
        }
        self.submitting = false;
        self.notify(StoreChange::FieldChanged(name.to_string()));
    }

    /// Atomic bulk replace of both maps with a single notification
    pub fn set_fields_and_errors(&mut self, values: FormValues, errors: FormErrors) {
        self.values = values;
        self.errors = errors;
        self.submitting = false;
        self.notify(StoreChange::Replaced);
    }

    /// Re-run the validator and copy only the entry for `name`.
    ///
    /// Entries for other fields are left as they are, even if stale.
    pub fn validate_one_field(&mut self, name: &str) {
        let mut fresh = (self.validator)(&self.values);
        match fresh.remove(name) {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
        self.notify(StoreChange::FieldValidated(name.to_string()));
    }

    /// Replace all errors with the validator's output and mark the form as
    /// submitting. Returns whether the submission is accepted.
    pub fn validate_all(&mut self) -> bool {
        self.errors = (self.validator)(&self.values);
        self.submitting = true;
        let accepted = self.errors.is_empty();
        self.notify(StoreChange::Validated { accepted });
        accepted
    }

    /// Recomputed on every call. `required_present` is the form's own check
    /// that its required fields for the current branch are filled in.
    pub fn is_valid(&self, required_present: bool) -> bool {
        self.errors.is_empty() && (self.validator)(&self.values).is_empty() && required_present
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_field_validator(values: &FormValues) -> FormErrors {
        let mut errors = FormErrors::new();
        for name in ["a", "b"] {
            if values.get(name).map_or(true, FieldValue::is_empty) {
                errors.insert(name.to_string(), format!("{name} is required"));
            }
        }
        errors
    }

    fn defaults() -> FormValues {
        let mut values = FormValues::new();
        values.insert("a".to_string(), FieldValue::text(""));
        values.insert("b".to_string(), FieldValue::text(""));
        values.insert("tags".to_string(), FieldValue::Choices(vec![]));
        values
    }

    fn store() -> FormStore {
        let mut store = FormStore::new(two_field_validator);
        store.initialize(defaults());
        store
    }

    mod mutation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_initialize_resets_everything() {
            let mut store = store();
            store.set_field("a", FieldValue::text("x"));
            store.validate_all();
            store.initialize(defaults());
            assert_eq!(store.values(), &defaults());
            assert!(store.errors().is_empty());
            assert!(!store.is_submitting());
        }

        #[test]
        fn test_set_field_replaces_and_appends() {
            let mut store = store();
            store.set_field("a", FieldValue::text("one"));
            store.set_field("extra", FieldValue::Flag(true));
            assert_eq!(store.values().get("a"), Some(&FieldValue::text("one")));
            assert_eq!(store.values().get("extra"), Some(&FieldValue::Flag(true)));
        }

        #[test]
        fn test_set_field_toggles_multi_select_membership() {
            let mut store = store();
            store.set_field("tags", FieldValue::text("CSS"));
            store.set_field("tags", FieldValue::text("React"));
            assert_eq!(
                store.values().get("tags"),
                Some(&FieldValue::Choices(vec!["CSS".to_string(), "React".to_string()]))
            );
            store.set_field("tags", FieldValue::text("CSS"));
            assert_eq!(
                store.values().get("tags"),
                Some(&FieldValue::Choices(vec!["React".to_string()]))
            );
        }

        #[test]
        fn test_edit_after_rejected_submit_clears_submitting() {
            let mut store = store();
            assert!(!store.validate_all());
            assert!(store.is_submitting());
            store.set_field("a", FieldValue::text("x"));
            assert!(!store.is_submitting());
        }

        #[test]
        fn test_set_fields_and_errors_replaces_both() {
            let mut store = store();
            store.validate_all();
            let mut values = FormValues::new();
            values.insert("a".to_string(), FieldValue::text("v"));
            let mut errors = FormErrors::new();
            errors.insert("b".to_string(), "b is required".to_string());
            store.set_fields_and_errors(values.clone(), errors.clone());
            assert_eq!(store.values(), &values);
            assert_eq!(store.errors(), &errors);
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_validate_all_reports_acceptance() {
            let mut store = store();
            assert!(!store.validate_all());
            assert_eq!(store.errors().len(), 2);

            store.set_field("a", FieldValue::text("x"));
            store.set_field("b", FieldValue::text("y"));
            assert!(store.validate_all());
            assert!(store.errors().is_empty());
            assert!(store.is_submitting());
        }

        #[test]
        fn test_validate_one_field_only_touches_that_field() {
            let mut store = store();
            store.validate_one_field("a");
            assert_eq!(store.error("a"), Some("a is required"));
            assert_eq!(store.error("b"), None);
        }

        #[test]
        fn test_validate_one_field_keeps_stale_errors_of_other_fields() {
            let mut store = store();
            store.validate_all();
            store.set_field("a", FieldValue::text("x"));
            store.set_field("b", FieldValue::text("y"));
            store.validate_one_field("a");
            assert_eq!(store.error("a"), None);
            // b was fixed but not re-validated
            assert_eq!(store.error("b"), Some("b is required"));
            assert!(store.validate_all());
        }

        #[test]
        fn test_validate_unknown_field_removes_entry() {
            let mut store = store();
            let mut errors = FormErrors::new();
            errors.insert("ghost".to_string(), "stale".to_string());
            store.set_fields_and_errors(defaults(), errors);
            store.validate_one_field("ghost");
            assert_eq!(store.error("ghost"), None);
        }

        #[test]
        fn test_is_valid_needs_clean_errors_and_required_fields() {
            let mut store = store();
            assert!(!store.is_valid(true));
            store.set_field("a", FieldValue::text("x"));
            store.set_field("b", FieldValue::text("y"));
            assert!(store.is_valid(true));
            assert!(!store.is_valid(false));

            let mut errors = FormErrors::new();
            errors.insert("a".to_string(), "stale".to_string());
            let values = store.values().clone();
            store.set_fields_and_errors(values, errors);
            assert!(!store.is_valid(true));
        }
    }

    mod observers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_listeners_see_state_after_mutation() {
            let mut store = store();
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            store.subscribe(move |change, snapshot| {
                sink.borrow_mut().push((
                    change.clone(),
                    snapshot.values.get("a").cloned(),
                    snapshot.errors.len(),
                ));
            });

            store.set_field("a", FieldValue::text("x"));
            store.validate_all();

            let seen = seen.borrow();
            assert_eq!(seen.len(), 2);
            assert_eq!(
                seen[0],
                (
                    StoreChange::FieldChanged("a".to_string()),
                    Some(FieldValue::text("x")),
                    0
                )
            );
            assert_eq!(seen[1].0, StoreChange::Validated { accepted: false });
            assert_eq!(seen[1].2, 1);
        }

        #[test]
        fn test_bulk_replace_notifies_once() {
            let mut store = store();
            let count = Rc::new(RefCell::new(0));
            let counter = Rc::clone(&count);
            store.subscribe(move |_, _| *counter.borrow_mut() += 1);
            store.set_fields_and_errors(defaults(), FormErrors::new());
            assert_eq!(*count.borrow(), 1);
        }

        #[test]
        fn test_mount_is_observed_with_defaults_in_place() {
            let mut store = FormStore::new(two_field_validator);
            assert!(store.values().is_empty());
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            store.subscribe(move |change, snapshot| {
                sink.borrow_mut()
                    .push((change.clone(), snapshot.values.len(), snapshot.submitting));
            });

            store.initialize(defaults());

            assert_eq!(*seen.borrow(), vec![(StoreChange::Initialized, 3, false)]);
        }
    }
}
