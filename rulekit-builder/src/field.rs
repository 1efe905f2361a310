use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Suffix appended to the label of server-defined variables.
pub const VARIABLE_LABEL_SUFFIX: &str = "(Değişken)";

/// Addressable input of the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Identifier written into expressions.
    pub key: String,
    /// Name shown in pickers and previews.
    pub label: String,
}

impl Field {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Field backed by a server-side derived variable.
    pub fn variable(name: &str) -> Self {
        Self::new(name, format!("{} {}", name, VARIABLE_LABEL_SUFFIX))
    }
}

/// Attributes the rule engine exposes for every request.
pub fn static_fields() -> Vec<Field> {
    vec![
        Field::new("urgency_score", "Aciliyet Puanı"),
        Field::new("waiting_hours", "Bekleme Süresi"),
        Field::new("capacity_usage", "Kapasite Kullanımı"),
        Field::new("urgency", "Aciliyet"),
        Field::new("request_type", "Talep Tipi"),
        Field::new("service", "Servis"),
    ]
}

/// Fixed value choices for enumerated fields.
pub fn suggested_values(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "urgency" => Some(&["HIGH", "MEDIUM", "LOW"]),
        "request_type" => Some(&[
            "CONNECTION_ISSUE",
            "PAYMENT_PROBLEM",
            "SPEED_COMPLAINT",
            "STREAMING_ISSUE",
        ]),
        "service" => Some(&["Superonline", "TV+", "Paycell"]),
        _ => None,
    }
}

/// Callback invoked with the full field list after every registry change.
pub type FieldListener = Box<dyn Fn(&[Field]) + Send + Sync>;

/// Ordered set of known fields keyed by [`Field::key`].
///
/// Fields are never removed. Listeners run synchronously whenever an
/// operation actually changes the set, so open builders can refresh their
/// pickers.
#[derive(Default)]
pub struct FieldRegistry {
    fields: Vec<Field>,
    listeners: Vec<FieldListener>,
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.fields)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with [`static_fields`].
    pub fn with_static_fields() -> Self {
        let mut registry = Self::new();
        for field in static_fields() {
            registry.insert(field);
        }
        registry
    }

    /// Registers a listener. It is not called for the current state.
    pub fn subscribe(&mut self, listener: impl Fn(&[Field]) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Adds or relabels a field. Returns whether the registry changed.
    pub fn register(&mut self, field: Field) -> bool {
        let changed = self.insert(field);
        if changed {
            self.notify();
        }
        changed
    }

    /// Merges server-reported variable names, labelling each with
    /// [`VARIABLE_LABEL_SUFFIX`]. Listeners run at most once. Returns the
    /// number of entries added or relabelled.
    pub fn resync<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let changed = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| self.insert(Field::variable(&name)))
            .filter(|changed| *changed)
            .count();

        if changed > 0 {
            debug!(changed, total = self.fields.len(), "merged server variables");
            self.notify();
        }
        changed
    }

    /// All fields in insertion order.
    pub fn all(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, field: Field) -> bool {
        match self.fields.iter_mut().find(|known| known.key == field.key) {
            Some(known) if known.label == field.label => false,
            Some(known) => {
                known.label = field.label;
                true
            }
            None => {
                self.fields.push(field);
                true
            }
        }
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.fields);
        }
    }
}
