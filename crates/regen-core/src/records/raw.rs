//! Flat field-name → value record as delivered by ingestion.

use rustc_hash::FxHashMap;

/// One collected form as a flat map of field name to string value.
///
/// Source systems deliver every value as text; absent and empty fields
/// are equivalent, so [`RawRecord::field`] returns `""` for both rather
/// than forcing `Option` handling onto every positional lookup.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: FxHashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from field/value pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the field value, or `""` when the field is absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Whether the field exists at all, even with an empty value.
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates over all present fields, in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
