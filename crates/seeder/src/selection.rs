use serde_json::Value;

use crate::error::SeedError;

/// The collection names a clear request targets.
///
/// Built from a single name or a sequence of names; a bare name is a
/// one-element selection. Order is kept, duplicates are kept until
/// [`CollectionSelection::distinct`] is asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSelection(Vec<String>);

impl CollectionSelection {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn into_names(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names in first-seen order with repeats removed.
    pub fn distinct(&self) -> Vec<String> {
        distinct_names(self.0.iter())
    }

    /// Accepts a JSON string or an array of strings. Anything else is an
    /// `InvalidSelection` error naming the offending shape.
    pub fn from_json(value: &Value) -> Result<Self, SeedError> {
        match value {
            Value::String(name) => Ok(Self(vec![name.clone()])),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(name) => Ok(name.clone()),
                    other => Err(SeedError::InvalidSelection(format!(
                        "element {} is {}, expected a collection name",
                        i,
                        json_kind(other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            other => Err(SeedError::InvalidSelection(format!(
                "got {}, expected a collection name or a list of names",
                json_kind(other)
            ))),
        }
    }
}

pub(crate) fn distinct_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<&str> for CollectionSelection {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for CollectionSelection {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for CollectionSelection {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for CollectionSelection {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for CollectionSelection {
    fn from(names: &[String]) -> Self {
        Self(names.to_vec())
    }
}

impl From<&[&str]> for CollectionSelection {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CollectionSelection {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl TryFrom<Value> for CollectionSelection {
    type Error = SeedError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}
