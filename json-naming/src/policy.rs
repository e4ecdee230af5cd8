use serde_json::{Map, Value};

use crate::case::{Separators, convert};

/// Naming policy for property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamingPolicy {
    separators: Separators,
}

impl NamingPolicy {
    pub const SNAKE_CASE: Self = Self::new(Separators::SNAKE);
    pub const KEBAB_CASE: Self = Self::new(Separators::KEBAB);

    pub const fn new(separators: Separators) -> Self {
        Self { separators }
    }

    pub fn separators(&self) -> Separators {
        self.separators
    }

    pub fn convert_name(&self, name: &str) -> String {
        convert(name, self.separators).into_owned()
    }

    /// Rename every object key in `value`, recursing into nested objects and arrays.
    ///
    /// If two keys of one object convert to the same name, the one that comes last wins.
    pub fn rename_keys(&self, value: Value) -> Value {
        match value {
            Value::Object(object) => Value::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (self.convert_name(&key), self.rename_keys(value)))
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(values) => {
                Value::Array(values.into_iter().map(|value| self.rename_keys(value)).collect())
            }
            other => other,
        }
    }
}
