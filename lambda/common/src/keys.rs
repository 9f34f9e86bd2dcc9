//! Primary key layout of each table.

use crate::error::{HandlerError, Result};
use crate::value::Attributes;

/// Key fields of a table: a partition key and an optional sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    pub partition: &'static str,
    pub sort: Option<&'static str>,
}

/// Users are keyed by email alone.
pub const USERS: KeySchema = KeySchema {
    partition: "email",
    sort: None,
};

/// Tasks live under their owner's email and are told apart by id.
pub const TASKS: KeySchema = KeySchema {
    partition: "email",
    sort: Some("id"),
};

/// A fully resolved key for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    pub partition: (String, String),
    pub sort: Option<(String, String)>,
}

impl KeySchema {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.partition).chain(self.sort)
    }

    /// Builds a key from already extracted values.
    ///
    /// `sort_value` is ignored for tables without a sort key.
    pub fn key(&self, partition_value: &str, sort_value: Option<&str>) -> Result<ItemKey> {
        let sort = match self.sort {
            Some(name) => {
                let value = sort_value.ok_or(HandlerError::MissingKey(name))?;
                Some((name.to_string(), value.to_string()))
            }
            None => None,
        };

        Ok(ItemKey {
            partition: (self.partition.to_string(), partition_value.to_string()),
            sort,
        })
    }

    /// Removes the key fields from a write payload. Other fields are untouched.
    pub fn strip(&self, attributes: Option<Attributes>) -> Option<Attributes> {
        let mut attributes = attributes?;
        for field in self.fields() {
            attributes.shift_remove(field);
        }
        Some(attributes)
    }

    /// Splits a write payload into its key and the updatable attributes.
    pub fn split(&self, attributes: Option<Attributes>) -> Result<(ItemKey, Attributes)> {
        let attributes = attributes.ok_or(HandlerError::NotAnObject)?;

        let value_of = |field: &'static str| -> Result<String> {
            let value = attributes.get(field).ok_or(HandlerError::MissingKey(field))?;
            value
                .as_str()
                .map(str::to_string)
                .ok_or(HandlerError::InvalidKey(field))
        };

        let partition = value_of(self.partition)?;
        let sort = self.sort.map(value_of).transpose()?;
        let key = self.key(&partition, sort.as_deref())?;

        let rest = self.strip(Some(attributes)).unwrap_or_default();
        Ok((key, rest))
    }
}

impl ItemKey {
    pub fn partition_value(&self) -> &str {
        &self.partition.1
    }

    pub fn sort_value(&self) -> Option<&str> {
        self.sort.as_ref().map(|(_, value)| value.as_str())
    }
}
