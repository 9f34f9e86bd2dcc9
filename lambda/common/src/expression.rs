//! Partial-update expressions.
//!
//! An [`UpdateExpression`] sets every attribute of a payload through
//! placeholders: `#name` for the attribute name (so reserved words are safe)
//! and `:name` for its value.

use indexmap::IndexMap;

use crate::value::Attributes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateExpression {
    /// `set #a = :a, #b = :b`
    pub expression: String,
    /// `#a -> a`
    pub names: IndexMap<String, String>,
    /// `:a -> stored form of the value`
    pub values: IndexMap<String, String>,
}

impl UpdateExpression {
    /// Builds the `set` expression for every attribute in `attributes`.
    ///
    /// Returns `None` for an empty payload: there is nothing to set, and a
    /// bare `set ` is not a valid expression.
    pub fn build(attributes: &Attributes) -> Option<Self> {
        if attributes.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(attributes.len());
        let mut names = IndexMap::with_capacity(attributes.len());
        let mut values = IndexMap::with_capacity(attributes.len());

        for (name, value) in attributes {
            clauses.push(format!("#{name} = :{name}"));
            names.insert(format!("#{name}"), name.clone());
            values.insert(format!(":{name}"), value.to_string());
        }

        Some(Self {
            expression: format!("set {}", clauses.join(", ")),
            names,
            values,
        })
    }

    /// Attribute name and stored value of each clause.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().filter_map(|(placeholder, name)| {
            let value = self.values.get(&format!(":{}", &placeholder[1..]))?;
            Some((name.as_str(), value.as_str()))
        })
    }
}
