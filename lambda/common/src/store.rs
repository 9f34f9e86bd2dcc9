use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::expression::UpdateExpression;
use crate::keys::ItemKey;

/// An item as read back from a table.
pub type Item = Map<String, Value>;

pub type Result<T> = std::result::Result<T, StoreError>;

/// The operations the handlers need from a key-value table.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetches a single item, `None` when the key is absent.
    async fn get(&self, key: &ItemKey) -> Result<Option<Item>>;

    /// Every item sharing `partition_value`, in sort key order.
    async fn query(&self, partition_value: &str) -> Result<Vec<Item>>;

    /// Creates the item if needed, then applies `update` to it.
    async fn update(&self, key: &ItemKey, update: Option<&UpdateExpression>) -> Result<()>;

    /// Removes the item. Deleting an absent key succeeds.
    async fn delete(&self, key: &ItemKey) -> Result<()>;
}
