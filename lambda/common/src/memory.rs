//! In-memory table used by the handler tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::expression::UpdateExpression;
use crate::keys::{ItemKey, KeySchema};
use crate::store::{Item, Result, TableStore};

type StoredKey = (String, Option<String>);

/// A [`TableStore`] over a sorted map, with the same upsert and delete
/// semantics as DynamoDB. Data is lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    schema: KeySchema,
    items: Arc<RwLock<BTreeMap<StoredKey, Item>>>,
    operations: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new(schema: KeySchema) -> Self {
        Self {
            schema,
            items: Arc::new(RwLock::new(BTreeMap::new())),
            operations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of store calls made so far.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }

    fn stored_key(key: &ItemKey) -> StoredKey {
        (
            key.partition_value().to_string(),
            key.sort_value().map(str::to_string),
        )
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn get(&self, key: &ItemKey) -> Result<Option<Item>> {
        self.record();
        let items = self.items.read().await;
        Ok(items.get(&Self::stored_key(key)).cloned())
    }

    async fn query(&self, partition_value: &str) -> Result<Vec<Item>> {
        self.record();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|((partition, _), _)| partition == partition_value)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn update(&self, key: &ItemKey, update: Option<&UpdateExpression>) -> Result<()> {
        self.record();
        let assignments: Vec<(&str, &str)> = update
            .into_iter()
            .flat_map(|update| update.assignments())
            .collect();

        if let Some((name, _)) = assignments
            .iter()
            .find(|(name, _)| self.schema.fields().any(|field| field == *name))
        {
            return Err(StoreError::Service {
                operation: "UpdateItem",
                message: format!(
                    "One or more parameter values were invalid: Cannot update attribute {name}. This attribute is part of the key"
                ),
            });
        }

        let mut items = self.items.write().await;
        let item = items.entry(Self::stored_key(key)).or_insert_with(|| {
            let mut item = Item::new();
            let (name, value) = &key.partition;
            item.insert(name.clone(), Value::String(value.clone()));
            if let Some((name, value)) = &key.sort {
                item.insert(name.clone(), Value::String(value.clone()));
            }
            item
        });

        for (name, value) in assignments {
            item.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, key: &ItemKey) -> Result<()> {
        self.record();
        self.items.write().await.remove(&Self::stored_key(key));
        Ok(())
    }
}
