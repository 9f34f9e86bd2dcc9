use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use super::conversions::{item_to_json, key_to_attributes, values_to_attributes};
use super::error::map_sdk_error;
use crate::expression::UpdateExpression;
use crate::keys::{ItemKey, KeySchema};
use crate::store::{Item, Result, TableStore};

/// One DynamoDB table behind the [`TableStore`] operations.
pub struct DynamoStore {
    client: Client,
    table_name: String,
    schema: KeySchema,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>, schema: KeySchema) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            schema,
        }
    }
}

#[async_trait]
impl TableStore for DynamoStore {
    async fn get(&self, key: &ItemKey) -> Result<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        output.item.map(item_to_json).transpose()
    }

    async fn query(&self, partition_value: &str) -> Result<Vec<Item>> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", self.schema.partition)
            .expression_attribute_values(":pk", AttributeValue::S(partition_value.to_string()))
            .send()
            .await
            .map_err(|e| map_sdk_error("Query", e))?;

        tracing::debug!(
            table = %self.table_name,
            count = output.count(),
            "queried partition"
        );

        output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_json)
            .collect()
    }

    async fn update(&self, key: &ItemKey, update: Option<&UpdateExpression>) -> Result<()> {
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)));

        if let Some(update) = update {
            request = request
                .update_expression(&update.expression)
                .set_expression_attribute_names(Some(
                    update
                        .names
                        .iter()
                        .map(|(placeholder, name)| (placeholder.clone(), name.clone()))
                        .collect(),
                ))
                .set_expression_attribute_values(Some(values_to_attributes(&update.values)));
        }

        request
            .send()
            .await
            .map_err(|e| map_sdk_error("UpdateItem", e))?;
        Ok(())
    }

    async fn delete(&self, key: &ItemKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(|e| map_sdk_error("DeleteItem", e))?;
        Ok(())
    }
}
