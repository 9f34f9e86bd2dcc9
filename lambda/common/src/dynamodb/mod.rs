//! DynamoDB implementation of [`TableStore`](crate::store::TableStore).

mod conversions;
mod error;
mod store;

pub use store::DynamoStore;
