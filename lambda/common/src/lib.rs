//! Shared pieces of the users and tasks Lambda functions.
//!
//! Both functions map REST verbs onto a single DynamoDB table: `POST`
//! upserts a record from a JSON body, `GET` reads by query string key,
//! `DELETE` removes by key. Record attributes are client-defined; only the
//! key fields are known here.

pub mod config;
pub mod dynamodb;
pub mod error;
pub mod expression;
pub mod keys;
pub mod memory;
pub mod request;
pub mod response;
pub mod store;
pub mod value;

pub use error::{HandlerError, StoreError};
pub use expression::UpdateExpression;
pub use keys::{ItemKey, KeySchema};
pub use store::{Item, TableStore};
pub use value::{Attributes, FieldValue};
