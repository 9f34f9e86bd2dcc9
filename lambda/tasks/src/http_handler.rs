use lambda_http::{tracing, Body, Error, Request, Response};
use serde_json::Value;
use todo_common::error::Result;
use todo_common::keys::TASKS;
use todo_common::request::query_parameter;
use todo_common::response::{envelope, TASKS_ALLOWED_METHODS, UPDATED_MESSAGE};
use todo_common::value::parse_attributes;
use todo_common::{Attributes, Item, TableStore, UpdateExpression};

/// Creates the task if needed, then sets every non-key attribute in `attributes`.
async fn update_user_task<S: TableStore>(store: &S, attributes: Option<Attributes>) -> Result<()> {
    let (key, attributes) = TASKS.split(attributes)?;
    let update = UpdateExpression::build(&attributes);
    tracing::debug!(
        email = key.partition_value(),
        id = key.sort_value(),
        attributes = attributes.len(),
        "updating task"
    );

    store.update(&key, update.as_ref()).await?;
    Ok(())
}

/// Every task filed under `email`, ordered by task id.
async fn get_user_tasks<S: TableStore>(store: &S, email: &str) -> Result<Vec<Item>> {
    Ok(store.query(email).await?)
}

async fn delete_user_task<S: TableStore>(store: &S, email: &str, id: &str) -> Result<()> {
    let key = TASKS.key(email, Some(id))?;
    store.delete(&key).await?;
    Ok(())
}

async fn dispatch<S: TableStore>(store: &S, event: &Request) -> Result<Value> {
    match event.method().as_str() {
        "POST" => {
            let attributes = parse_attributes(event.body().as_ref())?;
            update_user_task(store, attributes).await?;
            Ok(Value::from(UPDATED_MESSAGE))
        }
        "GET" => {
            let email = query_parameter(event, "email")?;
            let tasks = get_user_tasks(store, email).await?;
            Ok(Value::Array(tasks.into_iter().map(Value::Object).collect()))
        }
        "DELETE" => {
            // A task is only addressable by both halves of its key.
            let email = query_parameter(event, "email")?;
            let id = query_parameter(event, "id")?;
            delete_user_task(store, email, id).await?;
            Ok(Value::from(""))
        }
        _ => Ok(Value::from("")),
    }
}

pub(crate) async fn function_handler<S: TableStore>(
    store: &S,
    event: Request,
) -> Result<Response<Body>, Error> {
    tracing::info!(
        method = event.method().as_str(),
        path = event.uri().path(),
        "tasks request"
    );

    envelope(dispatch(store, &event).await, TASKS_ALLOWED_METHODS)
}
