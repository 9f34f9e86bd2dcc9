use lambda_http::{run, service_fn, tracing, Error};
use todo_common::config::{table_name, TASKS_TABLE_NAME};
use todo_common::dynamodb::DynamoStore;
use todo_common::keys::TASKS;
mod http_handler;
use http_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let tasks_table = table_name(TASKS_TABLE_NAME)?;
    tracing::info!(table = %tasks_table, "starting tasks function");

    let store = DynamoStore::new(client, tasks_table, TASKS);

    run(service_fn(|event| function_handler(&store, event))).await
}
