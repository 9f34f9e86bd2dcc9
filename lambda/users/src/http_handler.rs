use lambda_http::{tracing, Body, Error, Request, Response};
use serde_json::Value;
use todo_common::error::Result;
use todo_common::keys::USERS;
use todo_common::request::query_parameter;
use todo_common::response::{envelope, UPDATED_MESSAGE, USERS_ALLOWED_METHODS};
use todo_common::value::parse_attributes;
use todo_common::{Attributes, Item, TableStore, UpdateExpression};

/// Creates the user if needed, then sets every non-key attribute in `attributes`.
async fn update_user<S: TableStore>(store: &S, attributes: Option<Attributes>) -> Result<()> {
    let (key, attributes) = USERS.split(attributes)?;
    let update = UpdateExpression::build(&attributes);
    tracing::debug!(
        email = key.partition_value(),
        attributes = attributes.len(),
        "updating user"
    );

    store.update(&key, update.as_ref()).await?;
    Ok(())
}

async fn get_user<S: TableStore>(store: &S, email: &str) -> Result<Option<Item>> {
    let key = USERS.key(email, None)?;
    Ok(store.get(&key).await?)
}

async fn delete_user<S: TableStore>(store: &S, email: &str) -> Result<()> {
    let key = USERS.key(email, None)?;
    store.delete(&key).await?;
    Ok(())
}

async fn dispatch<S: TableStore>(store: &S, event: &Request) -> Result<Value> {
    match event.method().as_str() {
        "POST" => {
            let attributes = parse_attributes(event.body().as_ref())?;
            update_user(store, attributes).await?;
            Ok(Value::from(UPDATED_MESSAGE))
        }
        "GET" => {
            let email = query_parameter(event, "email")?;
            let user = get_user(store, email).await?;
            Ok(user.map(Value::Object).unwrap_or(Value::Null))
        }
        "DELETE" => {
            let email = query_parameter(event, "email")?;
            delete_user(store, email).await?;
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
        "users request"
    );

    envelope(dispatch(store, &event).await, USERS_ALLOWED_METHODS)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lambda_http::RequestExt;
    use serde_json::json;
    use todo_common::memory::InMemoryStore;

    use super::*;

    fn request(method: &str, body: Body, query: &[(&str, &str)]) -> Request {
        let event = lambda_http::http::Request::builder()
            .method(method)
            .uri("/users")
            .body(body)
            .unwrap();
        if query.is_empty() {
            return event;
        }
        event.with_query_string_parameters(
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn body_json(response: &Response<Body>) -> Value {
        match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected a text body, got {other:?}"),
        }
    }

    async fn post(store: &InMemoryStore, body: &str) -> Response<Body> {
        function_handler(store, request("POST", Body::from(body), &[]))
            .await
            .unwrap()
    }

    async fn get(store: &InMemoryStore, email: &str) -> Response<Body> {
        function_handler(store, request("GET", Body::Empty, &[("email", email)]))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_then_get_returns_stringified_attributes() {
        let store = InMemoryStore::new(USERS);

        let response = post(
            &store,
            r#"{"email":"a@x.com","name":"Ann","age":30,"admin":false}"#,
        )
        .await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!("Succesfully updated record"));

        let response = get(&store, "a@x.com").await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_json(&response),
            json!({"email": "a@x.com", "name": "Ann", "age": "30", "admin": "false"})
        );
    }

    #[tokio::test]
    async fn test_post_never_changes_the_email_key() {
        let store = InMemoryStore::new(USERS);
        post(&store, r#"{"email":"a@x.com","name":"Ann"}"#).await;
        post(&store, r#"{"email":"a@x.com","name":"Anne"}"#).await;

        assert_eq!(store.len().await, 1);
        let user = body_json(&get(&store, "a@x.com").await);
        assert_eq!(user["email"], "a@x.com");
        assert_eq!(user["name"], "Anne");
    }

    #[tokio::test]
    async fn test_user_id_field_is_an_ordinary_attribute() {
        let store = InMemoryStore::new(USERS);
        post(&store, r#"{"email":"a@x.com","id":"u-1"}"#).await;

        let user = body_json(&get(&store, "a@x.com").await);
        assert_eq!(user["id"], "u-1");
    }

    #[tokio::test]
    async fn test_get_missing_user_is_null() {
        let store = InMemoryStore::new(USERS);
        let response = get(&store, "nobody@x.com").await;

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), Value::Null);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_null() {
        let store = InMemoryStore::new(USERS);
        post(&store, r#"{"email":"a@x.com","name":"Ann"}"#).await;

        let response = function_handler(
            &store,
            request("DELETE", Body::Empty, &[("email", "a@x.com")]),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!(""));

        assert_eq!(body_json(&get(&store, "a@x.com").await), Value::Null);
    }

    #[tokio::test]
    async fn test_delete_missing_user_succeeds() {
        let store = InMemoryStore::new(USERS);
        let response = function_handler(
            &store,
            request("DELETE", Body::Empty, &[("email", "nobody@x.com")]),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!(""));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_400_with_parse_message() {
        let store = InMemoryStore::new(USERS);
        let response = post(&store, "{not json").await;

        assert_eq!(response.status(), 400);
        let message = body_json(&response);
        assert!(message.as_str().unwrap().contains("key must be a string"));
        assert_eq!(store.operations(), 0);
    }

    #[tokio::test]
    async fn test_post_without_email_is_400() {
        let store = InMemoryStore::new(USERS);
        let response = post(&store, r#"{"name":"Ann"}"#).await;

        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response), json!("Missing key attribute: email"));
    }

    #[tokio::test]
    async fn test_get_without_email_is_400() {
        let store = InMemoryStore::new(USERS);
        let response = function_handler(&store, request("GET", Body::Empty, &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response),
            json!("Missing query string parameter: email")
        );
    }

    #[tokio::test]
    async fn test_other_methods_are_a_no_op() {
        let store = InMemoryStore::new(USERS);
        let response = function_handler(&store, request("PUT", Body::from("{}"), &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!(""));
        assert_eq!(
            response.headers()["Access-Control-Allow-Methods"],
            "OPTIONS,POST,GET,DELETE"
        );
        assert_eq!(store.operations(), 0);
    }
}
