use lambda_http::Error;

pub const USERS_TABLE_NAME: &str = "USERS_TABLE_NAME";
pub const TASKS_TABLE_NAME: &str = "TASKS_TABLE_NAME";

/// Reads a table name from the environment. Unset or empty is an error.
pub fn table_name(var: &str) -> Result<String, Error> {
    match std::env::var(var) {
        Ok(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::from(format!("{var} not set"))),
    }
}
