// rest/routes/welcome.rs — Root endpoint.

pub async fn welcome() -> &'static str {
    "Welcome to the Task Management API"
}
