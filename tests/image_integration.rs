use auth_api::configuration::{get_configuration, DatabaseSettings};
use auth_api::startup::run;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_configuration().expect("Failed to read configuration.");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();
    let connection_pool = configure_database(&configuration.database).await;

    let server = run(listener, connection_pool.clone())
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, config.database_name))
        .await
        .expect("Failed to create database.");
    // Migrate database
    let connection_pool = PgPool::connect(&config.connection_string())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database.");
    connection_pool
}

/// Sign up and log in one account, returning its access token.
async fn obtain_access_token(app: &TestApp) -> String {
    let client = reqwest::Client::new();

    let signup = client
        .post(&format!("{}/signup", &app.address))
        .json(&json!({ "username": "alice", "password": "pw123", "email": "a@x.com" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, signup.status().as_u16());

    let login = client
        .post(&format!("{}/login", &app.address))
        .json(&json!({ "username": "alice", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, login.status().as_u16());

    let body: Value = login.json().await.expect("Failed to parse response");
    body["response"]["accessToken"]
        .as_str()
        .expect("Login response carried no access token")
        .to_string()
}

// --- Access Gate Tests ---

#[tokio::test]
async fn root_without_a_token_returns_401() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&app.address)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        response_body["response"]["message"],
        json!("Please, log in")
    );
    assert_eq!(response_body["success"], json!(false));
}

#[tokio::test]
async fn root_with_a_never_issued_token_returns_401() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&app.address)
        .header("Authorization", "garbage")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        response_body["response"]["message"],
        json!("Please, log in")
    );
    assert_eq!(response_body["success"], json!(false));
}

#[tokio::test]
async fn gated_read_returns_an_image_for_a_valid_token() {
    let app = spawn_app().await;
    let token = obtain_access_token(&app).await;
    let client = reqwest::Client::new();

    // The write side carries no gate
    let upload = client
        .post(&format!("{}/image", &app.address))
        .json(&json!({ "image": "https://example.com/cat.png" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, upload.status().as_u16());

    let response = client
        .get(&app.address)
        .header("Authorization", token)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        response_body["response"]["image"],
        json!("https://example.com/cat.png")
    );
    assert_eq!(response_body["success"], json!(true));
}

#[tokio::test]
async fn gated_read_returns_400_when_no_image_exists() {
    let app = spawn_app().await;
    let token = obtain_access_token(&app).await;

    let response = reqwest::Client::new()
        .get(&app.address)
        .header("Authorization", token)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["response"], json!("No image found"));
    assert_eq!(response_body["success"], json!(false));
}

// --- Image Upload Tests ---

#[tokio::test]
async fn image_upload_requires_no_authentication() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(&format!("{}/image", &app.address))
        .json(&json!({ "image": "https://example.com/dog.png" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(201, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        response_body["response"]["image"],
        json!("https://example.com/dog.png")
    );
    assert_eq!(response_body["success"], json!(true));

    let stored = sqlx::query_as::<_, (String,)>("SELECT image FROM images")
        .fetch_all(&app.db_pool)
        .await
        .expect("Failed to fetch images");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0, "https://example.com/dog.png");
}

#[tokio::test]
async fn image_upload_with_malformed_body_returns_400() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(&format!("{}/image", &app.address))
        .json(&json!({ "picture": "https://example.com/dog.png" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["success"], json!(false));
}
