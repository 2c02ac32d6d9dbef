//! Integration tests for the API, backed by the in-memory mock repository.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use client_registry::api::create_router;
use client_registry::app::AppState;
use client_registry::domain::{
    ClientListResponse, ClientResponse, CreatedResponse, ErrorResponse, HealthResponse,
    HealthStatus, MessageResponse,
};
use client_registry::test_utils::MockClientRepository;

fn create_test_router() -> Router {
    let repo = Arc::new(MockClientRepository::new());
    create_router(Arc::new(AppState::new(repo)))
}

fn joao() -> Value {
    json!({
        "nome": "João Silva",
        "email": "joao@email.com",
        "telefone": "(11) 98765-4321",
        "cpf": "123.456.789-00"
    })
}

fn maria() -> Value {
    json!({
        "nome": "Maria Santos",
        "email": "maria@email.com",
        "telefone": "(11) 98765-4322",
        "cpf": "123.456.789-01"
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body_bytes).unwrap()
}

async fn create(router: &Router, body: &Value) -> i64 {
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/clientes", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json::<CreatedResponse>(response).await.id
}

#[tokio::test]
async fn test_create_client_success() {
    let router = create_test_router();

    let response = router
        .oneshot(json_request("POST", "/api/clientes", &joao()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: CreatedResponse = read_json(response).await;
    assert!(created.id > 0);
    assert_eq!(created.message, "Cliente cadastrado com sucesso");
}

#[tokio::test]
async fn test_create_client_missing_fields() {
    let router = create_test_router();

    let incomplete = json!({ "nome": "João Silva", "email": "joao@email.com" });
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/clientes", &incomplete))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Todos os campos são obrigatórios");

    // Nothing was persisted
    let response = router
        .oneshot(empty_request("GET", "/api/clientes"))
        .await
        .unwrap();
    let list: ClientListResponse = read_json(response).await;
    assert!(list.clients.is_empty());
}

#[tokio::test]
async fn test_create_client_empty_field() {
    let router = create_test_router();

    let mut payload = joao();
    payload["telefone"] = json!("");

    let response = router
        .oneshot(json_request("POST", "/api/clientes", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_client_numeric_phone() {
    let router = create_test_router();

    let mut payload = joao();
    payload["telefone"] = json!(11987654321_i64);
    let id = create(&router, &payload).await;

    let response = router
        .oneshot(empty_request("GET", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    let body: ClientResponse = read_json(response).await;
    assert_eq!(body.client.phone, "11987654321");
}

#[tokio::test]
async fn test_create_client_without_content_type() {
    let router = create_test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/clientes")
        .body(Body::from(joao().to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Todos os campos são obrigatórios");
}

#[tokio::test]
async fn test_create_client_unreadable_body() {
    let router = create_test_router();

    for raw in ["", "{\"nome\": ", "not json"] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/clientes")
            .header("Content-Type", "application/json")
            .body(Body::from(raw))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {raw:?}");

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Todos os campos são obrigatórios");
    }
}

#[tokio::test]
async fn test_create_client_duplicate_email() {
    let router = create_test_router();
    create(&router, &joao()).await;

    let mut duplicate = maria();
    duplicate["email"] = json!("joao@email.com");

    let response = router
        .oneshot(json_request("POST", "/api/clientes", &duplicate))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Email ou CPF já cadastrado");
}

#[tokio::test]
async fn test_create_client_duplicate_cpf() {
    let router = create_test_router();
    create(&router, &joao()).await;

    let mut duplicate = maria();
    duplicate["cpf"] = json!("123.456.789-00");

    let response = router
        .oneshot(json_request("POST", "/api/clientes", &duplicate))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Email ou CPF já cadastrado");
}

#[tokio::test]
async fn test_list_clients_empty() {
    let router = create_test_router();

    let response = router
        .oneshot(empty_request("GET", "/api/clientes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body, json!({ "clientes": [] }));
}

#[tokio::test]
async fn test_list_clients_newest_first() {
    let router = create_test_router();
    create(&router, &joao()).await;
    create(&router, &maria()).await;

    let response = router
        .oneshot(empty_request("GET", "/api/clientes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list: ClientListResponse = read_json(response).await;
    assert_eq!(list.clients.len(), 2);
    assert_eq!(list.clients[0].name, "Maria Santos");
    assert_eq!(list.clients[1].name, "João Silva");
}

#[tokio::test]
async fn test_get_client_success() {
    let router = create_test_router();
    let id = create(&router, &joao()).await;

    let response = router
        .oneshot(empty_request("GET", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: ClientResponse = read_json(response).await;
    assert_eq!(body.client.id, id);
    assert_eq!(body.client.name, "João Silva");
    assert_eq!(body.client.email, "joao@email.com");
}

#[tokio::test]
async fn test_get_client_not_found() {
    let router = create_test_router();

    let response = router
        .oneshot(empty_request("GET", "/api/clientes/9999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Cliente não encontrado");
}

#[tokio::test]
async fn test_get_client_non_numeric_id() {
    let router = create_test_router();

    let response = router
        .oneshot(empty_request("GET", "/api/clientes/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_client_success() {
    let router = create_test_router();
    let id = create(&router, &joao()).await;

    let updated = json!({
        "nome": "João Silva Santos",
        "email": "joao.santos@email.com",
        "telefone": "(11) 98765-9999",
        "cpf": "123.456.789-00"
    });

    let response = router
        .clone()
        .oneshot(json_request("PUT", &format!("/api/clientes/{}", id), &updated))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: MessageResponse = read_json(response).await;
    assert_eq!(body.message, "Cliente atualizado com sucesso");

    let response = router
        .oneshot(empty_request("GET", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    let body: ClientResponse = read_json(response).await;
    assert_eq!(body.client.name, "João Silva Santos");
    assert_eq!(body.client.email, "joao.santos@email.com");
}

#[tokio::test]
async fn test_update_client_not_found() {
    let router = create_test_router();

    let response = router
        .oneshot(json_request("PUT", "/api/clientes/9999", &joao()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Cliente não encontrado");
}

#[tokio::test]
async fn test_update_client_missing_fields() {
    let router = create_test_router();
    let id = create(&router, &joao()).await;

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/clientes/{}", id),
            &json!({ "nome": "Só o nome" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_client_empty_body() {
    let router = create_test_router();
    let id = create(&router, &joao()).await;

    let response = router
        .oneshot(empty_request("PUT", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Todos os campos são obrigatórios");
}

#[tokio::test]
async fn test_update_client_into_taken_email_is_server_error() {
    let router = create_test_router();
    create(&router, &joao()).await;
    let maria_id = create(&router, &maria()).await;

    let mut clash = maria();
    clash["email"] = json!("joao@email.com");

    let response = router
        .clone()
        .oneshot(json_request("PUT", &format!("/api/clientes/{}", maria_id), &clash))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "UNIQUE constraint failed: clientes.email");

    // The row keeps its previous email
    let response = router
        .oneshot(empty_request("GET", &format!("/api/clientes/{}", maria_id)))
        .await
        .unwrap();
    let body: ClientResponse = read_json(response).await;
    assert_eq!(body.client.email, "maria@email.com");
}

#[tokio::test]
async fn test_delete_client_success() {
    let router = create_test_router();
    let id = create(&router, &joao()).await;

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: MessageResponse = read_json(response).await;
    assert_eq!(body.message, "Cliente removido com sucesso");

    let response = router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Second delete reports not found instead of failing
    let response = router
        .oneshot(empty_request("DELETE", &format!("/api/clientes/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_client_not_found() {
    let router = create_test_router();

    let response = router
        .oneshot(empty_request("DELETE", "/api/clientes/9999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Cliente não encontrado");
}

#[tokio::test]
async fn test_backend_failure_returns_500_with_raw_message() {
    let repo = Arc::new(MockClientRepository::failing("database is locked"));
    let router = create_router(Arc::new(AppState::new(repo)));

    let response = router
        .oneshot(empty_request("GET", "/api/clientes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "database is locked");
}

#[tokio::test]
async fn test_health_check() {
    let router = create_test_router();

    let response = router.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, HealthStatus::Healthy);
}

#[tokio::test]
async fn test_liveness() {
    let router = create_test_router();

    let response = router
        .oneshot(empty_request("GET", "/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_unhealthy() {
    let repo = Arc::new(MockClientRepository::new());
    repo.set_healthy(false);
    let router = create_router(Arc::new(AppState::new(repo)));

    let response = router
        .oneshot(empty_request("GET", "/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
