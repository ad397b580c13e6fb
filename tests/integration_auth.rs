mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{TEST_PASSWORD, TestApp, jwt_config, messages};
use escola_auth::verify_token;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_login_token_opens_admin_routes() {
    let app = TestApp::new();
    let admin = app.create_admin("root@escola.com", 2).await;

    let (status, body) = app
        .post(
            "/login",
            json!({"email": "root@escola.com", "senha": TEST_PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Login realizado com sucesso");
    let token = body["token"].as_str().unwrap();
    let claims = verify_token(token, &jwt_config()).unwrap();
    assert_eq!(claims.admin_id(), Some(admin.id));

    let (status, _) = app.send("GET", "/buscarAdmin", None, Some(token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_low_permission_login_is_still_gated() {
    let app = TestApp::new();
    app.create_admin("secretaria@escola.com", 1).await;

    let (status, body) = app
        .post(
            "/login",
            json!({"email": "secretaria@escola.com", "senha": TEST_PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app.send("GET", "/buscarAdmin", None, Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Acesso negado");
}

#[tokio::test]
async fn test_deleted_account_loses_access() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let other_token = app.admin_token().await;
    let claims = verify_token(&other_token, &jwt_config()).unwrap();

    let (status, _) = app
        .send(
            "DELETE",
            "/deletarAdmin",
            Some(json!({"adminId": claims.user_id})),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send("GET", "/buscarAdmin", None, Some(&other_token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "O usuário não é um ADM");
}

#[tokio::test]
async fn test_wrong_credentials() {
    let app = TestApp::new();
    app.create_admin("root@escola.com", 2).await;

    for body in [
        json!({"email": "root@escola.com", "senha": "senha-errada"}),
        json!({"email": "ninguem@escola.com", "senha": TEST_PASSWORD}),
    ] {
        let (status, body) = app.post("/login", body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "E-mail ou senha inválidos");
    }
}

#[tokio::test]
async fn test_login_validation() {
    let app = TestApp::new();

    let (status, body) = app.post("/login", json!({"email": "nao-e-email"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = messages(&body);
    assert!(messages.contains(&"O e-mail informado não é válido".to_string()));
    assert!(messages.contains(&"A senha é obrigatória".to_string()));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Escola API");
    assert!(body["paths"]["/criarAluno"]["post"].is_object());
}

#[tokio::test]
async fn test_preflight_allows_access_token_header() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/buscarAdmin")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-access-token")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("x-access-token"));
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
