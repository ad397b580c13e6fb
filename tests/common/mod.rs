#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use escola::router::init_router;
use escola::state::AppState;
use escola_auth::create_access_token;
use escola_config::JwtConfig;
use escola_core::hash_password;
use escola_db::{MemoryStore, Store};
use escola_models::{Admin, NewAdmin};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        access_token_expiry: 3600,
    }
}

/// State over a fresh in-memory store.
pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), jwt_config())
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(test_state())
    }

    pub fn with_state(state: AppState) -> Self {
        let router = init_router(state.clone());
        Self { state, router }
    }

    pub fn store(&self) -> &dyn Store {
        self.state.store.as_ref()
    }

    /// Sends a request and returns the status with the JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-access-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(body), None).await
    }

    /// Inserts an administrator account straight into the store.
    pub async fn create_admin(&self, email: &str, permission: i32) -> Admin {
        self.store()
            .insert_admin(NewAdmin {
                email: email.to_string(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                permission,
            })
            .await
            .unwrap()
    }

    /// A token for a fresh account with permission level 2.
    pub async fn admin_token(&self) -> String {
        let email = format!("admin-{}@escola.com", Uuid::new_v4().simple());
        let admin = self.create_admin(&email, 2).await;
        token_for(admin.id)
    }

    pub async fn create_student(&self, nome: &str) -> Value {
        let (status, body) = self.post("/criarAluno", person_body(nome)).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["dados"].clone()
    }

    pub async fn create_teacher(&self, nome: &str) -> Value {
        let (status, body) = self.post("/criarProfessor", person_body(nome)).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["dados"].clone()
    }

    pub async fn create_class(&self, nome: &str, professor: &str) -> Value {
        let (status, body) = self
            .post("/criarTurma", json!({"nome": nome, "professor": professor}))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body
    }
}

pub fn token_for(admin_id: Uuid) -> String {
    create_access_token(admin_id, &jwt_config()).unwrap()
}

/// A valid create payload for a student or teacher.
pub fn person_body(nome: &str) -> Value {
    json!({
        "nome": nome,
        "sobrenome": "Silva",
        "telefone": "11987654321",
        "endereco": "Rua das Flores",
        "numEndereco": "42",
        "dataNasc": "2008-03-14",
        "email": format!("{}@escola.com", nome.to_lowercase()),
        "senha1": TEST_PASSWORD,
        "senha2": TEST_PASSWORD
    })
}

/// Messages of a validation failure body.
pub fn messages(body: &Value) -> Vec<String> {
    body["msg"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
