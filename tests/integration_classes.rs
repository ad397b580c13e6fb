mod common;

use axum::http::StatusCode;
use common::{TestApp, messages};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_page_message() {
    let app = TestApp::new();

    let (status, body) = app.get("/criarTurma").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Página para Criar Turma");
}

#[tokio::test]
async fn test_create_class_returns_teacher_id() {
    let app = TestApp::new();
    let teacher = app.create_teacher("Ana").await;

    let (status, body) = app
        .post("/criarTurma", json!({"nome": "Turma A", "professor": "Ana"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Turma criada com sucesso");
    assert_eq!(body["dados"]["id"], teacher["_id"]);
    assert_eq!(body["dados"]["nome"], "Turma A");
    assert_eq!(body["dados"]["professor"], "Ana");
}

#[tokio::test]
async fn test_duplicate_class_name() {
    let app = TestApp::new();
    app.create_teacher("Ana").await;
    app.create_class("Turma A", "Ana").await;

    let (status, body) = app
        .post("/criarTurma", json!({"nome": "Turma A", "professor": "Ana"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "A turma Turma A já existe");

    let (_, body) = app.get("/buscarTurma").await;
    assert_eq!(body["dados"]["dadosTurma"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_teacher() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/criarTurma", json!({"nome": "Turma A", "professor": "Ninguém"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "O professor selecionado não está cadastrado");
}

#[tokio::test]
async fn test_validation_messages() {
    let app = TestApp::new();

    let (status, body) = app.post("/criarTurma", json!({"nome": "  "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec!["O nome da turma é obrigatório", "O nome do professor é obrigatório"]
    );
}

#[tokio::test]
async fn test_list_classes() {
    let app = TestApp::new();
    let teacher = app.create_teacher("Ana").await;
    app.create_class("Turma A", "Ana").await;
    app.create_class("Turma B", "Ana").await;

    let (status, body) = app.get("/buscarTurma").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Lista de Turmas:");
    let classes = body["dados"]["dadosTurma"].as_array().unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0]["nome"], "Turma A");
    assert_eq!(classes[0]["professor"], teacher["_id"]);
}

#[tokio::test]
async fn test_update_class_reassigns_teacher() {
    let app = TestApp::new();
    app.create_teacher("Ana").await;
    let bruno = app.create_teacher("Bruno").await;
    app.create_class("Turma A", "Ana").await;
    let (_, body) = app.get("/buscarTurma").await;
    let class_id = body["dados"]["dadosTurma"][0]["_id"].clone();

    let (status, body) = app
        .put(
            "/editarDadosTurma",
            json!({"turmaId": class_id, "nome": "Turma A2", "professor": "Bruno"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Dados alterados com sucesso");
    assert_eq!(body["dados"]["nomeTurma"], "Turma A2");
    assert_eq!(body["dados"]["nomeProfessor"], "Bruno");
    assert_eq!(body["dados"]["professorID"], bruno["_id"]);
}

#[tokio::test]
async fn test_update_unknown_class() {
    let app = TestApp::new();
    app.create_teacher("Ana").await;

    let (status, body) = app
        .put(
            "/editarDadosTurma",
            json!({"turmaId": Uuid::new_v4().to_string(), "nome": "Turma Z", "professor": "Ana"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "A turma informada não está cadastrada");
}

#[tokio::test]
async fn test_echo_and_delete_class() {
    let app = TestApp::new();
    app.create_teacher("Ana").await;
    app.create_class("Turma A", "Ana").await;
    let (_, body) = app.get("/buscarTurma").await;
    let class_id = body["dados"]["dadosTurma"][0]["_id"].clone();

    let (_, body) = app.get("/editarDadosTurma/t1").await;
    assert_eq!(body["ID"], "t1");

    let (status, body) = app
        .delete("/deletarTurma", json!({"turmaId": class_id}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Turma deletada com sucesso");

    let (_, body) = app.get("/buscarTurma").await;
    assert!(body["dados"]["dadosTurma"].as_array().unwrap().is_empty());
}
