/// Platform-dependent scenario tests
///
/// These run the handlers and repositories against an in-process stub of the
/// Supabase platform (see `common::StubPlatform`): the two-phase upload with
/// its compensating delete, the response shape of a successful upload, the
/// stamps on a freshly created project, and the `created_by` backfill when a
/// task is created without a caller identity.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use common::{app_state, bearer_for, StubPlatform};
use taskflow_api::app::build_router;
use taskflow_shared::models::task::{CreateTask, Task, TaskError};
use taskflow_shared::supabase::SupabaseClient;
use tower::Service as _;
use uuid::Uuid;

fn project_row(id: Uuid, owner_id: Uuid) -> serde_json::Value {
    let now = Utc::now().to_rfc3339();
    serde_json::json!({
        "id": id,
        "name": "Redesign",
        "description": null,
        "owner_id": owner_id,
        "created_at": now,
        "updated_at": now,
    })
}

fn task_row(id: Uuid, project_id: Uuid, created_by: Uuid) -> serde_json::Value {
    let now = Utc::now().to_rfc3339();
    serde_json::json!({
        "id": id,
        "project_id": project_id,
        "title": "Write copy",
        "description": "Landing page copy",
        "status": "todo",
        "priority": "medium",
        "assigned_to": null,
        "created_by": created_by,
        "created_at": now,
        "updated_at": now,
    })
}

fn multipart_upload_request(task_id: Uuid, auth: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let boundary = "platform-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            b = boundary,
            f = file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{b}--\r\n", b = boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(format!("/api/files/upload?task_id={}", task_id))
        .header(header::AUTHORIZATION, auth)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_created_project_is_stamped_for_caller() {
    let stub = StubPlatform::new();
    let addr = stub.clone().spawn().await;
    let mut app = build_router(app_state(addr));

    let user = Uuid::new_v4();
    let request = Request::builder()
        .method("POST")
        .uri("/api/projects/")
        .header(header::AUTHORIZATION, bearer_for(user))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "name": "Redesign" }).to_string(),
        ))
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json["owner_id"], user.to_string());
    assert_eq!(json["name"], "Redesign");
    assert_eq!(json["created_at"], json["updated_at"]);
    // Fresh identifier, generated server-side
    json["id"].as_str().unwrap().parse::<Uuid>().unwrap();
}

#[tokio::test]
async fn test_upload_success_response_shape() {
    let stub = StubPlatform::new();
    let user = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let task_id = Uuid::new_v4();
    stub.seed_rows("projects", vec![project_row(project_id, user)]);
    stub.seed_rows("tasks", vec![task_row(task_id, project_id, user)]);
    let addr = stub.clone().spawn().await;
    let mut app = build_router(app_state(addr));

    let content = vec![b'x'; 500];
    let request = multipart_upload_request(task_id, &bearer_for(user), "notes.txt", &content);
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;

    assert_eq!(json["message"], "File uploaded successfully");
    let data = &json["data"];
    assert_eq!(data["task_id"], task_id.to_string());
    assert_eq!(data["file_name"], "notes.txt");
    assert_eq!(data["size"], 500);

    // Stored under a generated name, not the client's filename
    let file_path = data["file_path"].as_str().unwrap();
    assert!(file_path.ends_with(".txt"));
    assert_ne!(file_path, "notes.txt");
    assert!(data["url"].as_str().unwrap().ends_with(file_path));

    // Exactly one object write, under the generated name
    let ops = stub.recorded_storage_ops();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].0, "POST");
    assert_eq!(ops[0].1, format!("task-files/{}", file_path));
}

#[tokio::test]
async fn test_metadata_failure_removes_stored_object() {
    let stub = StubPlatform::new();
    let user = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let task_id = Uuid::new_v4();
    stub.seed_rows("projects", vec![project_row(project_id, user)]);
    stub.seed_rows("tasks", vec![task_row(task_id, project_id, user)]);
    stub.fail_inserts("task_files");
    let addr = stub.clone().spawn().await;
    let mut app = build_router(app_state(addr));

    let request = multipart_upload_request(task_id, &bearer_for(user), "notes.txt", b"hello");
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"], "internal_error");

    // The object written in phase one was deleted when phase two failed
    let ops = stub.recorded_storage_ops();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].0, "POST");
    assert_eq!(ops[1].0, "DELETE");
    assert_eq!(ops[0].1, ops[1].1);
}

#[tokio::test]
async fn test_task_create_backfills_creator_from_project_owner() {
    let stub = StubPlatform::new();
    let owner = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    stub.seed_rows("projects", vec![project_row(project_id, owner)]);
    let addr = stub.clone().spawn().await;

    let client = SupabaseClient::new(format!("http://{}", addr), "service");
    let task = Task::create(
        &client,
        CreateTask {
            project_id,
            title: "Write copy".to_string(),
            description: "Landing page copy".to_string(),
            status: "todo".to_string(),
            priority: "medium".to_string(),
            assigned_to: None,
        },
        None,
    )
    .await
    .unwrap();

    // No caller identity: the parent project's owner is recorded
    assert_eq!(task.created_by, owner);
    assert_eq!(task.project_id, project_id);
    assert_eq!(task.created_at, task.updated_at);
}

#[tokio::test]
async fn test_task_create_without_parent_project_fails() {
    let stub = StubPlatform::new();
    let addr = stub.spawn().await;

    let client = SupabaseClient::new(format!("http://{}", addr), "service");
    let err = Task::create(
        &client,
        CreateTask {
            project_id: Uuid::new_v4(),
            title: "Write copy".to_string(),
            description: "Landing page copy".to_string(),
            status: "todo".to_string(),
            priority: "medium".to_string(),
            assigned_to: None,
        },
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TaskError::ProjectNotFound));
}
