// End-to-end store tests against a wiremock backend.
//
// Each test builds its own Workspace (isolated state container) against
// a fresh mock server, logs in through the real auth path where a token
// is needed, and asserts on store snapshots.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck_core::{
    ClientConfig, CoreError, EntityId, MemorySessionStore, MoveTask, NewProject, NewTask,
    NoticeLevel, SessionStore, TaskStatus, Workspace,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri().parse().expect("mock server URI"),
        ..ClientConfig::default()
    }
}

async fn workspace(server: &MockServer) -> (Workspace, Arc<MemorySessionStore>) {
    let sessions = Arc::new(MemorySessionStore::new());
    let ws = Workspace::new(&config_for(server), sessions.clone()).expect("workspace");
    (ws, sessions)
}

/// Mount the login endpoint and log in as a@x.com.
async fn login(server: &MockServer, ws: &Workspace) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": { "_id": "u1", "name": "Ada", "email": "a@x.com", "role": "owner" }
        })))
        .mount(server)
        .await;

    ws.auth()
        .login("a@x.com", SecretString::from("secret".to_owned()))
        .await
        .expect("login");
}

fn task_json(id: &str, status: &str, order: i64) -> serde_json::Value {
    json!({
        "_id": id,
        "projectId": "p1",
        "title": format!("task {id}"),
        "status": status,
        "order": order
    })
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_stores_session_and_attaches_token() {
    let server = MockServer::start().await;
    let (ws, sessions) = workspace(&server).await;
    login(&server, &ws).await;

    let auth = ws.auth().snapshot();
    assert_eq!(auth.session.as_ref().map(|s| s.token.as_str()), Some("jwt-abc"));
    assert_eq!(auth.user().map(|u| u.email.as_str()), Some("a@x.com"));

    // Session reached durable storage.
    let persisted = sessions.load().expect("load").expect("persisted session");
    assert_eq!(persisted.token, "jwt-abc");

    // A subsequent protected call attaches the token.
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    ws.tasks().fetch_all().await.expect("fetch");
}

#[tokio::test]
async fn protected_call_without_session_fails_fast() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;

    // No mock mounted: hitting the network would fail loudly anyway,
    // but expect(0) pins down that no request is even attempted.
    Mock::given(method("GET"))
        .and(path("/api/projects/get-projects"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = ws.projects().fetch(None).await.expect_err("must fail");
    assert!(matches!(err, CoreError::AuthRequired));
    assert!(err.needs_login());
}

#[tokio::test]
async fn restore_picks_up_persisted_session() {
    let server = MockServer::start().await;
    let sessions = Arc::new(MemorySessionStore::new());
    {
        let ws = Workspace::new(&config_for(&server), sessions.clone()).expect("workspace");
        login(&server, &ws).await;
    }

    // A second workspace over the same storage starts logged in.
    let ws = Workspace::new(&config_for(&server), sessions).expect("workspace");
    assert!(ws.auth().snapshot().is_logged_in());
    assert_eq!(ws.auth().token().expect("token"), "jwt-abc");
}

#[tokio::test]
async fn logout_evicts_caches_and_storage() {
    let server = MockServer::start().await;
    let (ws, sessions) = workspace(&server).await;
    login(&server, &ws).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "To Do", 0)
        ])))
        .mount(&server)
        .await;
    ws.tasks().fetch_all().await.expect("fetch");
    assert_eq!(ws.tasks().snapshot().confirmed.len(), 1);

    ws.logout();

    assert!(!ws.auth().snapshot().is_logged_in());
    assert!(ws.tasks().snapshot().confirmed.is_empty());
    assert!(ws.projects().snapshot().list.is_empty());
    assert!(sessions.load().expect("load").is_none());
    assert!(matches!(
        ws.auth().token().expect_err("cleared"),
        CoreError::AuthRequired
    ));
}

// ── Tasks: fetch + normalization ────────────────────────────────────

#[tokio::test]
async fn fetched_statuses_are_normalized() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "pending", 0),
            task_json("t2", "in-progress", 0),
            task_json("t3", "completed", 0),
            task_json("t4", "archived", 1),
        ])))
        .mount(&server)
        .await;

    ws.tasks()
        .fetch_for_project(&EntityId::from("p1"))
        .await
        .expect("fetch");

    let snap = ws.tasks().snapshot();
    let statuses: Vec<TaskStatus> = snap.confirmed.iter().map(|t| t.status).collect();
    assert_eq!(
        statuses,
        vec![
            TaskStatus::ToDo,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::ToDo,
        ]
    );
}

#[tokio::test]
async fn failed_fetch_resets_list_to_empty() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "To Do", 0)
        ])))
        .expect(1)
        .mount(&server)
        .await;
    ws.tasks().fetch_all().await.expect("first fetch");

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    ws.tasks().fetch_all().await.expect_err("second fetch fails");

    let snap = ws.tasks().snapshot();
    assert!(snap.confirmed.is_empty());
    assert!(snap.fetch.error().is_some());
}

#[tokio::test]
async fn superseded_fetch_is_discarded() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    // Slow response for project p1, fast for p2.
    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([task_json("stale", "To Do", 0)]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "fresh", "projectId": "p2", "title": "fresh", "status": "To Do", "order": 0
        }])))
        .mount(&server)
        .await;

    let slow_ws = ws.clone();
    let slow = tokio::spawn(async move {
        slow_ws
            .tasks()
            .fetch_for_project(&EntityId::from("p1"))
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    ws.tasks()
        .fetch_for_project(&EntityId::from("p2"))
        .await
        .expect("fast fetch");
    slow.await.expect("join").expect("slow fetch resolves");

    // The slow p1 response arrived last but was superseded.
    let snap = ws.tasks().snapshot();
    assert_eq!(snap.confirmed.len(), 1);
    assert_eq!(snap.confirmed[0].id, EntityId::from("fresh"));
    assert_eq!(snap.scope, Some(EntityId::from("p2")));
}

// ── Tasks: create ───────────────────────────────────────────────────

#[tokio::test]
async fn create_task_applies_defaults_and_lands_once() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    ws.tasks()
        .fetch_for_project(&EntityId::from("p1"))
        .await
        .expect("fetch");

    Mock::given(method("POST"))
        .and(path("/api/tasks/"))
        .and(body_partial_json(json!({
            "title": "Fix bug",
            "status": "To Do",
            "assignee": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "t9",
            "projectId": "p1",
            "title": "Fix bug",
            "status": "To Do",
            "assignee": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let task = ws
        .tasks()
        .create(NewTask {
            project_id: EntityId::from("p1"),
            title: "Fix bug".into(),
            description: String::new(),
            assignee: None,
            due_date: None,
            status: None,
        })
        .await
        .expect("create");

    assert_eq!(task.status, TaskStatus::ToDo);
    assert!(task.assignee.is_none());

    let snap = ws.tasks().snapshot();
    let hits = snap.confirmed.iter().filter(|t| t.id == task.id).count();
    assert_eq!(hits, 1);
}

// ── Projects: pagination + create-then-list ─────────────────────────

#[tokio::test]
async fn out_of_bounds_page_keeps_last_valid_pagination() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    Mock::given(method("GET"))
        .and(path("/api/projects/get-projects"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "_id": "p1", "name": "Apollo" }],
            "pagination": { "page": 1, "pages": 2, "total": 8, "limit": 6 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/get-projects"))
        .and(query_param("page", "99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": { "page": 99, "pages": 2, "total": 8, "limit": 6 }
        })))
        .mount(&server)
        .await;

    ws.projects().fetch(Some(1)).await.expect("page 1");
    let before = ws.projects().snapshot().pagination;

    ws.projects().fetch(Some(99)).await.expect("page 99");
    let snap = ws.projects().snapshot();

    assert!(snap.list.is_empty());
    assert_eq!(snap.pagination, before);
}

#[tokio::test]
async fn create_project_then_list_contains_it_exactly_once() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    // The authoritative page already includes the new project after
    // creation (server-computed task counts and all).
    Mock::given(method("GET"))
        .and(path("/api/projects/get-projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "_id": "p9", "name": "Nova", "taskCount": 0 },
                { "_id": "p1", "name": "Apollo", "taskCount": 3 }
            ],
            "pagination": { "page": 1, "pages": 1, "total": 2, "limit": 6 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects/create-project"))
        .and(body_partial_json(json!({ "name": "Nova" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "p9", "name": "Nova"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project = ws
        .projects()
        .create(NewProject {
            name: "Nova".into(),
            description: String::new(),
            members: vec!["a@x.com".into(), "a@x.com".into()],
        })
        .await
        .expect("create");
    assert_eq!(project.id, EntityId::from("p9"));

    let snap = ws.projects().snapshot();
    let hits = snap.list.iter().filter(|p| p.id == project.id).count();
    assert_eq!(hits, 1);
    assert_eq!(snap.current.as_ref().map(|p| p.id.clone()), Some(project.id));
}

// ── Board: optimistic reorder ───────────────────────────────────────

/// Mount a three-task board: To Do [t1], Done [t2, t3].
async fn mount_board(server: &MockServer, ws: &Workspace) {
    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "To Do", 0),
            task_json("t2", "Done", 0),
            task_json("t3", "Done", 1),
        ])))
        .mount(server)
        .await;
    ws.tasks()
        .fetch_for_project(&EntityId::from("p1"))
        .await
        .expect("fetch board");
}

#[tokio::test]
async fn drop_at_current_position_is_free_of_side_effects() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;
    mount_board(&server, &ws).await;

    Mock::given(method("PUT"))
        .and(path("/api/tasks/update-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let before = ws.tasks().snapshot();
    let moved = ws
        .tasks()
        .move_task(MoveTask {
            task_id: EntityId::from("t1"),
            dest_status: TaskStatus::ToDo,
            dest_index: 0,
        })
        .await
        .expect("no-op move");

    assert!(!moved);
    assert_eq!(*before, *ws.tasks().snapshot());
}

#[tokio::test]
async fn successful_move_patches_whole_column_and_confirms() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;
    mount_board(&server, &ws).await;

    let mut notices = ws.notices();

    // Moving t1 into Done at index 0 rewrites all three Done tasks.
    Mock::given(method("PUT"))
        .and(path("/api/tasks/update-order"))
        .and(body_partial_json(json!({
            "tasks": [
                { "taskId": "t1", "status": "Done", "order": 0 },
                { "taskId": "t2", "status": "Done", "order": 1 },
                { "taskId": "t3", "status": "Done", "order": 2 },
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let moved = ws
        .tasks()
        .move_task(MoveTask {
            task_id: EntityId::from("t1"),
            dest_status: TaskStatus::Done,
            dest_index: 0,
        })
        .await
        .expect("move");
    assert!(moved);

    let snap = ws.tasks().snapshot();
    assert!(snap.working.is_none());

    let done: Vec<(&str, i64)> = snap
        .confirmed
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .map(|t| (t.id.as_str(), t.order))
        .collect();
    // Orders are exactly {0, 1, 2}, no gaps or duplicates.
    let mut orders: Vec<i64> = done.iter().map(|(_, o)| *o).collect();
    orders.sort_unstable();
    assert_eq!(orders, vec![0, 1, 2]);
    assert!(done.contains(&("t1", 0)));

    let notice = notices.recv().await.expect("notice");
    assert_eq!(notice.level, NoticeLevel::Success);
}

#[tokio::test]
async fn failed_move_reverts_to_confirmed_snapshot() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;
    mount_board(&server, &ws).await;

    let mut notices = ws.notices();

    Mock::given(method("PUT"))
        .and(path("/api/tasks/update-order"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let before = ws.tasks().snapshot().confirmed.clone();
    ws.tasks()
        .move_task(MoveTask {
            task_id: EntityId::from("t1"),
            dest_status: TaskStatus::Done,
            dest_index: 0,
        })
        .await
        .expect_err("reorder fails");

    let snap = ws.tasks().snapshot();
    assert!(snap.working.is_none());
    assert_eq!(snap.confirmed, before);
    // t1 is back in To Do.
    let t1 = snap.confirmed.iter().find(|t| t.id.as_str() == "t1").expect("t1");
    assert_eq!(t1.status, TaskStatus::ToDo);

    let notice = notices.recv().await.expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
}

#[tokio::test]
async fn failed_move_keeps_fetch_that_landed_mid_flight() {
    let server = MockServer::start().await;
    let (ws, _) = workspace(&server).await;
    login(&server, &ws).await;

    // The board mock serves exactly one fetch, so the mid-flight
    // refetch below falls through to the second mock.
    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t1", "To Do", 0),
            task_json("t2", "Done", 0),
            task_json("t3", "Done", 1),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    ws.tasks()
        .fetch_for_project(&EntityId::from("p1"))
        .await
        .expect("fetch board");

    // The reorder hangs long enough for a refetch to land, then fails.
    Mock::given(method("PUT"))
        .and(path("/api/tasks/update-order"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("boom")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    // Mid-flight, the server's truth changes: t1 got retitled and a new
    // task appeared. The working copy keeps the gesture visible.
    Mock::given(method("GET"))
        .and(path("/api/tasks/project/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "t1", "projectId": "p1", "title": "renamed", "status": "To Do", "order": 0 },
            task_json("t4", "In Progress", 0),
        ])))
        .mount(&server)
        .await;

    let mover = ws.clone();
    let move_handle = tokio::spawn(async move {
        mover
            .tasks()
            .move_task(MoveTask {
                task_id: EntityId::from("t1"),
                dest_status: TaskStatus::Done,
                dest_index: 0,
            })
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    ws.tasks()
        .fetch_for_project(&EntityId::from("p1"))
        .await
        .expect("mid-flight fetch");
    assert!(ws.tasks().snapshot().working.is_some());

    move_handle
        .await
        .expect("join")
        .expect_err("reorder fails");

    // Rollback lands on the *newer* confirmed snapshot, not the
    // pre-drag board.
    let snap = ws.tasks().snapshot();
    assert!(snap.working.is_none());
    assert_eq!(snap.visible().len(), 2);
    let t1 = snap.visible().iter().find(|t| t.id.as_str() == "t1").expect("t1");
    assert_eq!(t1.title, "renamed");
    assert_eq!(t1.status, TaskStatus::ToDo);
}
