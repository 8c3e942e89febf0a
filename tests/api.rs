use std::sync::Arc;

use pretty_assertions::assert_eq;
use salvo::{
    http::StatusCode,
    test::{ResponseExt, TestClient},
    Response, Service,
};
use serde_json::{json, Value};
use workitem_tracker::{
    app::AppContext,
    domain::service::PasswordHashService,
    error::security::PasswordHashError,
    infra::{memory::MemoryStore, router},
};

const SECRET: &str = "tracker-secret";
const BASE: &str = "http://127.0.0.1:5800";

struct PlainHasher;

impl PasswordHashService for PlainHasher {
    fn hash_password(&self, pwd: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain${pwd}"))
    }
}

fn service() -> Service {
    let ctx = AppContext::new(Arc::new(MemoryStore::new()), Arc::new(PlainHasher));
    Service::new(router::app(ctx, Arc::from(SECRET)))
}

fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

fn location(res: &Response) -> Option<String> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn body(res: &mut Response) -> String {
    res.take_string().await.unwrap()
}

async fn post(service: &Service, path: &str, payload: &Value) -> Response {
    TestClient::post(url(path))
        .add_header("authorization", SECRET, true)
        .json(payload)
        .send(service)
        .await
}

async fn put(service: &Service, path: &str) -> Response {
    TestClient::put(url(path))
        .add_header("authorization", SECRET, true)
        .send(service)
        .await
}

async fn get(service: &Service, path: &str) -> Response {
    TestClient::get(url(path))
        .add_header("authorization", SECRET, true)
        .send(service)
        .await
}

async fn delete(service: &Service, path: &str) -> Response {
    TestClient::delete(url(path))
        .add_header("authorization", SECRET, true)
        .send(service)
        .await
}

fn user(user_name: &str, user_number: &str) -> Value {
    json!({
        "firstName": "Karl",
        "lastName": "Karlsson",
        "userName": user_name,
        "password": "secure:12345678",
        "userNumber": user_number,
    })
}

fn work_item(title: &str, description: &str, status: &str) -> Value {
    json!({ "title": title, "description": description, "status": status })
}

#[tokio::test]
async fn rejects_missing_or_wrong_secret() {
    let service = service();

    let mut res = TestClient::get(url("/teams/all")).send(&service).await;
    assert_eq!(res.status_code(), Some(StatusCode::UNAUTHORIZED));
    let error: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(error["error"], "TokenNotPresent");

    let mut res = TestClient::post(url("/users"))
        .add_header("authorization", "not-the-secret", true)
        .json(&user("karlkarlsson", "Se1"))
        .send(&service)
        .await;
    assert_eq!(res.status_code(), Some(StatusCode::UNAUTHORIZED));
    let error: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(error["error"], "InvalidToken");

    // nothing was created behind the rejected request
    let res = get(&service, "/users/Se1").await;
    assert_eq!(res.status_code(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn secret_ignores_ascii_case() {
    let service = service();

    let mut res = TestClient::get(url("/teams/all"))
        .add_header("authorization", "TRACKER-Secret", true)
        .send(&service)
        .await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(body(&mut res).await, "There are no teams");
}

#[tokio::test]
async fn creates_and_finds_user() {
    let service = service();

    let res = post(&service, "/users", &user("karlkarlsson", "Se1")).await;
    assert_eq!(res.status_code(), Some(StatusCode::CREATED));
    assert_eq!(location(&res).as_deref(), Some("/users/1"));

    let mut res = get(&service, "/users/Se1").await;
    assert_eq!(res.status_code(), Some(StatusCode::OK));
    let found: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(found["id"], 1);
    assert_eq!(found["userName"], "karlkarlsson");
    assert_eq!(found["status"], "Active");
    assert!(found.get("password").is_none());

    let mut res = get(&service, "/users/firstname/Karl").await;
    assert_eq!(res.status_code(), Some(StatusCode::OK));
    let found: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(found.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn rejects_short_user_name_and_duplicate_number() {
    let service = service();

    let mut res = post(&service, "/users", &user("karl", "Se1")).await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        body(&mut res).await,
        "User name must have at least 10 characters"
    );

    let res = post(&service, "/users", &user("karlkarlsson", "Se1")).await;
    assert_eq!(res.status_code(), Some(StatusCode::CREATED));
    let res = post(&service, "/users", &user("annaandersson", "Se1")).await;
    assert_eq!(res.status_code(), Some(StatusCode::CONFLICT));
}

#[tokio::test]
async fn malformed_input_is_bad_request() {
    let service = service();

    let mut res = TestClient::post(url("/teams"))
        .add_header("authorization", SECRET, true)
        .text("team please")
        .send(&service)
        .await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    let error: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(error["error"], "InvalidContent");

    let mut res = put(&service, "/users/abc/Inactive").await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(body(&mut res).await, "Invalid id 'abc'");

    let mut res = put(&service, "/items/state/1/finished").await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(body(&mut res).await, "Invalid status 'finished'");

    let res = get(&service, "/users/nickname/Karl").await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn team_membership_flow() {
    let service = service();

    let res = post(&service, "/teams", &json!({ "name": "Green" })).await;
    assert_eq!(location(&res).as_deref(), Some("/teams/1"));
    post(&service, "/users", &user("karlkarlsson", "Se1")).await;

    let mut res = put(&service, "/teams/asign/1/9").await;
    assert_eq!(res.status_code(), Some(StatusCode::NOT_FOUND));
    assert_eq!(body(&mut res).await, "User 9 does not exist");

    let res = put(&service, "/teams/asign/1/1").await;
    assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));

    let mut res = get(&service, "/users/team/1").await;
    assert_eq!(res.status_code(), Some(StatusCode::OK));
    let members: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(members[0]["userNumber"], "Se1");

    let res = put(&service, "/teams/update/Blue/1").await;
    assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));
    let res = put(&service, "/teams/update/Blue/2").await;
    assert_eq!(res.status_code(), Some(StatusCode::NOT_FOUND));

    let res = put(&service, "/teams/state/1/inactive").await;
    assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));

    let mut res = get(&service, "/teams/all").await;
    let teams: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(teams, json!([{ "id": 1, "name": "Blue", "status": "Inactive" }]));
}

#[tokio::test]
async fn work_item_lifecycle() {
    let service = service();

    let res = post(&service, "/items", &work_item("HTML", "Web page", "STARTED")).await;
    assert_eq!(res.status_code(), Some(StatusCode::CREATED));
    assert_eq!(location(&res).as_deref(), Some("/items/1"));

    let issue = json!({ "title": "Broken", "reason": "Layout breaks" });
    let mut res = post(&service, "/issues/post/1", &issue).await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        body(&mut res).await,
        "Work item 1 is not done, issues are only raised against done work items"
    );

    let res = put(&service, "/items/state/1/done").await;
    assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));

    let res = post(&service, "/issues/post/1", &issue).await;
    assert_eq!(res.status_code(), Some(StatusCode::CREATED));
    assert_eq!(location(&res).as_deref(), Some("/issues/post/1/1"));

    let res = put(&service, "/issues/update/1/Fixed/Was%20slow").await;
    assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));

    let mut res = get(&service, "/issues/all/items").await;
    let items: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(
        items,
        json!([{ "id": 1, "title": "HTML", "description": "Web page", "status": "DONE" }])
    );

    let mut res = get(&service, "/items/search/WEB").await;
    assert_eq!(res.status_code(), Some(StatusCode::OK));
    let found: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(found.as_array().map(Vec::len), Some(1));

    let res = delete(&service, "/items/remove/1/1").await;
    assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));

    let res = get(&service, "/items/state/DONE").await;
    assert_eq!(res.status_code(), Some(StatusCode::NOT_FOUND));
    let res = get(&service, "/issues/all/items").await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn assignment_limits_user_items() {
    let service = service();
    post(&service, "/users", &user("karlkarlsson", "Se1")).await;

    for n in 1..=6 {
        post(&service, "/items", &work_item(&format!("Item {n}"), "task", "UNSTARTED")).await;
    }
    for n in 1..=5 {
        let res = put(&service, &format!("/items/assign/1/{n}")).await;
        assert_eq!(res.status_code(), Some(StatusCode::NO_CONTENT));
    }

    let mut res = put(&service, "/items/assign/1/6").await;
    assert_eq!(res.status_code(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(body(&mut res).await, "User 1 already has 5 work items");

    let mut res = get(&service, "/items/user/1").await;
    let items: Value = serde_json::from_str(&body(&mut res).await).unwrap();
    assert_eq!(items.as_array().map(Vec::len), Some(5));
}
