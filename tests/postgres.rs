//! Runs against the Postgres configured in `.env`, start one and use
//! `cargo test -- --ignored`.

use std::{sync::Arc, time::Duration};

use pretty_assertions::assert_eq;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    StatusCode,
};
use salvo::{listener::TcpListener, Server};
use serde_json::{json, Value};
use serial_test::serial;
use url::Url;
use workitem_tracker::{
    app::AppContext,
    domain::{
        datatype::{ActivityStatus, WorkItemStatus},
        entity::{
            organization::{TeamState, UserState},
            tracking::{IssueState, WorkItemState},
            Entity,
        },
        repository::{IssueRepository, TeamRepository, UserRepository, WorkItemRepository},
    },
    error::persistence::PersistenceError,
    infra::{database::repository::PgStore, router, service::security::Argon2HashService},
};

use crate::setup::setup_database;

mod setup;

const SECRET: &str = "tracker-secret";

fn user_state(user_number: &str) -> UserState {
    UserState {
        first_name: "Karl".into(),
        last_name: "Karlsson".into(),
        user_name: "karlkarlsson".into(),
        password: "hash".into(),
        user_number: user_number.into(),
        status: ActivityStatus::Active,
        team_id: None,
    }
}

fn work_item_state(description: &str, status: WorkItemStatus) -> WorkItemState {
    WorkItemState {
        title: "Item".into(),
        description: description.into(),
        status,
        user_id: None,
        team_id: None,
    }
}

#[tokio::test]
#[serial]
#[ignore]
async fn user_number_is_unique() {
    let store = PgStore::new(setup_database().await);

    let user = store.insert_user(user_state("Se1")).await.unwrap();
    assert_eq!(store.find_users_by_number("Se1").await.unwrap(), vec![user]);

    let duplicate = store.insert_user(user_state("Se1")).await;
    assert!(matches!(
        duplicate,
        Err(PersistenceError::Database(Some(code))) if code == "23505"
    ));
}

#[tokio::test]
#[serial]
#[ignore]
async fn team_members_are_counted() {
    let store = PgStore::new(setup_database().await);
    let team = store
        .insert_team(TeamState {
            name: "Green".into(),
            status: ActivityStatus::Active,
        })
        .await
        .unwrap();

    for n in 0..3 {
        let mut user = store.insert_user(user_state(&format!("Se{n}"))).await.unwrap();
        user.join_team(team.ident());
        store.save_user(&user).await.unwrap();
    }

    assert_eq!(store.count_team_members(team.ident()).await.unwrap(), 3);
    assert!(store.team_has_users(team.ident()).await.unwrap());
    assert_eq!(
        store.find_team_status(team.ident()).await.unwrap(),
        Some(ActivityStatus::Active)
    );
}

#[tokio::test]
#[serial]
#[ignore]
async fn work_item_removal_cascades_issues() {
    let store = PgStore::new(setup_database().await);
    let item = store
        .insert_work_item(work_item_state("Java 100% Web Service", WorkItemStatus::Done))
        .await
        .unwrap();
    let issue = store
        .insert_issue(IssueState {
            title: "Slow".into(),
            reason: "Timeouts".into(),
            answer: None,
            work_item_id: Some(item.ident()),
        })
        .await
        .unwrap();

    let found = store.search_work_items("100% web").await.unwrap();
    assert_eq!(found, vec![item.clone()]);
    assert!(store.search_work_items("_").await.unwrap().is_empty());
    assert_eq!(store.find_work_items_with_issue().await.unwrap(), vec![item.clone()]);

    store.delete_work_item(item.ident()).await.unwrap();
    assert!(!store.issue_exists(issue.ident()).await.unwrap());
    assert!(!store.any_issue_with_work_item().await.unwrap());
}

#[tokio::test]
#[serial]
#[ignore]
async fn serves_over_http() {
    let pool = setup_database().await;
    let ctx = AppContext::new(
        Arc::new(PgStore::new(pool)),
        Arc::new(Argon2HashService::new()),
    );
    let port: u16 = std::env::var("PORT")
        .unwrap()
        .parse()
        .expect("Invalid PORT");
    let listener = TcpListener::bind(&format!("127.0.0.1:{port}"));
    tokio::spawn(Server::new(listener).serve(router::app(ctx, Arc::from(SECRET))));

    let mut headers = HeaderMap::new();
    headers.append("authorization", HeaderValue::from_static(SECRET));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(1000 * 10))
        .default_headers(headers)
        .build()
        .expect("Expect to create a http client");
    let base = Url::parse(&format!("http://localhost:{port}")).unwrap();

    let res = client
        .post(base.join("/users").unwrap())
        .json(&json!({
            "firstName": "Karl",
            "lastName": "Karlsson",
            "userName": "karlkarlsson",
            "password": "secure:12345678",
            "userNumber": "Se1",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["location"], "/users/1");

    let res = client.get(base.join("/users/Se1").unwrap()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = res.json().await.unwrap();
    assert_eq!(user["userName"], "karlkarlsson");
    assert!(user.get("password").is_none());

    let res = client.get(base.join("/items/state/DONE").unwrap()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "No work item has status DONE");
}
