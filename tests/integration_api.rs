#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;
use serde_json::{Value, json};

mod common;

#[tokio::test]
async fn test_livez() {
    let app = common::TestApp::spawn_empty().await;

    let resp = app.client.get(format!("{}/livez", app.server_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_dashboard_counts_seed_data() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["analytics"]["totalConversations"], 2);
    assert_eq!(body["analytics"]["totalMessages"], 18);
    assert_eq!(body["analytics"]["totalPhoneNumbers"], 2);
    assert_eq!(body["phoneNumbers"][0]["phone"], "+13125550100");
}

#[tokio::test]
async fn test_create_phone_number_normalizes_and_lists() {
    let app = common::TestApp::spawn_empty().await;

    let resp = app
        .client
        .post(app.url("/phone-numbers"))
        .json(&json!({ "name": "  Night Shift ", "phone": "+1 (415) 555-0100" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("phone-"));

    let one: Value =
        app.client.get(app.url(&format!("/phone-numbers/{id}"))).send().await.unwrap().json().await.unwrap();
    assert_eq!(one["name"], "Night Shift");
    assert_eq!(one["phone"], "+14155550100");
    assert_eq!(one["userId"], app.config.user_id.as_str());

    let list: Vec<Value> = app.client.get(app.url("/phone-numbers")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_create_phone_number_rejections() {
    let app = common::TestApp::spawn().await;

    let short = app
        .client
        .post(app.url("/phone-numbers"))
        .json(&json!({ "name": "Short", "phone": "555" }))
        .send()
        .await
        .unwrap();
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    let body: Value = short.json().await.unwrap();
    assert_eq!(body["code"], "invalid_phone");

    let nameless = app
        .client
        .post(app.url("/phone-numbers"))
        .json(&json!({ "name": "   ", "phone": "+14155550100" }))
        .send()
        .await
        .unwrap();
    assert_eq!(nameless.status(), StatusCode::BAD_REQUEST);
    let body: Value = nameless.json().await.unwrap();
    assert_eq!(body["error"], "Phone name and number are required.");

    let duplicate = app
        .client
        .post(app.url("/phone-numbers"))
        .json(&json!({ "name": "Again", "phone": "+13125550100" }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let national = app
        .client
        .post(app.url("/phone-numbers"))
        .json(&json!({ "name": "Same line", "phone": "(312) 555-0100" }))
        .send()
        .await
        .unwrap();
    assert_eq!(national.status(), StatusCode::CONFLICT);

    assert_eq!(app.store.list_phone_numbers(&app.config.user_id).await.len(), 2);
}

#[tokio::test]
async fn test_delete_phone_number_removes_its_conversations() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.delete(app.url("/phone-numbers/phone-02")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let gone = app.client.get(app.url("/conversations/conversation-02")).send().await.unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let again = app.client.delete(app.url("/phone-numbers/phone-02")).send().await.unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_conversations_listed_by_latest_activity() {
    let app = common::TestApp::spawn().await;

    let list: Vec<Value> = app.client.get(app.url("/conversations")).send().await.unwrap().json().await.unwrap();

    let ids: Vec<&str> = list.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["conversation-01", "conversation-02"]);
    assert_eq!(list[0]["messages"], json!([]));

    // A fresh message moves the older conversation to the top.
    let resp = app
        .client
        .post(app.url("/conversations/conversation-02/messages"))
        .json(&json!({ "content": "Following up on the demo." }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let list: Vec<Value> = app.client.get(app.url("/conversations")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list[0]["id"], "conversation-02");
}

#[tokio::test]
async fn test_create_conversation() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/conversations"))
        .json(&json!({ "phoneNumberId": "phone-01", "counterpartyNumber": "+15035550199" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let one: Value =
        app.client.get(app.url(&format!("/conversations/{id}"))).send().await.unwrap().json().await.unwrap();
    assert_eq!(one["title"], "Primary Support");
    assert_eq!(one["counterpartyNumber"], "+15035550199");
    assert_eq!(one["phoneNumberId"], "phone-01");

    let window: Value =
        app.client.get(app.url(&format!("/conversations/{id}/messages"))).send().await.unwrap().json().await.unwrap();
    assert_eq!(window["messages"], json!([]));
    assert_eq!(window["nextCursor"], Value::Null);
}

#[tokio::test]
async fn test_create_conversation_rejections() {
    let app = common::TestApp::spawn().await;

    let unknown = app
        .client
        .post(app.url("/conversations"))
        .json(&json!({ "phoneNumberId": "phone-99" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let bad_recipient = app
        .client
        .post(app.url("/conversations"))
        .json(&json!({ "phoneNumberId": "phone-01", "counterpartyNumber": "12" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_recipient.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.store.list_conversations(&app.config.user_id).await.len(), 2);
}

#[tokio::test]
async fn test_send_message() {
    let app = common::TestApp::spawn().await;

    let blank = app
        .client
        .post(app.url("/conversations/conversation-01/messages"))
        .json(&json!({ "content": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let missing = app
        .client
        .post(app.url("/conversations/nope/messages"))
        .json(&json!({ "content": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let resp = app
        .client
        .post(app.url("/conversations/conversation-01/messages"))
        .json(&json!({ "content": "  On the way.  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let msg: Value = resp.json().await.unwrap();
    assert_eq!(msg["content"], "On the way.");
    assert_eq!(msg["messageType"], "OUTBOUND");
    assert_eq!(msg["status"], "pending");
    assert_eq!(msg["fromNumber"], "+13125550100");

    let window: Value = app
        .client
        .get(app.url("/conversations/conversation-01/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let messages = window["messages"].as_array().unwrap();
    assert_eq!(messages.last().unwrap()["id"], msg["id"]);
}

#[tokio::test]
async fn test_delete_conversation() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.delete(app.url("/conversations/conversation-01")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let list: Vec<Value> = app.client.get(app.url("/conversations")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list.len(), 1);

    let dashboard: Value = app.client.get(app.url("/dashboard")).send().await.unwrap().json().await.unwrap();
    assert_eq!(dashboard["analytics"]["totalMessages"], 6);
}
