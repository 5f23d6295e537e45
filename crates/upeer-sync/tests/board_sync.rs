use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use upeer_client::services::{ChatService, GroupService, PostService};
use upeer_client::{ApiClient, ClientError, MemoryTokenStore};
use upeer_sync::{ChatRoom, PostBoard};
use upeer_types::models::PostType;

fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Arc::new(MemoryTokenStore::with_token("tok")))
}

fn board(server: &MockServer) -> PostBoard {
    let api = api(server);
    PostBoard::new(PostService::new(api.clone()), GroupService::new(api))
}

fn post_json(id: i64, content: &str) -> serde_json::Value {
    json!({
        "post_id": id,
        "author": "Alice",
        "content": content,
        "type": "seeking",
        "date_created": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn refresh_replaces_wholesale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(1, "a"), post_json(2, "b")])),
        )
        .mount(&server)
        .await;

    let mut board = board(&server);
    board.refresh().await.unwrap();
    assert_eq!(board.posts().len(), 2);
}

#[tokio::test]
async fn create_inserts_server_canonical_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(1, "a")])))
        .mount(&server)
        .await;
    // The server assigns the id; the local list must carry it, not a
    // client-temporary placeholder.
    Mock::given(method("POST"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(77, "fresh")))
        .mount(&server)
        .await;

    let mut board = board(&server);
    board.refresh().await.unwrap();
    let created = board.create("fresh", None, PostType::Seeking).await.unwrap();
    assert_eq!(created.post_id, 77);

    let snapshot = board.posts().snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].post_id, 77, "new posts are prepended");
}

#[tokio::test]
async fn failed_create_leaves_list_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(1, "a")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Course not found"})))
        .mount(&server)
        .await;

    let mut board = board(&server);
    board.refresh().await.unwrap();
    let before = board.posts().snapshot();

    let err = board
        .create("x", Some(999), PostType::Seeking)
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("Course not found"));
    assert_eq!(board.posts().snapshot(), before);
}

#[tokio::test]
async fn edit_replaces_with_canonical_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(1, "a"), post_json(2, "b")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/posts/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(2, "edited")))
        .mount(&server)
        .await;

    let mut board = board(&server);
    board.refresh().await.unwrap();
    board.edit(2, "edited").await.unwrap();

    assert_eq!(board.posts().get(2).unwrap().content, "edited");
    assert_eq!(board.posts().len(), 2);
}

#[tokio::test]
async fn failed_delete_leaves_list_exactly_as_before() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(9, "a"), post_json(2, "b")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/9/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Post not found"})))
        .mount(&server)
        .await;

    let mut board = board(&server);
    board.refresh().await.unwrap();
    let before = board.posts().snapshot();

    let err = board.delete(9).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Post not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(board.posts().snapshot(), before);
}

#[tokio::test]
async fn successful_delete_removes_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(9, "a"), post_json(2, "b")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/9/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut board = board(&server);
    board.refresh().await.unwrap();
    board.delete(9).await.unwrap();
    assert!(!board.posts().contains(9));
    assert_eq!(board.posts().len(), 1);
}

#[tokio::test]
async fn sent_message_survives_poll_refresh_without_duplicate() {
    let server = MockServer::start().await;
    let canonical = json!({
        "message_id": 88,
        "content": "hello",
        "timestamp": "2024-03-01T10:00:05Z",
        "sender": "A"
    });
    Mock::given(method("POST"))
        .and(path("/api/chat/3/messages/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(canonical.clone()))
        .mount(&server)
        .await;
    // The next poll returns history already containing the sent message.
    Mock::given(method("GET"))
        .and(path("/api/chat/3/messages/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "message_id": 87,
                "content": "earlier",
                "timestamp": "2024-03-01T10:00:00Z",
                "sender": "B"
            },
            canonical
        ])))
        .mount(&server)
        .await;

    let mut room = ChatRoom::new(ChatService::new(api(&server)), 3);
    room.send("hello").await.unwrap();
    assert_eq!(room.messages().len(), 1);

    room.refresh().await.unwrap();
    let ids: Vec<i64> = room
        .messages()
        .snapshot()
        .iter()
        .map(|m| m.message_id)
        .collect();
    assert_eq!(ids, vec![87, 88]);
}
