use comment_board::board::{ADD_FAILED, DELETE_FAILED, FETCH_FAILED, UPDATE_FAILED};
use comment_board::client::{ClientConfig, ClientError, CommentApi, HttpCommentApi};
use comment_board::models::NewComment;
use comment_board::CommentBoard;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn comment_json(id: i64, text: &str, likes: u32) -> serde_json::Value {
    json!({
        "id": id,
        "text": text,
        "author": 1,
        "author_name": "Admin",
        "created_at": "2026-10-17T09:30:00Z",
        "updated_at": "2026-10-17T09:30:00Z",
        "likes": likes,
        "image": null
    })
}

async fn board_for(server: &MockServer) -> CommentBoard {
    CommentBoard::new(HttpCommentApi::new(ClientConfig::new(server.uri())))
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/comments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn load_counts_returned_comments() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(2, "b", 0), comment_json(1, "a", 3)])).await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    assert_eq!(board.comments().len(), 2);
    assert_eq!(board.comments()[1].likes, 3);
    assert!(board.error().is_none());
}

#[tokio::test]
async fn server_error_keeps_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([comment_json(1, "a", 0)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    board.load_comments().await;
    assert_eq!(board.comments().len(), 1);
    assert_eq!(board.error(), Some(FETCH_FAILED));
}

#[tokio::test]
async fn unreachable_server_sets_fetch_error() {
    // nothing listens on port 9 locally
    let mut board = CommentBoard::new(HttpCommentApi::new(ClientConfig::new("http://127.0.0.1:9/api")));
    board.load_comments().await;
    assert!(board.comments().is_empty());
    assert_eq!(board.error(), Some(FETCH_FAILED));
}

#[tokio::test]
async fn submit_posts_trimmed_text_and_prepends() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(1, "old", 0)])).await;
    Mock::given(method("POST"))
        .and(path("/comments/"))
        .and(body_json(json!({"text": "new one"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json(2, "new one", 0)))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    board.set_compose("  new one ");
    board.submit_compose().await;
    assert_eq!(board.comments()[0].id, 2);
    assert_eq!(board.compose(), "");
}

#[tokio::test]
async fn whitespace_submit_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.submit_comment("   ").await;
    assert!(board.comments().is_empty());
    assert!(board.error().is_none());
}

#[tokio::test]
async fn failed_create_sets_add_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "text may not be blank"})))
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.set_compose("hello");
    board.submit_compose().await;
    assert_eq!(board.error(), Some(ADD_FAILED));
    assert_eq!(board.compose(), "hello");
}

#[tokio::test]
async fn save_edit_puts_draft() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(7, "before", 1)])).await;
    Mock::given(method("PUT"))
        .and(path("/comments/7/"))
        .and(body_json(json!({"text": "after"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(7, "after", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    let target = board.comments()[0].clone();
    board.begin_edit(&target);
    board.set_draft("after ");
    board.save_edit(7).await;
    assert_eq!(board.comment(7).unwrap().text, "after");
    assert!(board.editing().is_none());
}

#[tokio::test]
async fn failed_update_stays_in_edit_mode() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(7, "before", 1)])).await;
    Mock::given(method("PUT"))
        .and(path("/comments/7/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    let target = board.comments()[0].clone();
    board.begin_edit(&target);
    board.set_draft("after");
    board.save_edit(7).await;
    assert_eq!(board.error(), Some(UPDATE_FAILED));
    assert_eq!(board.editing().map(|e| e.id), Some(7));
}

#[tokio::test]
async fn delete_removes_entry() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(2, "b", 0), comment_json(1, "a", 0)])).await;
    Mock::given(method("DELETE"))
        .and(path("/comments/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    assert!(board.remove_comment(2, &mut |_: &str| true).await);
    assert!(board.comment(2).is_none());
    assert_eq!(board.comments().len(), 1);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    let mut asked = None;
    let sent = board
        .remove_comment(2, &mut |prompt: &str| {
            asked = Some(prompt.to_string());
            false
        })
        .await;
    assert!(!sent);
    assert_eq!(asked.as_deref(), Some("Are you sure you want to delete this comment?"));
}

#[tokio::test]
async fn failed_delete_sets_error() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(1, "a", 0)])).await;
    Mock::given(method("DELETE"))
        .and(path("/comments/1/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    board.remove_comment(1, &mut |_: &str| true).await;
    assert_eq!(board.error(), Some(DELETE_FAILED));
    assert!(board.comment(1).is_some());
}

#[tokio::test]
async fn like_patches_incremented_count() {
    let server = MockServer::start().await;
    mount_list(&server, json!([comment_json(3, "c", 4)])).await;
    Mock::given(method("PATCH"))
        .and(path("/comments/3/"))
        .and(body_json(json!({"likes": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(3, "c", 5)))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = board_for(&server).await;
    board.load_comments().await;
    board.like_comment(3).await;
    assert_eq!(board.comment(3).unwrap().likes, 5);
}

#[tokio::test]
async fn api_reports_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let api = HttpCommentApi::new(ClientConfig::new(server.uri()));
    let err = api.create(&NewComment { text: "x".into(), image: None }).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(s) if s.as_u16() == 502));
}
