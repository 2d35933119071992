use docassist_client::chat::{
    Conversation, Message, DAILY_REPORT_REQUEST, LOGGED_OUT_NOTICE, SESSION_EXPIRED_NOTICE,
    WELCOME_MESSAGE,
};
use docassist_client::config::ClientOptions;
use docassist_client::DocAssist;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: &str, dir: &tempfile::TempDir) -> DocAssist {
    let options = ClientOptions::default().with_session_file(dir.path().join("session.json"));
    DocAssist::new_with_options(uri, options)
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, role: &str) {
    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "a@b.com",
            "role": role,
            "is_active": true
        })))
        .mount(server)
        .await;
}

/// Log in against the mock server and hand back a live conversation
async fn logged_in_conversation(
    server: &MockServer,
    dir: &tempfile::TempDir,
) -> (DocAssist, Conversation) {
    mount_token(server).await;
    let client = client_for(&server.uri(), dir);
    client.auth().login("a@b.com", "pw123456").await.unwrap();
    let conversation = client.conversation();
    (client, conversation)
}

#[tokio::test]
async fn bootstrap_seeds_a_welcome_message_when_history_is_empty() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (_client, mut conversation) = logged_in_conversation(&server, &dir).await;

    mount_profile(&server, "patient").await;
    Mock::given(method("GET"))
        .and(path("/history/"))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    conversation.bootstrap().await;

    assert_eq!(conversation.messages(), &[Message::ai(WELCOME_MESSAGE)]);
    assert_eq!(conversation.profile().unwrap().email, "a@b.com");
}

#[tokio::test]
async fn bootstrap_replaces_the_log_with_stored_history_in_order() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (_client, mut conversation) = logged_in_conversation(&server, &dir).await;

    mount_profile(&server, "patient").await;
    // History rows carry database columns beyond role/content
    Mock::given(method("GET"))
        .and(path("/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "user_id": 1, "role": "human", "content": "Hi",
             "timestamp": "2025-07-01T10:00:00"},
            {"id": 2, "user_id": 1, "role": "ai", "content": "Hello",
             "timestamp": "2025-07-01T10:00:05"}
        ])))
        .mount(&server)
        .await;

    conversation.bootstrap().await;

    assert_eq!(
        conversation.messages(),
        &[Message::human("Hi"), Message::ai("Hello")]
    );
}

#[tokio::test]
async fn bootstrap_forwards_the_configured_history_limit() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_profile(&server, "patient").await;
    Mock::given(method("GET"))
        .and(path("/history/"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let options = ClientOptions::default()
        .with_session_file(dir.path().join("session.json"))
        .with_history_limit(50);
    let client = DocAssist::new_with_options(&server.uri(), options);
    client.auth().login("a@b.com", "pw123456").await.unwrap();

    let mut conversation = client.conversation();
    conversation.bootstrap().await;

    assert!(conversation.profile().is_some());
}

#[tokio::test]
async fn bootstrap_rejection_forces_logout_with_a_single_notice() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (client, mut conversation) = logged_in_conversation(&server, &dir).await;

    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    conversation.bootstrap().await;

    assert!(client.auth().current_session().is_none());
    assert!(client.auth().restore_session().is_none());
    assert!(conversation.profile().is_none());
    assert_eq!(conversation.messages(), &[Message::system(LOGGED_OUT_NOTICE)]);
}

#[tokio::test]
async fn send_posts_pre_append_history_and_adopts_the_canonical_reply() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (_client, mut conversation) = logged_in_conversation(&server, &dir).await;

    // Prior log is empty, so the outgoing history must be [] even though the
    // user message is appended optimistically before the request resolves
    Mock::given(method("POST"))
        .and(path("/chat/"))
        .and(header("Authorization", "Bearer T"))
        .and(body_json(json!({
            "user_message": "Hi",
            "chat_history": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ai_response": "Hello",
            "updated_chat_history": [
                {"role": "human", "content": "Hi"},
                {"role": "ai", "content": "Hello"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    conversation.send_message("Hi").await;

    // The log equals the server's transcript exactly, not the optimistic
    // append plus the reply
    assert_eq!(
        conversation.messages(),
        &[Message::human("Hi"), Message::ai("Hello")]
    );
    assert!(!conversation.is_loading());
}

#[tokio::test]
async fn send_includes_prior_ai_messages_in_the_payload() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (_client, mut conversation) = logged_in_conversation(&server, &dir).await;

    mount_profile(&server, "patient").await;
    Mock::given(method("GET"))
        .and(path("/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    conversation.bootstrap().await;

    // The seeded welcome message travels with the next request
    Mock::given(method("POST"))
        .and(path("/chat/"))
        .and(body_json(json!({
            "user_message": "Hi",
            "chat_history": [{"role": "ai", "content": WELCOME_MESSAGE}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ai_response": "Hello",
            "updated_chat_history": [
                {"role": "ai", "content": WELCOME_MESSAGE},
                {"role": "human", "content": "Hi"},
                {"role": "ai", "content": "Hello"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    conversation.send_message("Hi").await;

    assert_eq!(conversation.messages().len(), 3);
}

#[tokio::test]
async fn send_rejected_with_403_ends_the_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (client, mut conversation) = logged_in_conversation(&server, &dir).await;

    Mock::given(method("POST"))
        .and(path("/chat/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    conversation.send_message("Hi").await;

    assert!(client.auth().current_session().is_none());
    // The transcript ends with the expired notice, not a generic error
    assert_eq!(
        conversation.messages().last(),
        Some(&Message::system(SESSION_EXPIRED_NOTICE))
    );
    assert!(!conversation.is_loading());
}

#[tokio::test]
async fn send_failure_keeps_the_optimistic_message_and_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (client, mut conversation) = logged_in_conversation(&server, &dir).await;

    Mock::given(method("POST"))
        .and(path("/chat/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "An internal error occurred."
        })))
        .mount(&server)
        .await;

    conversation.send_message("Hi").await;

    assert_eq!(
        conversation.messages(),
        &[
            Message::human("Hi"),
            Message::ai("Error: An internal error occurred.")
        ]
    );
    assert!(client.auth().current_session().is_some());
    assert!(!conversation.is_loading());
}

#[tokio::test]
async fn notices_are_excluded_from_the_outgoing_history() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (client, mut conversation) = logged_in_conversation(&server, &dir).await;

    // Expire the session mid-conversation, then log in again without a
    // bootstrap; the leftover notice must not travel to the backend
    conversation.logout();
    assert_eq!(conversation.messages(), &[Message::system(LOGGED_OUT_NOTICE)]);
    client.auth().login("a@b.com", "pw123456").await.unwrap();

    Mock::given(method("POST"))
        .and(path("/chat/"))
        .and(body_json(json!({
            "user_message": "Hi",
            "chat_history": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ai_response": "Hello",
            "updated_chat_history": [
                {"role": "human", "content": "Hi"},
                {"role": "ai", "content": "Hello"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    conversation.send_message("Hi").await;

    assert_eq!(
        conversation.messages(),
        &[Message::human("Hi"), Message::ai("Hello")]
    );
}

#[tokio::test]
async fn doctors_can_request_the_daily_report() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (_client, mut conversation) = logged_in_conversation(&server, &dir).await;

    mount_profile(&server, "doctor").await;
    Mock::given(method("GET"))
        .and(path("/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    conversation.bootstrap().await;

    Mock::given(method("POST"))
        .and(path("/chat/"))
        .and(body_partial_json(json!({
            "user_message": DAILY_REPORT_REQUEST
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ai_response": "You have 3 appointments today.",
            "updated_chat_history": [
                {"role": "human", "content": DAILY_REPORT_REQUEST},
                {"role": "ai", "content": "You have 3 appointments today."}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    conversation.request_daily_report().await;

    assert_eq!(
        conversation.messages().last(),
        Some(&Message::ai("You have 3 appointments today."))
    );
}
