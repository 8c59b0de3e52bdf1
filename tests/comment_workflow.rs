//! End-to-end comment workflow against a mock Bitbucket server.

use brigade::{Account, ApiClient, Comment, Credentials, PullRequest, PullRequestId, RepositorySlug};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMENTS_PATH: &str = "/repositories/team/widget/pullrequests/42/comments";

async fn start_client() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let credentials = Credentials::new("reviewer", "app-password").expect("credentials");
    let account = Account::new("team").expect("account");
    let repository = RepositorySlug::new("widget").expect("repository");
    let client = ApiClient::with_api_root(&server.uri(), credentials, &account, &repository)
        .expect("client should build against mock server");
    (server, client)
}

#[tokio::test]
async fn list_filter_publish_and_delete_round_trip() {
    let (server, client) = start_client().await;

    Mock::given(method("GET"))
        .and(path(COMMENTS_PATH))
        .and(basic_auth("reviewer", "app-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "author_info": { "username": "alice" }, "comment_id": 1 },
            { "author_info": { "username": "bob" }, "comment_id": 2 }
        ])))
        .mount(&server)
        .await;

    let reply = json!({ "content": "Addressed in the follow-up commit." });
    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .and(body_json(&reply))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comment_id": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{COMMENTS_PATH}/1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{COMMENTS_PATH}/2")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "message": "comment not found" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = PullRequestId::new(42).expect("pull request id");
    let pull_request = PullRequest::new(&client, id);

    let alice = pull_request
        .user_comments("alice")
        .await
        .expect("listing should succeed");
    assert_eq!(alice.len(), 1);
    assert_eq!(
        alice.first().and_then(Comment::id),
        Some(1),
        "only alice's comment should match"
    );

    let published = pull_request
        .publish_comments(&[Comment::from(reply)])
        .await;
    assert!(
        matches!(published.first(), Some(Ok(()))),
        "reply should publish"
    );

    let deleted = pull_request.delete_comments(&[1, 2]).await;
    assert_eq!(deleted.len(), 2);
    assert!(matches!(deleted.first(), Some(Ok(()))), "id 1 should delete");
    assert!(
        matches!(deleted.get(1), Some(Err(_))),
        "missing id 2 should settle as an error without aborting id 1"
    );
}
