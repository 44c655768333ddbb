use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use finsight::{AssistantClient, Backend, Error, NewsResponse};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> AssistantClient {
    AssistantClient::with_options(Some(format!("http://{addr}")), None).unwrap()
}

async fn echo_answer(axum::Json(body): axum::Json<Value>) -> impl IntoResponse {
    match body.get("query").and_then(Value::as_str) {
        Some(query) if !query.is_empty() => (
            StatusCode::OK,
            axum::Json(json!({ "answer": format!("You asked: {query}") })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "error": "No question provided" })),
        ),
    }
}

async fn headlines() -> impl IntoResponse {
    axum::Json(json!([
        {
            "Headline": "Stocks rally on rate hopes",
            "Vader Sentiment": "Positive",
            "Vader Sentiment Score": 0.62,
            "TextBlob Sentiment": "Positive"
        },
        {
            "Headline": "Oil slides",
            "Vader Sentiment": "Negative"
        }
    ]))
}

#[tokio::test]
async fn ask_question_returns_answer() {
    let addr = serve(Router::new().route("/ask-question", post(echo_answer))).await;
    let client = client_for(addr);

    let response = client.ask_question("What is a bond?").await.unwrap();
    assert_eq!(response.into_answer_text(), "You asked: What is a bond?");
}

#[tokio::test]
async fn ask_question_reads_error_body_on_bad_request() {
    let addr = serve(Router::new().route("/ask-question", post(echo_answer))).await;
    let client = client_for(addr);

    let response = client.ask_question("").await.unwrap();
    assert_eq!(response.error.as_deref(), Some("No question provided"));
    assert_eq!(response.into_answer_text(), "Error: No question provided");
}

#[tokio::test]
async fn ask_question_without_answer_field() {
    let app = Router::new().route("/ask-question", post(|| async { axum::Json(json!({})) }));
    let addr = serve(app).await;
    let client = client_for(addr);

    let response = client.ask_question("anything").await.unwrap();
    assert_eq!(response.into_answer_text(), "(no answer)");
}

#[tokio::test]
async fn non_json_server_error() {
    let app = Router::new().route(
        "/ask-question",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>kaboom</html>") }),
    );
    let addr = serve(app).await;
    let client = client_for(addr);

    let err = client.ask_question("anything").await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.message(), "<html>kaboom</html>");
}

#[tokio::test]
async fn non_json_success_is_a_serialization_error() {
    let app = Router::new().route("/get_news", get(|| async { "not json" }));
    let addr = serve(app).await;
    let client = client_for(addr);

    let err = client.get_news().await.unwrap_err();
    assert!(err.is_serialization());
}

#[tokio::test]
async fn get_news_decodes_articles() {
    let addr = serve(Router::new().route("/get_news", get(headlines))).await;
    let client = client_for(addr);

    let response = client.get_news().await.unwrap();
    let articles = response.articles().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].headline, "Stocks rally on rate hopes");
    assert_eq!(articles[0].sentiment_label(), "Positive");
    assert_eq!(articles[0].vader_score, Some(0.62));
    assert_eq!(articles[1].sentiment_class(), "negative");
    assert_eq!(articles[1].vader_score, None);
}

#[tokio::test]
async fn get_news_error_object() {
    let app = Router::new().route(
        "/get_news",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "error": "No news found" })),
            )
        }),
    );
    let addr = serve(app).await;
    let client = client_for(addr);

    let response = client.get_news().await.unwrap();
    assert_eq!(
        response,
        NewsResponse::Error {
            error: "No news found".to_string()
        }
    );
}

#[tokio::test]
async fn get_news_error_object_with_non_string_error() {
    let app = Router::new().route(
        "/get_news",
        get(|| async { (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": 42 }))) }),
    );
    let addr = serve(app).await;
    let client = client_for(addr);

    let response = client.get_news().await.unwrap();
    assert_eq!(response.error(), Some("42"));
}

#[tokio::test]
async fn base_url_path_is_preserved() {
    let app = Router::new().route("/api/get_news", get(headlines));
    let addr = serve(app).await;
    let client = AssistantClient::with_options(Some(format!("http://{addr}/api")), None).unwrap();

    let response = client.get_news().await.unwrap();
    assert_eq!(response.articles().map(<[_]>::len), Some(2));
}

#[tokio::test]
async fn connection_refused() {
    // Bind then drop to find a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client_for(addr);

    let err = client.get_news().await.unwrap_err();
    assert!(err.is_connection(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn configured_timeout_fires() {
    let app = Router::new().route(
        "/ask-question",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            axum::Json(json!({ "answer": "late" }))
        }),
    );
    let addr = serve(app).await;
    let client = AssistantClient::with_options(
        Some(format!("http://{addr}")),
        Some(Duration::from_millis(100)),
    )
    .unwrap();

    let err = client.ask_question("slow").await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, Error::Timeout { .. }));
}

#[tokio::test]
async fn client_works_through_backend_trait() {
    let addr = serve(Router::new().route("/ask-question", post(echo_answer))).await;
    let backend: Box<dyn Backend> = Box::new(client_for(addr));

    let response = backend.ask_question("via trait").await.unwrap();
    assert_eq!(response.answer.as_deref(), Some("You asked: via trait"));
}
