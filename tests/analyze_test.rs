// End-to-end tests for the load -> pick -> classify flow against mock services

use mockito::Matcher;
use reqwest::Client;

use review_sentiment::app::{App, Indicator, NO_REVIEWS_MESSAGE, UNPARSEABLE_LABEL};
use review_sentiment::classifier::{Sentiment, SentimentClient};
use review_sentiment::reviews::{ReviewLoader, ReviewSource};

const REVIEWS: &str = "id\ttext\n1\tExcellent sound quality.\n2\tStopped charging after a week.\n";

fn app_for(server: &mockito::ServerGuard) -> App {
    let http = Client::new();
    App::new(
        ReviewLoader::new(http.clone()),
        ReviewSource::from(format!("{}/reviews_test.tsv", server.url()).as_str()),
        SentimentClient::new(http, format!("{}/models/sentiment", server.url())),
    )
}

async fn serve_reviews(server: &mut mockito::ServerGuard, body: &str) {
    server
        .mock("GET", "/reviews_test.tsv")
        .with_status(200)
        .with_header("content-type", "text/tab-separated-values")
        .with_body(body)
        .create_async()
        .await;
}

async fn serve_inference(server: &mut mockito::ServerGuard, status: usize, body: &str) {
    server
        .mock("POST", "/models/sentiment")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
}

#[tokio::test]
async fn test_positive_review_flow() {
    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, REVIEWS).await;
    serve_inference(&mut server, 200, r#"[[{"label":"POSITIVE","score":0.9}]]"#).await;

    let app = app_for(&server);
    assert_eq!(app.load_reviews().await.unwrap(), 2);

    let pending = app.analyze(None).await.unwrap();
    let display = app.display().await;
    assert_eq!(display.review, pending.review);
    assert_eq!(display.sentiment(), Some(Sentiment::Positive));
    assert_eq!(display.label, "Positive");
    assert!(display.error.is_none());
}

#[tokio::test]
async fn test_negative_and_low_confidence() {
    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, REVIEWS).await;
    serve_inference(&mut server, 200, r#"[[{"label":"NEGATIVE","score":0.7}]]"#).await;

    let app = app_for(&server);
    app.load_reviews().await.unwrap();
    app.analyze(None).await.unwrap();
    assert_eq!(app.display().await.sentiment(), Some(Sentiment::Negative));

    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, REVIEWS).await;
    serve_inference(&mut server, 200, r#"[[{"label":"POSITIVE","score":0.4}]]"#).await;

    let app = app_for(&server);
    app.load_reviews().await.unwrap();
    app.analyze(None).await.unwrap();
    let display = app.display().await;
    assert_eq!(display.sentiment(), Some(Sentiment::Neutral));
    assert_eq!(display.label, "Neutral");
}

#[tokio::test]
async fn test_malformed_response_shows_could_not_parse() {
    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, REVIEWS).await;
    serve_inference(&mut server, 200, "{}").await;

    let app = app_for(&server);
    app.load_reviews().await.unwrap();
    app.analyze(None).await.unwrap();

    let display = app.display().await;
    assert_eq!(display.indicator, Indicator::Sentiment(Sentiment::Neutral));
    assert_eq!(display.label, UNPARSEABLE_LABEL);
    assert!(display.error.is_none());
}

#[tokio::test]
async fn test_error_status_shows_banner_and_neutral() {
    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, REVIEWS).await;
    serve_inference(&mut server, 503, r#"{"error":"Model is currently loading"}"#).await;

    let app = app_for(&server);
    app.load_reviews().await.unwrap();
    app.analyze(Some("hf_token")).await.unwrap();

    let display = app.display().await;
    assert_eq!(display.sentiment(), Some(Sentiment::Neutral));
    assert!(display.label.is_empty());
    assert_eq!(
        display.error.as_deref(),
        Some("Sentiment analysis failed: Model is currently loading")
    );
    // Still usable for the next click
    assert!(display.analyze_enabled);
}

#[tokio::test]
async fn test_token_forwarded_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, REVIEWS).await;
    let inference = server
        .mock("POST", "/models/sentiment")
        .match_header("authorization", "Bearer hf_token")
        .match_body(Matcher::Regex(r#""inputs":"#.to_string()))
        .with_status(200)
        .with_body(r#"[[{"label":"POSITIVE","score":0.8}]]"#)
        .create_async()
        .await;

    let app = app_for(&server);
    app.load_reviews().await.unwrap();
    app.analyze(Some(" hf_token ")).await.unwrap();

    inference.assert_async().await;
}

#[tokio::test]
async fn test_empty_review_file_disables_analyze() {
    let mut server = mockito::Server::new_async().await;
    serve_reviews(&mut server, "id\ttext\n1\t\n").await;
    let inference = server
        .mock("POST", "/models/sentiment")
        .expect(0)
        .create_async()
        .await;

    let app = app_for(&server);
    assert!(app.load_reviews().await.is_err());
    assert!(!app.can_analyze().await);

    assert!(app.analyze(None).await.is_none());
    let display = app.display().await;
    assert_eq!(display.error.as_deref(), Some(NO_REVIEWS_MESSAGE));
    assert_eq!(display.indicator, Indicator::Empty);

    inference.assert_async().await;
}

#[tokio::test]
async fn test_review_fetch_failure_shows_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/reviews_test.tsv")
        .with_status(500)
        .create_async()
        .await;

    let app = app_for(&server);
    assert!(app.load_reviews().await.is_err());

    let display = app.display().await;
    let error = display.error.unwrap();
    assert!(error.starts_with("Error loading reviews: Failed to fetch"));
    assert!(display.loading.is_none());
    assert!(!display.analyze_enabled);
}
