use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::Message;
use tower::ServiceExt;

use lang_quiz::data::{load_questions_from_json, JsonFileSource};
use lang_quiz::protocol::{ClientMessage, ServerMessage};
use lang_quiz::server::{build_app, AppState};
use lang_quiz::Submission;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/questions.json")
}

fn app_for(path: PathBuf) -> Router {
    let source = Arc::new(JsonFileSource::new(path));
    build_app(AppState::new(source, Duration::from_secs(2)))
}

fn app() -> Router {
    app_for(fixture_path())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_quiz(app: Router, language: &str) -> (StatusCode, Value) {
    let request = Request::get(format!("/api/quiz?language={}", language))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn check(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/quiz/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_quiz_returns_four_distinct_questions() {
    let (status, body) = get_quiz(app(), "PYTHON").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["language"], "python");

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);

    let ids: HashSet<_> = questions
        .iter()
        .map(|q| q["question_id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids.len(), 4);

    for question in questions {
        assert!(question["question_text"].is_string());
        assert!(question["options"].is_array());
        assert!(question.get("correct").is_none());
        assert!(question.get("correct_index").is_none());
    }
}

#[tokio::test]
async fn test_quiz_for_small_and_empty_languages() {
    let (status, body) = get_quiz(app(), "rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);

    let (status, body) = get_quiz(app(), "cobol").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_quiz_unknown_language() {
    let (status, body) = get_quiz(app(), "ruby").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "unknown_language");
    assert_eq!(body["available_languages"], json!(["cobol", "python", "rust"]));
}

#[tokio::test]
async fn test_quiz_without_language_parameter() {
    let request = Request::get("/api/quiz").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_language");
}

#[tokio::test]
async fn test_check_answers() {
    let (status, body) = check(
        app(),
        json!({"language": "python", "answers": {"0": 1, "5": 2}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["score"], 1);
    assert_eq!(body["total"], 2);
    assert_eq!(body["percentage"], 50.0);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["question_id"], 0);
    assert_eq!(results[0]["question_text"], "2+2?");
    assert_eq!(results[0]["your_answer_text"], "4");
    assert_eq!(results[0]["correct_answer_text"], "4");
    assert_eq!(results[0]["is_correct"], true);

    assert_eq!(results[1]["question_id"], 5);
    assert_eq!(results[1]["your_answer_text"], "4");
    assert_eq!(results[1]["correct_answer_text"], "3");
    assert_eq!(results[1]["is_correct"], false);
}

#[tokio::test]
async fn test_check_with_no_answers() {
    let (status, body) = check(app(), json!({"language": "Rust", "answers": {}})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 0);
    assert_eq!(body["total"], 0);
    assert_eq!(body["percentage"], 0.0);
}

#[tokio::test]
async fn test_check_rejects_bad_indices() {
    let (status, body) = check(app(), json!({"language": "python", "answers": {"0": 1, "6": 0}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_question_index");

    let (status, body) = check(app(), json!({"language": "python", "answers": {"first": 0}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_question_index");

    let (status, body) = check(app(), json!({"language": "python", "answers": {"0": 2}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_option_index");

    let (status, body) = check(app(), json!({"language": "python", "answers": {"0": -1}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_option_index");

    let (status, body) = check(app(), json!({"language": "python", "answers": {"0": u64::MAX}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_option_index");
    assert!(body["message"].as_str().unwrap().contains("18446744073709551615"));
}

#[tokio::test]
async fn test_check_repeated_question_id() {
    let request = Request::post("/api/quiz/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"language": "python", "answers": {"0": 1, "0": 0}}"#))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["score"], 0);
    assert_eq!(body["results"][0]["your_answer_text"], "3");
}

#[tokio::test]
async fn test_check_unknown_language() {
    let (status, body) = check(app(), json!({"language": "ruby", "answers": {}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_language");
    assert!(body["message"].as_str().unwrap().contains("python"));
}

#[tokio::test]
async fn test_check_malformed_body() {
    let request = Request::post("/api/quiz/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_missing_store_is_server_error() {
    let app = app_for(PathBuf::from("tests/fixtures/missing.json"));

    let (status, body) = get_quiz(app.clone(), "python").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store_unavailable");

    let (status, body) = check(app, json!({"language": "python", "answers": {"0": 1}})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store_unavailable");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::get("/api/quiz?language=python")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

async fn next_server_message<S>(stream: &mut S) -> ServerMessage
where
    S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => return serde_json::from_str(text.as_str()).unwrap(),
            Some(Ok(_)) => continue,
            other => panic!("unexpected websocket event: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_websocket_round_trip() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", addr))
        .await
        .unwrap();

    let request = ClientMessage::GetQuiz {
        language: "Python".to_string(),
    };
    ws.send(Message::Text(serde_json::to_string(&request).unwrap().into()))
        .await
        .unwrap();

    let ServerMessage::Quiz {
        language,
        questions,
    } = next_server_message(&mut ws).await
    else {
        panic!("expected a quiz");
    };
    assert_eq!(language, "python");
    assert_eq!(questions.len(), 4);

    // Answer everything correctly, using the ids the server handed out.
    let store = load_questions_from_json(fixture_path()).unwrap();
    let python = store.get("python").unwrap();
    let answers: Submission = questions
        .iter()
        .map(|q| (q.question_id, python[q.question_id].correct_index as i64))
        .collect();

    let request = ClientMessage::CheckAnswers {
        language: "python".to_string(),
        answers,
    };
    ws.send(Message::Text(serde_json::to_string(&request).unwrap().into()))
        .await
        .unwrap();

    let ServerMessage::Results(result) = next_server_message(&mut ws).await else {
        panic!("expected results");
    };
    assert_eq!(result.score, 4);
    assert_eq!(result.total, 4);
    assert_eq!(result.percentage, 100.0);
    for (question, answer) in questions.iter().zip(&result.results) {
        assert_eq!(question.question_id, answer.question_id);
        assert_eq!(question.question_text, answer.question_text);
    }

    let request = ClientMessage::GetQuiz {
        language: "ruby".to_string(),
    };
    ws.send(Message::Text(serde_json::to_string(&request).unwrap().into()))
        .await
        .unwrap();

    let ServerMessage::Error {
        kind,
        available_languages,
        ..
    } = next_server_message(&mut ws).await
    else {
        panic!("expected an error");
    };
    assert_eq!(kind, "unknown_language");
    assert_eq!(available_languages, vec!["cobol", "python", "rust"]);

    // A well-formed frame with a string option still gets a reply.
    let frame = r#"{"type":"CheckAnswers","language":"python","answers":{"0":"1"}}"#;
    ws.send(Message::Text(frame.to_string().into())).await.unwrap();

    let ServerMessage::Error { kind, .. } = next_server_message(&mut ws).await else {
        panic!("expected an error");
    };
    assert_eq!(kind, "invalid_request");

    ws.send(Message::Text("{not json".to_string().into())).await.unwrap();
    let ServerMessage::Error { kind, .. } = next_server_message(&mut ws).await else {
        panic!("expected an error");
    };
    assert_eq!(kind, "invalid_request");

    // The connection is still usable afterwards.
    let request = ClientMessage::GetQuiz {
        language: "rust".to_string(),
    };
    ws.send(Message::Text(serde_json::to_string(&request).unwrap().into()))
        .await
        .unwrap();
    let ServerMessage::Quiz { questions, .. } = next_server_message(&mut ws).await else {
        panic!("expected a quiz");
    };
    assert_eq!(questions.len(), 2);
}
