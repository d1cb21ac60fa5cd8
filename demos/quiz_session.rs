use std::time::Duration;
use quiz_realtime_rs::{QuizEvent, RealtimeClient, RealtimeClientOptions};
use serde_json::json;

/// Joins a quiz session, buzzes on the first question pushed and answers it
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("🦀 Quiz session demo\n");

    let origin = std::env::var("QUIZ_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let session_id: i64 = std::env::var("QUIZ_SESSION_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or(1);
    let team_id = std::env::var("QUIZ_TEAM_ID").ok().and_then(|id| id.parse().ok());

    let client = RealtimeClient::from_origin(
        &origin,
        RealtimeClientOptions {
            access_token: std::env::var("QUIZ_ACCESS_TOKEN").ok(),
            ..Default::default()
        },
    )?;
    println!("📡 Endpoint: {}\n", client.endpoint());

    // Log everything the server sends
    let _all = client.on(QuizEvent::Wildcard, |message| {
        println!("📨 {}", message);
    });

    let _joined = client.on(QuizEvent::JoinSuccess, |data| {
        println!("✅ Joined session: {}", data);
    });

    // Buzz in and answer as soon as a question arrives
    let responder = client.clone();
    let _questions = client.on(QuizEvent::QuestionPush, move |question| {
        let Some(question_id) = question.get("questionId").and_then(|id| id.as_i64()) else {
            println!("⚠️  Question without questionId: {}", question);
            return;
        };
        responder.buzz(session_id, question_id, None, team_id);
        responder.submit_answer(session_id, question_id, json!("A"));
    });

    let _scores = client.on(QuizEvent::ScoreUpdate, |scores| {
        println!("🏆 Scores: {}", scores);
    });

    client.connect().await?;
    println!("✅ Connected!\n");

    if !client.join_session(session_id, team_id, None) {
        return Err("join_session was not sent".into());
    }

    println!("⏳ Listening until Ctrl+C...");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = tokio::time::sleep(Duration::from_secs(600)) => {}
    }

    client.leave_session(session_id);
    client.disconnect();
    println!("👋 Disconnected");

    Ok(())
}
