use std::time::Duration;
use quiz_realtime_rs::{ClosedReason, ConnectionState, RealtimeClient, RealtimeClientOptions};

/// Test reconnection behavior against a running quiz server
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing to see logs
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("🦀 Testing Reconnection with a real quiz server\n");

    let url = std::env::var("QUIZ_WS_URL").unwrap_or_else(|_| "ws://localhost:8080/ws/quiz".to_string());
    let access_token = std::env::var("QUIZ_ACCESS_TOKEN").ok();

    println!("📡 Connecting to: {}\n", url);

    let client = RealtimeClient::new(
        &url,
        RealtimeClientOptions {
            access_token,
            ..Default::default()
        },
    )?;

    // Print every state transition as it happens
    let mut states = client.state_changes();
    let state_watcher = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            println!("\n🔄 State: {:?}", state);
            if state == ConnectionState::Closed(ClosedReason::RetriesExhausted) {
                println!("🛑 Gave up reconnecting");
            }
        }
    });

    // Test 1: Connect and verify
    println!("✅ Test 1: Initial connection...");
    client.connect().await?;
    assert!(client.is_connected(), "Should be connected");
    println!("✅ Connected successfully!\n");

    tokio::time::sleep(Duration::from_secs(2)).await;

    // Test 2: Manual disconnect should NOT trigger reconnection
    println!("✅ Test 2: Manual disconnect (should NOT auto-reconnect)...");
    client.disconnect();
    assert!(!client.is_connected(), "Should be disconnected");
    println!("✅ Disconnected manually\n");

    println!("⏳ Waiting 5 seconds to verify no auto-reconnect...");
    tokio::time::sleep(Duration::from_secs(5)).await;

    if !client.is_connected() {
        println!("✅ Correctly stayed disconnected after manual disconnect!\n");
    } else {
        return Err("Should NOT reconnect after manual disconnect".into());
    }

    // Test 3: Reconnect and watch automatic recovery
    println!("✅ Test 3: Testing automatic reconnection...");
    client.connect().await?;
    assert!(client.is_connected(), "Should be connected again");
    println!("✅ Reconnected successfully\n");

    println!("💡 To trigger a reconnect:");
    println!("   1. While this is running, restart the quiz server");
    println!("   2. Watch the logs for reconnection attempts (every 3 seconds, at most 5)\n");

    println!("⏳ Monitoring connection for 60 seconds...");
    for i in 1..=60 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        print!(
            "\r⏱  Second {}/60 - Status: {}",
            i,
            if client.is_connected() {
                "🟢 Connected"
            } else {
                "🔴 Disconnected"
            }
        );
        std::io::Write::flush(&mut std::io::stdout())?;
    }
    println!("\n");

    println!("📋 Final state: {:?}", client.state());
    client.disconnect();
    state_watcher.abort();

    println!("\n🎉 Reconnection tests completed!");
    Ok(())
}
