//! Terminal front end for Campus Chat
//!
//! Reads one utterance per line from stdin and prints the conversation,
//! typing indicator and toasts as they change.

use campus_chat::conversation::ERROR_CAPTION;
use campus_chat::{
    ChatConfig, ChatHandle, ChatRuntime, HttpChatBackend, LoggingBackend, Message, SubmitOutcome,
    ViewEvent,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ChatConfig::from_env();
    tracing::info!(
        endpoint = %config.endpoint,
        timeout_secs = ?config.timeout.map(|t| t.as_secs()),
        "Starting chat session"
    );

    let backend = LoggingBackend::new(Arc::new(HttpChatBackend::from_config(&config)?));
    let handle = ChatRuntime::spawn(backend, config.toast);

    for message in &handle.state().messages {
        print_message(message);
    }
    let renderer = tokio::spawn(render(handle.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if handle.submit(line).await? == SubmitOutcome::Rejected {
            println!("(still waiting for the assistant, message not sent)");
        }
    }

    finish(&handle).await?;

    // The view stream closes once the runtime and this handle are gone
    drop(handle);
    renderer.await?;
    Ok(())
}

async fn finish(handle: &ChatHandle) -> Result<(), campus_chat::SessionError> {
    handle.wait_until_idle().await?;
    handle.shutdown().await;
    Ok(())
}

fn print_message(message: &Message) {
    println!("{}", message_line(message));
}

fn message_line(message: &Message) -> String {
    let who = if message.is_user() { "you" } else { "assistant" };
    format!("{who}> {}", message.text)
}

/// Terminal line for a view event, if it should be shown
fn event_line(event: &ViewEvent) -> Option<String> {
    match event {
        ViewEvent::MessageAppended { message } if !message.is_user() => {
            Some(message_line(message))
        }
        ViewEvent::PendingChanged { pending: true } => Some("Assistant is typing...".to_string()),
        ViewEvent::ErrorChanged { last_error: true } => Some(format!("! {ERROR_CAPTION}")),
        // Printed on arrival; a session ending right after a failure cancels
        // the toast before its entry delay elapses
        ViewEvent::NotificationAdded { notification } => {
            Some(format!("[{:?}] {}", notification.kind, notification.text))
        }
        _ => None,
    }
}

async fn render(mut events: broadcast::Receiver<ViewEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(line) = event_line(&event) {
                    println!("{line}");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Renderer lagged behind view events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
