//! Terminal driver for the TechVib client: prints the feed, then runs the
//! chat assistant in a line-oriented loop.

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use techvib_client::chat::{
    ChatConfig, ChatError, ConversationController, GeminiGateway, JsonFileHistoryStore,
};
use techvib_client::feed::{FeedConfig, FeedController};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting TechVib client v{}", env!("CARGO_PKG_VERSION"));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    match rt.block_on(run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> anyhow::Result<()> {
    show_feed().await;

    let config = ChatConfig::default();
    let store = Arc::new(JsonFileHistoryStore::new(config.history_path.clone()));
    let gateway = Arc::new(GeminiGateway::new(config).context("chat gateway setup failed")?);
    let controller = ConversationController::new(gateway, store);
    controller.load_session().await;

    if !controller.messages().is_empty() {
        println!("-- restored {} messages --", controller.messages().len());
    }
    println!("Chat with the assistant. /clear wipes the history, /quit exits.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "/quit" => break,
            "/clear" => {
                controller.clear_session().await;
                println!("-- conversation cleared --");
            }
            text => match controller.send_user_message(text).await {
                Ok(reply) => println!("{}", reply.text),
                Err(ChatError::EmptyMessage) => {}
                Err(err) => eprintln!("error: {err}"),
            },
        }
    }

    Ok(())
}

/// Feed failures never block the chat; they are shown and moved past.
async fn show_feed() {
    let mut feed = match FeedController::new(FeedConfig::default()) {
        Ok(feed) => feed,
        Err(err) => {
            eprintln!("could not set up the feed: {err}");
            return;
        }
    };

    match feed.load().await {
        Ok(posts) => {
            println!("-- {} posts --", posts.len());
            for post in posts.iter().take(10) {
                let author = post
                    .author
                    .as_ref()
                    .map_or("unknown", |author| author.name.as_str());
                println!("[{}] {} by {}", post.id, post.title, author);
            }
        }
        Err(err) => eprintln!("could not load feed: {err}"),
    }
}
