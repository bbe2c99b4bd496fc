//! Line-oriented console adapter: one inbound message per stdin line.

use {
    superbot_common::Message,
    superbot_dispatch::{Bot, Error},
    tokio::io::{AsyncBufReadExt, BufReader},
    tracing::{debug, warn},
};

/// Serve stdin until EOF.
///
/// In JSON mode each line is a message record and each reply is printed as
/// one; otherwise lines are plain message text.
pub async fn run(bot: &Bot, json: bool) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message = if json {
            match serde_json::from_str::<Message>(&line) {
                Ok(message) => message,
                Err(e) => {
                    warn!(error = %e, "invalid message record");
                    println!("{}", serde_json::json!({ "error": "invalid message" }));
                    continue;
                },
            }
        } else {
            Message::new(line)
        };

        let result = bot.receive(message).await;
        debug!(ok = result.is_ok(), "message handled");
        println!("{}", render(result, json)?);
    }

    Ok(())
}

/// Format a reply (or the user-safe fault text) for output.
pub fn render(result: Result<Message, Error>, json: bool) -> anyhow::Result<String> {
    Ok(match (result, json) {
        (Ok(reply), true) => serde_json::to_string(&reply)?,
        (Err(e), true) => serde_json::json!({ "error": e.to_string() }).to_string(),
        (Ok(reply), false) => match reply.attachment_count() {
            0 => reply.text,
            n => format!("{} [{n} attachment(s)]", reply.text),
        },
        (Err(e), false) => e.to_string(),
    })
}
