//! Shell-pipe style chaining of commands within one message.
//!
//! `"echo hi | upper"` runs `echo hi`, then `upper hi`: each later segment
//! is the fixed prefix and the previous reply text is appended to it.

use {
    superbot_common::{Message, text},
    tracing::debug,
};

use crate::{dispatcher::Dispatcher, error::Result};

/// Runs each pipe segment through the dispatcher, feeding replies forward.
#[derive(Clone)]
pub struct PipeOrchestrator {
    dispatcher: Dispatcher,
    separator: String,
}

impl PipeOrchestrator {
    /// `delimiter` is matched with one space on each side.
    pub fn new(dispatcher: Dispatcher, delimiter: &str) -> Self {
        Self {
            dispatcher,
            separator: format!(" {delimiter} "),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Split message text into its pipe segments. Always yields at least one.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(self.separator.as_str()).collect()
    }

    /// Dispatch every segment in order and return the last reply.
    ///
    /// An error reply from a middle segment is piped on like any other
    /// reply; a dispatch fault aborts the pipe.
    pub async fn receive(&self, message: Message) -> Result<Message> {
        let segments: Vec<String> = self
            .segments(&message.text)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let (first, rest) = match segments.split_first() {
            Some((first, rest)) if !rest.is_empty() => (first, rest),
            _ => return self.dispatcher.receive(message).await,
        };

        let mut input = message;
        input.text.clone_from(first);

        for (i, segment) in rest.iter().enumerate() {
            let result = self.dispatcher.receive(input.clone()).await?;
            debug!(stage = i, of = segments.len(), "pipe stage finished");
            input = carry_forward(input, segment, result);
        }

        self.dispatcher.receive(input).await
    }
}

/// Input for the next stage: its own segment text followed by the previous
/// reply text, with the reply's attachments.
fn carry_forward(mut input: Message, segment: &str, result: Message) -> Message {
    input.text = text::join(segment, &result.text, " ");
    input.command = None;
    input.full_text = None;
    input.attachment = result.attachment;
    input.attachments = result.attachments;
    input
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::{
        commands::handler_fn,
        dispatcher::DispatcherBuilder,
        error::{Error, not_recognized},
    };

    type Inputs = Arc<Mutex<Vec<String>>>;

    fn pipeline(inputs: &Inputs) -> PipeOrchestrator {
        let mut builder = DispatcherBuilder::new();
        let seen = Arc::clone(inputs);
        builder
            .command(
                "echo",
                handler_fn(move |proxy, message| {
                    seen.lock()
                        .unwrap()
                        .push(message.full_text.clone().unwrap_or_default());
                    async move {
                        proxy.respond(message);
                        Ok(())
                    }
                }),
            )
            .unwrap();
        builder
            .command(
                "upper",
                handler_fn(|proxy, message| async move {
                    proxy.respond(message.text.to_uppercase());
                    Ok(())
                }),
            )
            .unwrap();
        builder
            .command(
                "count",
                handler_fn(|proxy, message| async move {
                    proxy.respond(message.attachment_count().to_string());
                    Ok(())
                }),
            )
            .unwrap();
        builder
            .command(
                "fail",
                handler_fn(|_, _| async { Err::<(), _>(anyhow::anyhow!("nope")) }),
            )
            .unwrap();
        PipeOrchestrator::new(builder.build(), "|")
    }

    #[tokio::test]
    async fn pipes_reply_into_next_segment() {
        let inputs = Inputs::default();
        let pipe = pipeline(&inputs);

        let reply = pipe.receive(Message::new("echo hi | upper")).await.unwrap();
        assert_eq!(reply.text, "HI");
        assert_eq!(*inputs.lock().unwrap(), vec!["echo hi"]);
    }

    #[tokio::test]
    async fn segment_text_is_prefix_and_reply_is_suffix() {
        let inputs = Inputs::default();
        let pipe = pipeline(&inputs);

        let reply = pipe
            .receive(Message::new("echo b | echo a | echo"))
            .await
            .unwrap();
        assert_eq!(reply.text, "a b");
        assert_eq!(
            *inputs.lock().unwrap(),
            vec!["echo b", "echo a b", "echo a b"]
        );
    }

    #[tokio::test]
    async fn single_segment_is_plain_dispatch() {
        let inputs = Inputs::default();
        let pipe = pipeline(&inputs);

        let reply = pipe.receive(Message::new("upper a|b")).await.unwrap();
        assert_eq!(reply.text, "A|B");
    }

    #[tokio::test]
    async fn error_reply_is_piped_on() {
        let inputs = Inputs::default();
        let pipe = pipeline(&inputs);

        let reply = pipe.receive(Message::new("nope | upper")).await.unwrap();
        assert_eq!(reply.text, not_recognized("nope").to_uppercase());
    }

    #[tokio::test]
    async fn fault_aborts_pipe() {
        let inputs = Inputs::default();
        let pipe = pipeline(&inputs);

        let err = pipe.receive(Message::new("fail | echo x")).await.unwrap_err();
        assert!(matches!(err, Error::Failed));
        assert!(inputs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn attachments_follow_the_pipe() {
        let inputs = Inputs::default();
        let pipe = pipeline(&inputs);

        let inbound = Message::new("echo | count").with_attachment(json!("photo.jpg"));
        let reply = pipe.receive(inbound).await.unwrap();
        assert_eq!(reply.text, "1");
    }

    #[test]
    fn custom_delimiter_needs_surrounding_spaces() {
        let pipe = PipeOrchestrator::new(DispatcherBuilder::new().build(), "&&");
        assert_eq!(pipe.separator(), " && ");
        assert_eq!(pipe.segments("a && b&&c && d"), vec!["a", "b&&c", "d"]);
    }
}
