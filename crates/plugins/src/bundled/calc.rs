//! `calc`: answers bare integer arithmetic like `6 * 7` via the raw chain.

use {
    async_trait::async_trait,
    superbot_common::Message,
    superbot_dispatch::{DispatcherBuilder, Middleware, Next, Plugin, ResponseProxy},
};

pub struct CalcPlugin;

impl Plugin for CalcPlugin {
    fn name(&self) -> &str {
        "calc"
    }

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
        bot.raw(Calc);
        Ok(())
    }
}

struct Calc;

#[async_trait]
impl Middleware for Calc {
    fn name(&self) -> &str {
        "calc"
    }

    async fn handle(
        &self,
        proxy: ResponseProxy,
        message: Message,
        next: Next,
    ) -> anyhow::Result<()> {
        match evaluate(&message.text) {
            Some(Ok(value)) => {
                proxy.respond(value.to_string());
                Ok(())
            },
            Some(Err(reason)) => {
                proxy.error(reason);
                Ok(())
            },
            None => next.run(proxy, message).await,
        }
    }
}

/// `None` when the text is not an expression at all.
fn evaluate(text: &str) -> Option<Result<i64, &'static str>> {
    let mut parts = text.split_whitespace();
    let (lhs, op, rhs) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let (lhs, rhs) = (lhs.parse::<i64>().ok()?, rhs.parse::<i64>().ok()?);
    let value = match op {
        "+" => lhs.checked_add(rhs),
        "-" => lhs.checked_sub(rhs),
        "*" | "x" => lhs.checked_mul(rhs),
        "/" if rhs == 0 => return Some(Err("Division by zero.")),
        "/" => lhs.checked_div(rhs),
        "%" if rhs == 0 => return Some(Err("Division by zero.")),
        "%" => lhs.checked_rem(rhs),
        _ => return None,
    };
    Some(value.ok_or("That number is too big."))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_simple_expressions() {
        assert_eq!(evaluate("6 * 7"), Some(Ok(42)));
        assert_eq!(evaluate("-3 + 5"), Some(Ok(2)));
        assert_eq!(evaluate("7 % 4"), Some(Ok(3)));
        assert_eq!(evaluate("1 / 0"), Some(Err("Division by zero.")));
        assert_eq!(
            evaluate("9223372036854775807 + 1"),
            Some(Err("That number is too big."))
        );
        assert_eq!(evaluate("6 ^ 7"), None);
        assert_eq!(evaluate("six * 7"), None);
        assert_eq!(evaluate("1 + 2 + 3"), None);
    }

    #[tokio::test]
    async fn only_handles_unmatched_messages() {
        let mut builder = DispatcherBuilder::new();
        builder.install(&CalcPlugin).unwrap();
        let bot = builder.build();

        assert_eq!(bot.receive(Message::new("6 * 7")).await.unwrap().text, "42");
        assert_eq!(
            bot.receive(Message::new("hello there")).await.unwrap().text,
            "I don't recognize \"hello\"."
        );
    }
}
