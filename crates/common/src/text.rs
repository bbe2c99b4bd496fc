//! Small string helpers shared by the dispatcher and plugins.

use std::{collections::HashMap, fmt::Display};

/// Split `text` on the first space into `(head, rest)`.
///
/// Without a space the whole text is the head and the rest is empty.
pub fn parse(text: &str) -> (&str, &str) {
    text.split_once(' ').unwrap_or((text, ""))
}

/// Join two strings with `delim`, unless either side is empty.
pub fn join(left: &str, right: &str, delim: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left}{delim}{right}"),
    }
}

/// Replace `{key}` placeholders in `template`.
///
/// Keys match case-insensitively and every occurrence is replaced.
/// Placeholders without a matching argument are left untouched.
pub fn format<K, V>(template: &str, args: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: Display,
{
    let args: HashMap<String, String> = args
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_lowercase(), v.to_string()))
        .collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };
        let key = &after[..close];
        match args.get(&key.to_lowercase()) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            },
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

/// [`format`] with positional `{0}`, `{1}`, ... placeholders.
pub fn format_positional<V: Display>(template: &str, args: &[V]) -> String {
    format(
        template,
        args.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
    )
}
