/// Replace `${ENV_VAR}` placeholders in config text.
///
/// `${VAR:-fallback}` uses `fallback` when `VAR` is unset. Other
/// unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// [`substitute_env`] with a custom lookup, so tests need not touch the
/// process environment.
fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let Some(end) = body.find('}') else {
            // Unterminated: keep the remainder verbatim.
            out.push_str(&rest[start..]);
            return out;
        };
        let expr = &body[..end];
        let (name, fallback) = match expr.split_once(":-") {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (expr, None),
        };
        match (lookup(name), fallback) {
            (Some(value), _) if !name.is_empty() => out.push_str(&value),
            (None, Some(fallback)) if !name.is_empty() => out.push_str(fallback),
            _ => {
                out.push_str("${");
                out.push_str(expr);
                out.push('}');
            },
        }
        rest = &body[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        (name == "SUPERBOT_TEST_DIR").then(|| "/srv/plugins".to_string())
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_env_with("plugins_path = \"${SUPERBOT_TEST_DIR}\"", lookup),
            "plugins_path = \"/srv/plugins\""
        );
    }

    #[test]
    fn uses_fallback_for_unset_var() {
        assert_eq!(substitute_env_with("${MISSING:-|}", lookup), "|");
        assert_eq!(
            substitute_env_with("${SUPERBOT_TEST_DIR:-x}", lookup),
            "/srv/plugins"
        );
    }

    #[test]
    fn leaves_unknown_and_malformed() {
        assert_eq!(substitute_env_with("${NOPE}", lookup), "${NOPE}");
        assert_eq!(substitute_env_with("${}", lookup), "${}");
        assert_eq!(substitute_env_with("a ${open", lookup), "a ${open");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain $text"), "plain $text");
    }
}
