//! Message template rendering.
//!
//! Log message templates reference synthesized field values through `{name}`
//! placeholders. Rendering is explicit about missing fields: templates that
//! reference a field the data dictionary does not supply return
//! [`MissingField`], and callers substitute [`FALLBACK_MESSAGE`] instead of
//! failing the whole record.

use std::collections::HashMap;

/// Placeholder message used when a template references an unsupplied field.
pub const FALLBACK_MESSAGE: &str = "Incomplete log message due to missing data.";

/// A template referenced a field that was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template references unsupplied field '{0}'")]
pub struct MissingField(pub String);

/// Render a template by substituting `{name}` placeholders from `fields`.
///
/// Literal braces are not supported; every `{...}` span is treated as a
/// placeholder. An unterminated `{` renders literally.
pub fn render(template: &str, fields: &HashMap<&str, String>) -> Result<String, MissingField> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match fields.get(name) {
                    Some(value) => out.push_str(value),
                    None => return Err(MissingField(name.to_string())),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> HashMap<&'static str, String> {
        let mut map = HashMap::new();
        map.insert("user", "alice.smith3".to_string());
        map.insert("ip_address", "10.0.0.7".to_string());
        map
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let result = render("User '{user}' logged in from {ip_address}", &fields()).unwrap();
        assert_eq!(result, "User 'alice.smith3' logged in from 10.0.0.7");
    }

    #[test]
    fn test_render_no_placeholders() {
        let result = render("Cache corruption detected", &fields()).unwrap();
        assert_eq!(result, "Cache corruption detected");
    }

    #[test]
    fn test_render_missing_field() {
        let err = render("Order '{order_id}' failed", &fields()).unwrap_err();
        assert_eq!(err, MissingField("order_id".to_string()));
    }

    #[test]
    fn test_render_unterminated_brace_is_literal() {
        let result = render("weird {trailing", &fields()).unwrap();
        assert_eq!(result, "weird {trailing");
    }

    #[test]
    fn test_fallback_on_missing_field() {
        let message = render("missing {nope}", &fields())
            .unwrap_or_else(|_| FALLBACK_MESSAGE.to_string());
        assert_eq!(message, FALLBACK_MESSAGE);
    }
}
