use anyhow::Error;
use serde_json::Value;

/// Boundary to the HTML templating collaborator: takes a template name and
/// a mapping of named values, returns markup. Implementations own escaping
/// and layout; handlers only assemble the context.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String, Error>;
}

/// Stand-in renderer that dumps the page context as escaped JSON, used
/// until a template pack is mounted behind [`Renderer`]. Every route stays
/// inspectable in a browser.
pub struct ContextDump;

impl Renderer for ContextDump {
    fn render(&self, template: &str, context: &Value) -> Result<String, Error> {
        let body = serde_json::to_string_pretty(context)?
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");

        Ok(format!(
            "<!DOCTYPE html>\n<html><head><title>{}</title></head>\n<body><pre>{}</pre></body></html>",
            template, body
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use serde_json::json;

    #[test]
    fn context_dump_escapes_markup() -> Result<(), Error> {
        let html = ContextDump.render("index", &json!({ "title": "<script>alert(1)</script>" }))?;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        Ok(())
    }
}
