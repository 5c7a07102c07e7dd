use crate::spec::Spec;

/// Render a self-contained HTML page that embeds `spec` and hands it to GenomeSpy.
///
/// Important: we avoid `format!()` because the page contains JS object braces,
/// which would conflict with Rust formatting.
pub fn render_html_report(spec: &Spec, title: &str) -> anyhow::Result<String> {
    let json = serde_json::to_string(spec)?; // embedded as JS object literal
    // A closing script tag inside a string value would end the script block early.
    let json = json.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<script src="https://cdn.jsdelivr.net/npm/@genome-spy/core/dist/index.js"></script>
<style>
  html, body { height: 100%; margin: 0; }
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; display: flex; flex-direction: column; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; font-size: 14px; color: #333; }
  #container { flex: 1; position: relative; overflow: hidden; }
</style>
</head>
<body>
<header>__TITLE__</header>
<div id="container"></div>

<script>
// Embedded viewer spec (JSON object literal)
const SPEC = __SPEC__;

genomeSpyEmbed.embed(document.getElementById("container"), SPEC);
</script>
</body>
</html>
"#;

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__SPEC__", &json))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{FileKind, FileSet, Row};
    use crate::spec::create_spec;
    use serde_json::json;

    #[test]
    fn embeds_spec_and_title() {
        let spec = create_spec(&FileSet::new(), Some("hg38"));
        let html = render_html_report(&spec, "Tumor <A>").unwrap();

        assert!(html.contains("<title>Tumor &lt;A&gt;</title>"));
        assert!(html.contains("gc-content.hg38.json"));
        assert!(!html.contains("__SPEC__"));
        assert!(!html.contains("__TITLE__"));
    }

    #[test]
    fn script_close_in_data_is_escaped() {
        let mut row = Row::new();
        row.insert("contig".to_string(), json!("</script>"));
        let spec = create_spec(&FileSet::new().with(FileKind::Seg, vec![row]), None);

        let html = render_html_report(&spec, "x").unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains(r#"<\/script>"#));
    }
}
