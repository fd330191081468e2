use pulldown_cmark::{Options, Parser, html};

/// Renders stored post bodies (Markdown) to HTML for single-post responses.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        Self { options }
    }
}

impl MarkdownRenderer {
    pub fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options);
        let mut html_output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_emphasis() {
        let html = MarkdownRenderer::default().render("# Bail\n\nKnow your **rights**.");
        assert!(html.contains("<h1>Bail</h1>"));
        assert!(html.contains("<strong>rights</strong>"));
    }

    #[test]
    fn renders_tables() {
        let html = MarkdownRenderer::default().render("| Court | Fee |\n|---|---|\n| High | 500 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>High</td>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = MarkdownRenderer::default();
        let source = "Some *markdown* with ~~strike~~ and a [link](https://example.com).";
        assert_eq!(renderer.render(source), renderer.render(source));
        assert_ne!(renderer.render(source), source);
    }
}
