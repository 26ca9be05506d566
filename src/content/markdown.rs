//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// Markdown to HTML with syntect highlighting for code blocks
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// `theme` is a syntect bundled theme name
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::with_options(&config.theme, config.line_number)
    }

    fn options() -> Options {
        // Front-matter is split off before the body reaches the parser,
        // so YAML metadata blocks stay disabled.
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
    }

    /// Render block markdown to HTML. Code blocks are replaced by highlighted HTML.
    pub fn render(&self, markdown: &str) -> String {
        // (language, source) of the code block being collected
        let mut code: Option<(Option<String>, String)> = None;

        let events = Parser::new_ext(markdown, Self::options()).filter_map(|event| match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };
                code = Some((lang, String::new()));
                None
            }
            Event::End(TagEnd::CodeBlock) => {
                let (lang, source) = code.take().unwrap_or_default();
                let block = self.highlight_code(&source, lang.as_deref());
                Some(Event::Html(CowStr::from(block)))
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, source)) = code.as_mut() {
                    source.push_str(&text);
                }
                None
            }
            event => Some(event),
        });

        let mut out = String::new();
        html::push_html(&mut out, events);
        out
    }

    /// Render a single line of markdown without the surrounding paragraph
    pub fn render_inline(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options()).filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
            )
        });

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output.trim_end().to_string()
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        // Unknown theme names fall back to any bundled theme
        let highlighted = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            });

        let class = html_escape(lang);
        match highlighted {
            Some(pre) if self.line_numbers => {
                let lines: Vec<&str> = pre.lines().collect();
                let gutter: Vec<String> = (1..=lines.len())
                    .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
                    .collect();
                format!(
                    r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
                    class,
                    gutter.join("\n"),
                    lines.join("\n")
                )
            }
            Some(pre) => format!(r#"<figure class="highlight {}">{}</figure>"#, class, pre),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                class,
                html_escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
