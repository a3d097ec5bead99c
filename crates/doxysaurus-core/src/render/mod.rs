//! Rendering: model values to output lines through a format-specific [`Markup`].
//!
//! Model types implement [`RenderText`] (inline, one string) and/or
//! [`RenderLines`] (block, one entry per output line). Both dispatch with
//! exhaustive `match`, so every model variant has a rendering. Only the
//! [`Markup`] implementation knows the output syntax.

pub mod compound;
pub mod description;
pub mod html;
pub mod linked_text;
pub mod markdown;
pub mod member;
pub mod text;

/// Stands in for a missing description with `suggestToDoDescriptions`.
pub const TODO_PLACEHOLDER: &str = "TODO: add a description.";

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::RenderError;
use crate::model::{MarkupStyle, RefKind};
use crate::options::Options;
use crate::permalink::Resolver;
use std::fmt;
use std::str::FromStr;

pub use compound::{Page, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Text,
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "mdx",
            Self::Html => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" | "mdx" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Html => "html",
        })
    }
}

/// Docusaurus admonition flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Info,
    Warning,
    Danger,
}

impl AdmonitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// One table cell with already rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub content: String,
    pub header: bool,
    pub colspan: u32,
    pub rowspan: u32,
    pub align: Option<String>,
}

impl TableCell {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            header: false,
            colspan: 1,
            rowspan: 1,
            align: None,
        }
    }

    pub fn header(content: impl Into<String>) -> Self {
        Self {
            header: true,
            ..Self::new(content)
        }
    }
}

/// Output syntax primitives. Arguments named `content`, `text` or `label`
/// are already escaped; only [`Markup::escape`] and [`Markup::escape_code`]
/// see raw text.
pub trait Markup: Send + Sync {
    fn format(&self) -> OutputFormat;

    fn escape(&self, text: &str) -> String;
    fn escape_code(&self, text: &str) -> String;

    fn link(&self, label: &str, url: &str) -> String;
    /// A link with hover text. `title` is raw text.
    fn titled_link(&self, label: &str, url: &str, _title: &str) -> String {
        self.link(label, url)
    }
    fn style(&self, style: MarkupStyle, content: &str) -> String;
    fn anchor(&self, id: &str) -> String;
    fn line_break(&self) -> String;
    fn image(&self, url: &str, alt: &str) -> String;

    fn heading(&self, level: u8, text: &str, anchor: Option<&str>) -> Vec<String>;
    fn paragraph(&self, text: &str) -> Vec<String>;
    fn list(&self, ordered: bool, start: Option<u32>, items: Vec<Vec<String>>) -> Vec<String>;
    fn code_block(&self, language: Option<&str>, lines: &[String]) -> Vec<String>;
    /// Wrap one highlighted run of a listing line.
    fn highlight(&self, class: Option<&str>, content: &str) -> String;
    /// Whether code blocks can carry links.
    fn links_in_code(&self) -> bool;
    fn admonition(&self, kind: AdmonitionKind, title: &str, body: Vec<String>) -> Vec<String>;
    /// A titled block that is not an admonition (`Returns`, `See also`, …).
    fn labelled(&self, title: &str, body: Vec<String>) -> Vec<String>;
    fn table(&self, rows: &[Vec<TableCell>], caption: Option<&str>) -> Vec<String>;
    fn definition_list(&self, entries: Vec<(String, Vec<String>)>) -> Vec<String>;
    fn block_quote(&self, body: Vec<String>) -> Vec<String>;
    fn details(&self, summary: &str, body: Vec<String>) -> Vec<String>;
    fn horizontal_rule(&self) -> Vec<String>;
    /// Passthrough for a generator-specific block, if this format takes it.
    fn raw(&self, format: &str, text: &str) -> Option<Vec<String>>;
}

/// Create the markup for an output format.
pub fn create_markup(format: OutputFormat) -> Box<dyn Markup> {
    match format {
        OutputFormat::Text => Box::new(text::TextMarkup),
        OutputFormat::Markdown => Box::new(markdown::MarkdownMarkup),
        OutputFormat::Html => Box::new(html::HtmlMarkup),
    }
}

/// Everything a render call may consult. Cheap to copy.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub markup: &'a dyn Markup,
    pub resolver: &'a Resolver,
    pub options: &'a Options,
    pub diagnostics: &'a Diagnostics,
    /// Added to `sectN` levels to get heading levels.
    pub heading_offset: u8,
    /// Text leaves are inside a code block.
    pub in_code: bool,
    /// Unresolved references warn. Off for text repeated from another page.
    pub report_unresolved: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        markup: &'a dyn Markup,
        resolver: &'a Resolver,
        options: &'a Options,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            markup,
            resolver,
            options,
            diagnostics,
            heading_offset: 1,
            in_code: false,
            report_unresolved: true,
        }
    }

    pub fn with_heading_offset(self, heading_offset: u8) -> Self {
        Self {
            heading_offset,
            ..self
        }
    }

    pub fn code(self) -> Self {
        Self { in_code: true, ..self }
    }

    pub fn quiet(self) -> Self {
        Self {
            report_unresolved: false,
            ..self
        }
    }

    pub fn heading_level(&self, level: u8) -> u8 {
        level.saturating_add(self.heading_offset).clamp(1, 6)
    }

    /// Escape a text leaf. Outside code, line breaks in the source become
    /// plain spaces.
    pub fn text(&self, raw: &str) -> String {
        if self.in_code {
            self.markup.escape_code(raw)
        } else {
            self.markup.escape(&raw.replace(['\n', '\r'], " "))
        }
    }

    /// Link `label` (already rendered) to `refid`, or fall back to the label
    /// with an `UnresolvedReference` warning. Code references and quiet
    /// contexts fall back silently.
    pub fn reference(&self, refid: &str, kindref: RefKind, external: Option<&str>, label: String) -> String {
        self.titled_reference(refid, kindref, external, None, label)
    }

    /// [`RenderContext::reference`] carrying a tooltip onto the link.
    pub fn titled_reference(
        &self,
        refid: &str,
        kindref: RefKind,
        external: Option<&str>,
        tooltip: Option<&str>,
        label: String,
    ) -> String {
        if external.is_some() {
            return label;
        }
        if self.in_code && !self.markup.links_in_code() {
            return label;
        }
        match self.resolver.permalink(refid, kindref) {
            Some(link) => match tooltip {
                Some(title) => self.markup.titled_link(&label, &link.url(self.options), title),
                None => self.markup.link(&label, &link.url(self.options)),
            },
            None if self.in_code || !self.report_unresolved => label,
            None => {
                self.diagnostics.warn(
                    DiagnosticKind::UnresolvedReference,
                    format!("unresolved reference '{refid}'"),
                );
                label
            }
        }
    }

    /// Link to a compound id, with no warning when it is unknown.
    pub fn compound_link(&self, id: &str, label: String) -> String {
        match self.resolver.permalink(id, RefKind::Compound) {
            Some(link) => self.markup.link(&label, &link.url(self.options)),
            None => label,
        }
    }

    pub fn unsupported(&self, what: &str, value: &str) {
        self.diagnostics.warn(
            DiagnosticKind::UnsupportedValue,
            format!("unsupported {what} '{value}', rendered without styling"),
        );
    }
}

/// Render to one inline string.
pub trait RenderText {
    fn render_text(&self, cx: &RenderContext<'_>) -> String;
}

/// Render to output lines.
pub trait RenderLines {
    fn render_lines(&self, cx: &RenderContext<'_>) -> Vec<String>;
}

impl<T: RenderText> RenderText for [T] {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        self.iter().map(|item| item.render_text(cx)).collect()
    }
}

impl<T: RenderText> RenderText for Option<T> {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        self.as_ref().map(|v| v.render_text(cx)).unwrap_or_default()
    }
}

impl<T: RenderLines> RenderLines for Option<T> {
    fn render_lines(&self, cx: &RenderContext<'_>) -> Vec<String> {
        self.as_ref().map(|v| v.render_lines(cx)).unwrap_or_default()
    }
}

/// Append a block, separated from what precedes it by one blank line.
pub fn push_block(lines: &mut Vec<String>, block: Vec<String>) {
    if block.is_empty() {
        return;
    }
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
    lines.extend(block);
}

/// Collapse block lines into one inline string.
pub fn inline(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Owned pieces behind a [`RenderContext`].
    pub struct Fixture {
        pub markup: Box<dyn Markup>,
        pub resolver: Resolver,
        pub options: Options,
        pub diagnostics: Diagnostics,
    }

    impl Fixture {
        pub fn new(format: OutputFormat) -> Self {
            Self::with_resolver(format, Resolver::default())
        }

        pub fn with_resolver(format: OutputFormat, resolver: Resolver) -> Self {
            Self {
                markup: create_markup(format),
                resolver,
                options: Options::default(),
                diagnostics: Diagnostics::default(),
            }
        }

        pub fn cx(&self) -> RenderContext<'_> {
            RenderContext::new(self.markup.as_ref(), &self.resolver, &self.options, &self.diagnostics)
        }
    }
}
