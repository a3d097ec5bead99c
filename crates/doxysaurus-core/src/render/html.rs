//! HTML fragments. Pages are bodies only; the surrounding document is the
//! site generator's business.

use super::{AdmonitionKind, Markup, OutputFormat, TableCell};
use crate::model::MarkupStyle;

pub struct HtmlMarkup;

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attribute(s: &str) -> String {
    escape_html(s).replace('\'', "&#39;")
}

fn wrap_block(open: String, body: Vec<String>, close: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(open);
    lines.extend(body);
    lines.push(close.to_string());
    lines
}

impl Markup for HtmlMarkup {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn escape(&self, text: &str) -> String {
        escape_html(text)
    }

    fn escape_code(&self, text: &str) -> String {
        escape_html(text)
    }

    fn link(&self, label: &str, url: &str) -> String {
        format!("<a href=\"{}\">{label}</a>", escape_attribute(url))
    }

    fn titled_link(&self, label: &str, url: &str, title: &str) -> String {
        format!(
            "<a href=\"{}\" title=\"{}\">{label}</a>",
            escape_attribute(url),
            escape_attribute(title)
        )
    }

    fn style(&self, style: MarkupStyle, content: &str) -> String {
        let tag = match style {
            MarkupStyle::Bold => "b",
            MarkupStyle::Emphasis => "em",
            MarkupStyle::ComputerOutput => "code",
            MarkupStyle::Strike => "s",
            MarkupStyle::Underline => "u",
            MarkupStyle::Del => "del",
            MarkupStyle::Ins => "ins",
            MarkupStyle::Subscript => "sub",
            MarkupStyle::Superscript => "sup",
            MarkupStyle::Small => "small",
            MarkupStyle::Center => "center",
            MarkupStyle::Cite => "cite",
        };
        format!("<{tag}>{content}</{tag}>")
    }

    fn anchor(&self, id: &str) -> String {
        format!("<a id=\"{}\"></a>", escape_attribute(id))
    }

    fn line_break(&self) -> String {
        "<br/>".to_string()
    }

    fn image(&self, url: &str, alt: &str) -> String {
        format!("<img src=\"{}\" alt=\"{alt}\"/>", escape_attribute(url))
    }

    fn heading(&self, level: u8, text: &str, anchor: Option<&str>) -> Vec<String> {
        let level = level.clamp(1, 6);
        match anchor {
            Some(id) => vec![format!("<h{level} id=\"{}\">{text}</h{level}>", escape_attribute(id))],
            None => vec![format!("<h{level}>{text}</h{level}>")],
        }
    }

    fn paragraph(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        vec![format!("<p>{text}</p>")]
    }

    fn list(&self, ordered: bool, start: Option<u32>, items: Vec<Vec<String>>) -> Vec<String> {
        let (open, close) = match (ordered, start) {
            (true, Some(n)) if n != 1 => (format!("<ol start=\"{n}\">"), "</ol>"),
            (true, _) => ("<ol>".to_string(), "</ol>"),
            (false, _) => ("<ul>".to_string(), "</ul>"),
        };
        let mut body = Vec::new();
        for item in items {
            let item: Vec<String> = item.into_iter().filter(|l| !l.is_empty()).collect();
            match item.as_slice() {
                [] => body.push("<li></li>".to_string()),
                [only] => body.push(format!("<li>{only}</li>")),
                _ => body.extend(wrap_block("<li>".to_string(), item, "</li>")),
            }
        }
        wrap_block(open, body, close)
    }

    fn code_block(&self, language: Option<&str>, lines: &[String]) -> Vec<String> {
        let class = language
            .map(|l| format!(" class=\"language-{}\"", escape_attribute(l)))
            .unwrap_or_default();
        let mut out: Vec<String> = lines.to_vec();
        if out.is_empty() {
            out.push(String::new());
        }
        out[0] = format!("<pre><code{class}>{}", out[0]);
        if let Some(last) = out.last_mut() {
            last.push_str("</code></pre>");
        }
        out
    }

    fn highlight(&self, class: Option<&str>, content: &str) -> String {
        match class {
            Some(class) => format!("<span class=\"{class}\">{content}</span>"),
            None => content.to_string(),
        }
    }

    fn links_in_code(&self) -> bool {
        true
    }

    fn admonition(&self, kind: AdmonitionKind, title: &str, body: Vec<String>) -> Vec<String> {
        let mut inner = vec![format!("<p class=\"admonition-title\">{title}</p>")];
        inner.extend(body);
        wrap_block(
            format!("<div class=\"admonition admonition-{}\">", kind.as_str()),
            inner,
            "</div>",
        )
    }

    fn labelled(&self, title: &str, body: Vec<String>) -> Vec<String> {
        let mut inner = vec![format!("<dt>{title}</dt>"), "<dd>".to_string()];
        inner.extend(body);
        inner.push("</dd>".to_string());
        wrap_block("<dl class=\"section\">".to_string(), inner, "</dl>")
    }

    fn table(&self, rows: &[Vec<TableCell>], caption: Option<&str>) -> Vec<String> {
        let mut body = Vec::new();
        if let Some(caption) = caption {
            body.push(format!("<caption>{caption}</caption>"));
        }
        for row in rows {
            let mut line = String::from("<tr>");
            for cell in row {
                let tag = if cell.header { "th" } else { "td" };
                line.push('<');
                line.push_str(tag);
                if cell.colspan > 1 {
                    line.push_str(&format!(" colspan=\"{}\"", cell.colspan));
                }
                if cell.rowspan > 1 {
                    line.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
                }
                if let Some(align) = &cell.align {
                    line.push_str(&format!(" align=\"{}\"", escape_attribute(align)));
                }
                line.push('>');
                line.push_str(&cell.content);
                line.push_str(&format!("</{tag}>"));
            }
            line.push_str("</tr>");
            body.push(line);
        }
        wrap_block("<table>".to_string(), body, "</table>")
    }

    fn definition_list(&self, entries: Vec<(String, Vec<String>)>) -> Vec<String> {
        let mut body = Vec::new();
        for (term, definition) in entries {
            body.push(format!("<dt>{term}</dt>"));
            body.extend(wrap_block("<dd>".to_string(), definition, "</dd>"));
        }
        wrap_block("<dl>".to_string(), body, "</dl>")
    }

    fn block_quote(&self, body: Vec<String>) -> Vec<String> {
        wrap_block("<blockquote>".to_string(), body, "</blockquote>")
    }

    fn details(&self, summary: &str, body: Vec<String>) -> Vec<String> {
        let mut inner = vec![format!("<summary>{summary}</summary>")];
        inner.extend(body);
        wrap_block("<details>".to_string(), inner, "</details>")
    }

    fn horizontal_rule(&self) -> Vec<String> {
        vec!["<hr/>".to_string()]
    }

    fn raw(&self, format: &str, text: &str) -> Option<Vec<String>> {
        (format == "html").then(|| text.lines().map(str::to_string).collect())
    }
}
