//! MDX-flavoured markdown for Docusaurus.
//!
//! Headings carry explicit `{#id}` anchors, notes become `:::` admonitions and
//! anything markdown cannot express (spanning table cells, underline, …) falls
//! back to inline HTML, which MDX accepts.

use super::html::{escape_attribute, HtmlMarkup};
use super::{AdmonitionKind, Markup, OutputFormat, TableCell};
use crate::model::MarkupStyle;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub struct MarkdownMarkup;

/// Characters that end or break a link destination.
const DESTINATION: &AsciiSet = &CONTROLS.add(b' ').add(b'(').add(b')').add(b'<').add(b'>').add(b'`');

const SPECIAL: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '{', '}', '~', '|'];

/// Put `marker` around the non-blank core of `content`.
fn wrap(content: &str, marker: &str) -> String {
    let core = content.trim();
    if core.is_empty() {
        return content.to_string();
    }
    let start = content.len() - content.trim_start().len();
    let end = start + core.len();
    format!("{}{marker}{core}{marker}{}", &content[..start], &content[end..])
}

/// `url` made safe for `](...)`.
fn destination(url: &str) -> String {
    utf8_percent_encode(url, DESTINATION).to_string()
}

fn tag(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

impl Markup for MarkdownMarkup {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if SPECIAL.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    fn escape_code(&self, text: &str) -> String {
        text.to_string()
    }

    fn link(&self, label: &str, url: &str) -> String {
        format!("[{label}]({})", destination(url))
    }

    fn titled_link(&self, label: &str, url: &str, title: &str) -> String {
        let title = title.replace('\\', "\\\\").replace('"', "\\\"");
        format!("[{label}]({} \"{title}\")", destination(url))
    }

    fn style(&self, style: MarkupStyle, content: &str) -> String {
        match style {
            MarkupStyle::Bold => wrap(content, "**"),
            MarkupStyle::Emphasis => wrap(content, "*"),
            MarkupStyle::Strike => wrap(content, "~~"),
            MarkupStyle::ComputerOutput => tag("code", content),
            MarkupStyle::Underline => tag("u", content),
            MarkupStyle::Del => tag("del", content),
            MarkupStyle::Ins => tag("ins", content),
            MarkupStyle::Subscript => tag("sub", content),
            MarkupStyle::Superscript => tag("sup", content),
            MarkupStyle::Small => tag("small", content),
            MarkupStyle::Center => tag("center", content),
            MarkupStyle::Cite => tag("cite", content),
        }
    }

    fn anchor(&self, id: &str) -> String {
        format!("<a id=\"{}\"></a>", escape_attribute(id))
    }

    fn line_break(&self) -> String {
        "<br/>".to_string()
    }

    fn image(&self, url: &str, alt: &str) -> String {
        format!("![{alt}]({})", destination(url))
    }

    fn heading(&self, level: u8, text: &str, anchor: Option<&str>) -> Vec<String> {
        let hashes = "#".repeat(level.clamp(1, 6) as usize);
        match anchor {
            Some(id) => vec![format!("{hashes} {text} {{#{id}}}")],
            None => vec![format!("{hashes} {text}")],
        }
    }

    fn paragraph(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        // A leading `#` would start a heading.
        if text.starts_with('#') {
            return vec![format!("\\{text}")];
        }
        vec![text.to_string()]
    }

    fn list(&self, ordered: bool, start: Option<u32>, items: Vec<Vec<String>>) -> Vec<String> {
        let mut lines = Vec::new();
        let mut number = start.unwrap_or(1);
        for item in items {
            let marker = if ordered {
                format!("{number}. ")
            } else {
                "- ".to_string()
            };
            number += 1;
            let indent = " ".repeat(marker.len());
            let mut first = true;
            for line in item {
                if first {
                    lines.push(format!("{marker}{line}"));
                    first = false;
                } else if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
            if first {
                lines.push(marker.trim_end().to_string());
            }
        }
        lines
    }

    fn code_block(&self, language: Option<&str>, lines: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(lines.len() + 2);
        out.push(format!("```{}", language.unwrap_or("")));
        out.extend(lines.iter().cloned());
        out.push("```".to_string());
        out
    }

    fn highlight(&self, _class: Option<&str>, content: &str) -> String {
        content.to_string()
    }

    fn links_in_code(&self) -> bool {
        false
    }

    fn admonition(&self, kind: AdmonitionKind, title: &str, body: Vec<String>) -> Vec<String> {
        let mut lines = vec![format!(":::{}[{title}]", kind.as_str()), String::new()];
        lines.extend(body);
        lines.push(String::new());
        lines.push(":::".to_string());
        lines
    }

    fn labelled(&self, title: &str, body: Vec<String>) -> Vec<String> {
        let mut lines = vec![format!("**{title}**"), String::new()];
        lines.extend(body);
        lines
    }

    fn table(&self, rows: &[Vec<TableCell>], caption: Option<&str>) -> Vec<String> {
        let spans = rows
            .iter()
            .flatten()
            .any(|c| c.colspan > 1 || c.rowspan > 1);
        if spans || rows.is_empty() {
            return HtmlMarkup.table(rows, caption);
        }
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let row_line = |row: &[TableCell]| {
            let mut cells: Vec<String> = row.iter().map(|c| c.content.replace('\n', " ")).collect();
            cells.resize(columns, String::new());
            format!("| {} |", cells.join(" | "))
        };
        let mut lines = Vec::new();
        if let Some(caption) = caption {
            lines.push(format!("**{caption}**"));
            lines.push(String::new());
        }
        lines.push(row_line(&rows[0]));
        let rule: Vec<&str> = (0..columns)
            .map(|i| match rows[0].get(i).and_then(|c| c.align.as_deref()) {
                Some("left") => ":---",
                Some("center") => ":---:",
                Some("right") => "---:",
                _ => "---",
            })
            .collect();
        lines.push(format!("| {} |", rule.join(" | ")));
        for row in &rows[1..] {
            lines.push(row_line(row));
        }
        lines
    }

    fn definition_list(&self, entries: Vec<(String, Vec<String>)>) -> Vec<String> {
        let items = entries
            .into_iter()
            .map(|(term, body)| {
                let mut item = vec![format!("**{term}**")];
                if !body.is_empty() {
                    item.push(String::new());
                    item.extend(body);
                }
                item
            })
            .collect();
        self.list(false, None, items)
    }

    fn block_quote(&self, body: Vec<String>) -> Vec<String> {
        body.into_iter()
            .map(|l| if l.is_empty() { ">".to_string() } else { format!("> {l}") })
            .collect()
    }

    fn details(&self, summary: &str, body: Vec<String>) -> Vec<String> {
        let mut lines = vec!["<details>".to_string(), format!("<summary>{summary}</summary>"), String::new()];
        lines.extend(body);
        lines.push(String::new());
        lines.push("</details>".to_string());
        lines
    }

    fn horizontal_rule(&self) -> Vec<String> {
        vec!["---".to_string()]
    }

    fn raw(&self, _format: &str, _text: &str) -> Option<Vec<String>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_mdx_specials() {
        assert_eq!(MarkdownMarkup.escape("a<b>{c}|*"), "a\\<b\\>\\{c\\}\\|\\*");
        assert_eq!(MarkdownMarkup.escape_code("a<b>"), "a<b>");
    }

    #[test]
    fn bold_keeps_surrounding_space_outside() {
        assert_eq!(MarkdownMarkup.style(MarkupStyle::Bold, " x "), " **x** ");
        assert_eq!(MarkdownMarkup.style(MarkupStyle::Bold, "  "), "  ");
        assert_eq!(MarkdownMarkup.style(MarkupStyle::ComputerOutput, "f"), "<code>f</code>");
    }

    #[test]
    fn heading_with_anchor() {
        assert_eq!(MarkdownMarkup.heading(2, "Widget", Some("w")), ["## Widget {#w}"]);
    }

    #[test]
    fn nested_list_lines_are_indented() {
        let lines = MarkdownMarkup.list(
            true,
            Some(3),
            vec![vec!["one".into(), String::new(), "more".into()], vec!["two".into()]],
        );
        assert_eq!(lines, ["3. one", "", "   more", "4. two"]);
    }

    #[test]
    fn pipe_table() {
        let rows = vec![
            vec![TableCell::header("Name"), TableCell::header("Description")],
            vec![TableCell::new("a"), TableCell::new("first")],
        ];
        assert_eq!(
            MarkdownMarkup.table(&rows, None),
            ["| Name | Description |", "| --- | --- |", "| a | first |"]
        );
    }

    #[test]
    fn spanning_table_falls_back_to_html() {
        let mut cell = TableCell::new("wide");
        cell.colspan = 2;
        let lines = MarkdownMarkup.table(&[vec![cell]], None);
        assert_eq!(lines[0], "<table>");
        assert!(lines.iter().any(|l| l.contains("colspan=\"2\"")));
    }

    #[test]
    fn admonition_block() {
        let lines = MarkdownMarkup.admonition(AdmonitionKind::Warning, "Warning", vec!["careful".into()]);
        assert_eq!(lines, [":::warning[Warning]", "", "careful", "", ":::"]);
    }

    #[test]
    fn link_destinations_are_percent_encoded() {
        assert_eq!(
            MarkdownMarkup.link("site", "https://e.com/a (b)/c"),
            "[site](https://e.com/a%20%28b%29/c)"
        );
        assert_eq!(MarkdownMarkup.link("q", "https://e.com/?x=<y>"), "[q](https://e.com/?x=%3Cy%3E)");
        assert_eq!(MarkdownMarkup.link("a", "/api/x#a1"), "[a](/api/x#a1)");
        assert_eq!(MarkdownMarkup.link("e", "https://e.com/a%20b"), "[e](https://e.com/a%20b)");
    }

    #[test]
    fn image_destination_is_percent_encoded() {
        assert_eq!(MarkdownMarkup.image("my diagram (v2).png", "Diagram"), "![Diagram](my%20diagram%20%28v2%29.png)");
    }

    #[test]
    fn titled_link_quotes_title() {
        assert_eq!(
            MarkdownMarkup.titled_link("Base", "/api/b", r#"say "hi""#),
            r#"[Base](/api/b "say \"hi\"")"#
        );
    }
}
