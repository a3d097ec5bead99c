//! Plain text: no escaping, no links.

use super::{AdmonitionKind, Markup, OutputFormat, TableCell};
use crate::model::MarkupStyle;

pub struct TextMarkup;

fn indent(body: Vec<String>, by: &str) -> Vec<String> {
    body.into_iter()
        .map(|l| if l.is_empty() { l } else { format!("{by}{l}") })
        .collect()
}

impl Markup for TextMarkup {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn escape(&self, text: &str) -> String {
        text.to_string()
    }

    fn escape_code(&self, text: &str) -> String {
        text.to_string()
    }

    fn link(&self, label: &str, _url: &str) -> String {
        label.to_string()
    }

    fn style(&self, _style: MarkupStyle, content: &str) -> String {
        content.to_string()
    }

    fn anchor(&self, _id: &str) -> String {
        String::new()
    }

    fn line_break(&self) -> String {
        "\n".to_string()
    }

    fn image(&self, url: &str, alt: &str) -> String {
        if alt.is_empty() {
            format!("[image: {url}]")
        } else {
            format!("[image: {alt}]")
        }
    }

    fn heading(&self, level: u8, text: &str, _anchor: Option<&str>) -> Vec<String> {
        let rule = if level <= 2 { "=" } else { "-" };
        vec![text.to_string(), rule.repeat(text.chars().count())]
    }

    fn paragraph(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        }
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
            let pad = " ".repeat(marker.len());
            let mut item = item.into_iter();
            lines.push(format!("{marker}{}", item.next().unwrap_or_default()));
            lines.extend(indent(item.collect(), &pad));
        }
        lines
    }

    fn code_block(&self, _language: Option<&str>, lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| format!("    {l}")).collect()
    }

    fn highlight(&self, _class: Option<&str>, content: &str) -> String {
        content.to_string()
    }

    fn links_in_code(&self) -> bool {
        false
    }

    fn admonition(&self, _kind: AdmonitionKind, title: &str, body: Vec<String>) -> Vec<String> {
        self.labelled(title, body)
    }

    fn labelled(&self, title: &str, body: Vec<String>) -> Vec<String> {
        let mut lines = vec![format!("{title}:")];
        lines.extend(indent(body, "  "));
        lines
    }

    fn table(&self, rows: &[Vec<TableCell>], caption: Option<&str>) -> Vec<String> {
        let mut lines: Vec<String> = caption.map(str::to_string).into_iter().collect();
        for row in rows {
            let cells: Vec<&str> = row.iter().map(|c| c.content.as_str()).collect();
            lines.push(cells.join(" | "));
        }
        lines
    }

    fn definition_list(&self, entries: Vec<(String, Vec<String>)>) -> Vec<String> {
        let mut lines = Vec::new();
        for (term, body) in entries {
            lines.push(term);
            lines.extend(indent(body, "    "));
        }
        lines
    }

    fn block_quote(&self, body: Vec<String>) -> Vec<String> {
        indent(body, "> ")
    }

    fn details(&self, summary: &str, body: Vec<String>) -> Vec<String> {
        let mut lines = vec![summary.to_string()];
        lines.extend(indent(body, "  "));
        lines
    }

    fn horizontal_rule(&self) -> Vec<String> {
        vec!["----".to_string()]
    }

    fn raw(&self, _format: &str, _text: &str) -> Option<Vec<String>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_are_underlined() {
        assert_eq!(TextMarkup.heading(2, "Widget", Some("x")), ["Widget", "======"]);
        assert_eq!(TextMarkup.heading(3, "size", None), ["size", "----"]);
    }

    #[test]
    fn links_keep_only_label() {
        assert_eq!(TextMarkup.link("Base", "/api/classes/base"), "Base");
    }

    #[test]
    fn labelled_blocks_indent_body() {
        assert_eq!(
            TextMarkup.labelled("Returns", vec!["the size".into()]),
            ["Returns:", "  the size"]
        );
    }
}
