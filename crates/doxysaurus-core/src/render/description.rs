//! Rendering of doc* content.
//!
//! Mixed content is rendered as a flow: inline nodes accumulate into the
//! current paragraph, and a block node first flushes that paragraph, then
//! emits its own lines. Document order is preserved either way.

use super::{inline, push_block, AdmonitionKind, RenderContext, RenderLines, RenderText, TableCell};
use crate::model::{
    CodeLine, Description, DiagramKind, DocDiagram, DocEmoji, DocImage, DocList, DocNode, DocPara,
    DocParamList, DocSimpleSect, DocTable, DocTitle, DocXRefSect, Highlight, HighlightItem,
    MarkupStyle, ParamDirection, ParamListKind, ProgramListing, SimpleSectKind,
};
use crate::permalink::member_anchor;

/// Render mixed content as block lines.
pub fn render_flow(nodes: &[DocNode], cx: &RenderContext<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    for node in nodes {
        if node.is_block() {
            push_block(&mut lines, cx.markup.paragraph(&pending));
            pending.clear();
            push_block(&mut lines, node.render_lines(cx));
        } else {
            pending.push_str(&node.render_text(cx));
        }
    }
    push_block(&mut lines, cx.markup.paragraph(&pending));
    lines
}

impl RenderLines for Description {
    fn render_lines(&self, cx: &RenderContext<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            let title = title.render_text(cx);
            push_block(&mut lines, cx.markup.paragraph(&cx.markup.style(MarkupStyle::Bold, &title)));
        }
        push_block(&mut lines, render_flow(&self.content, cx));
        lines
    }
}

impl RenderText for Description {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        inline(&render_flow(&self.content, cx))
    }
}

impl RenderText for DocTitle {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        self.content.render_text(cx).trim().to_string()
    }
}

impl RenderLines for DocPara {
    fn render_lines(&self, cx: &RenderContext<'_>) -> Vec<String> {
        render_flow(&self.content, cx)
    }
}

impl RenderText for DocNode {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        let m = cx.markup;
        match self {
            DocNode::Text(t) => cx.text(t),
            DocNode::Markup(markup) => m.style(markup.style, &markup.content.render_text(cx)),
            DocNode::Ulink(link) => {
                let label = link.content.render_text(cx);
                let label = if label.trim().is_empty() { cx.text(&link.url) } else { label };
                m.link(&label, &link.url)
            }
            DocNode::Ref(r) => cx.reference(
                &r.refid,
                r.kindref,
                r.external.as_deref(),
                r.content.render_text(cx),
            ),
            DocNode::Anchor(a) => m.anchor(member_anchor(&a.id)),
            DocNode::LineBreak => m.line_break(),
            DocNode::Symbol(s) => cx.text(s.text),
            DocNode::Formula(f) => m.style(MarkupStyle::ComputerOutput, &cx.text(&f.text)),
            DocNode::Image(image) => image_text(image, cx),
            DocNode::Emoji(emoji) => cx.text(&emoji_text(emoji)),
            DocNode::OutputOnly(o) if !o.block => m.raw(&o.format, &o.text).map(|l| l.join(" ")).unwrap_or_default(),
            DocNode::IndexEntry(_) => String::new(),
            DocNode::Para(_)
            | DocNode::Sect(_)
            | DocNode::Internal(_)
            | DocNode::Diagram(_)
            | DocNode::OutputOnly(_)
            | DocNode::List(_)
            | DocNode::SimpleSect(_)
            | DocNode::ParameterList(_)
            | DocNode::ProgramListing(_)
            | DocNode::Verbatim(_)
            | DocNode::Preformatted(_)
            | DocNode::Table(_)
            | DocNode::VariableList(_)
            | DocNode::XrefSect(_)
            | DocNode::Heading(_)
            | DocNode::HorizontalRule
            | DocNode::BlockQuote(_)
            | DocNode::ParBlock(_)
            | DocNode::TocList(_)
            | DocNode::Details(_)
            | DocNode::Language(_)
            | DocNode::CopyDoc(_) => inline(&self.render_lines(cx)),
        }
    }
}

impl RenderLines for DocNode {
    fn render_lines(&self, cx: &RenderContext<'_>) -> Vec<String> {
        let m = cx.markup;
        match self {
            DocNode::Para(p) => p.render_lines(cx),
            DocNode::Sect(sect) => {
                let title = sect.title.render_text(cx);
                let anchor = sect.id.as_deref().map(member_anchor);
                let mut lines = if title.is_empty() {
                    anchor.map(|a| vec![m.anchor(a)]).unwrap_or_default()
                } else {
                    m.heading(cx.heading_level(sect.level), &title, anchor)
                };
                push_block(&mut lines, render_flow(&sect.content, cx));
                lines
            }
            DocNode::Internal(internal) => render_flow(&internal.content, cx),
            DocNode::List(list) => list_lines(list, cx),
            DocNode::SimpleSect(sect) => simple_sect_lines(sect, cx),
            DocNode::ParameterList(list) => param_list_lines(list, cx),
            DocNode::ProgramListing(listing) => {
                if cx.options.render_program_listing_inline {
                    render_listing(listing, cx)
                } else {
                    Vec::new()
                }
            }
            DocNode::Verbatim(v) => {
                let code = cx.code();
                let lines: Vec<String> = v.text.lines().map(|l| code.text(l)).collect();
                m.code_block(None, &lines)
            }
            DocNode::Preformatted(content) => {
                let code = cx.code();
                let text = content.render_text(&code);
                let lines: Vec<String> = text.lines().map(str::to_string).collect();
                m.code_block(None, &lines)
            }
            DocNode::Table(table) => table_lines(table, cx),
            DocNode::VariableList(list) => {
                let entries = list
                    .entries
                    .iter()
                    .map(|e| (e.term.render_text(cx), render_flow(&e.item.content, cx)))
                    .collect();
                m.definition_list(entries)
            }
            DocNode::XrefSect(x) => xref_lines(x, cx),
            DocNode::Heading(h) => m.heading(cx.heading_level(h.level), h.content.render_text(cx).trim(), None),
            DocNode::HorizontalRule => m.horizontal_rule(),
            DocNode::BlockQuote(content) => m.block_quote(render_flow(content, cx)),
            DocNode::ParBlock(content) => render_flow(content, cx),
            DocNode::TocList(toc) => {
                let items = toc
                    .items
                    .iter()
                    .map(|item| {
                        let label = item.content.render_text(cx).trim().to_string();
                        let label = match &item.id {
                            Some(id) => m.link(&label, &format!("#{}", member_anchor(id))),
                            None => label,
                        };
                        vec![label]
                    })
                    .collect();
                m.list(false, None, items)
            }
            DocNode::Details(details) => {
                let summary = details.summary.render_text(cx);
                let summary = if summary.is_empty() { "Details".to_string() } else { summary };
                m.details(&summary, render_flow(&details.content, cx))
            }
            DocNode::Language(language) => render_flow(&language.content, cx),
            DocNode::CopyDoc(copy) => render_flow(&copy.content, cx),
            DocNode::Image(image) => {
                let mut lines = m.paragraph(&image_text(image, cx));
                push_block(&mut lines, m.paragraph(&image.caption.render_text(cx)));
                lines
            }
            DocNode::Diagram(diagram) => diagram_lines(diagram, cx),
            DocNode::OutputOnly(o) => m.raw(&o.format, &o.text).unwrap_or_default(),
            DocNode::Text(_)
            | DocNode::Markup(_)
            | DocNode::Ulink(_)
            | DocNode::Ref(_)
            | DocNode::Anchor(_)
            | DocNode::LineBreak
            | DocNode::Symbol(_)
            | DocNode::Formula(_)
            | DocNode::Emoji(_)
            | DocNode::IndexEntry(_) => m.paragraph(&self.render_text(cx)),
        }
    }
}

/// Images only render for the HTML generator (or when untargeted).
fn image_text(image: &DocImage, cx: &RenderContext<'_>) -> String {
    if image.kind.as_deref().is_some_and(|k| k != "html") {
        return String::new();
    }
    let Some(name) = image.name.as_deref() else {
        return String::new();
    };
    let alt = match image.alt.as_deref() {
        Some(alt) => cx.text(alt),
        None => image.caption.render_text(cx).trim().to_string(),
    };
    cx.markup.image(name, &alt)
}

/// `&#x1f604;` becomes the character itself; anything else falls back to
/// `:name:`.
fn emoji_text(emoji: &DocEmoji) -> String {
    let decoded: Option<String> = emoji
        .unicode
        .split(';')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let hex = part.strip_prefix("&#x")?;
            char::from_u32(u32::from_str_radix(hex, 16).ok()?)
        })
        .collect();
    match decoded {
        Some(s) if !s.is_empty() => s,
        _ => format!(":{}:", emoji.name.trim_matches(':')),
    }
}

fn list_lines(list: &DocList, cx: &RenderContext<'_>) -> Vec<String> {
    let items = list
        .items
        .iter()
        .map(|item| {
            let mut lines = render_flow(&item.content, cx);
            let checkbox = match item.override_state.as_deref() {
                Some("checked") => Some("[x] "),
                Some("unchecked") => Some("[ ] "),
                _ => None,
            };
            if let (Some(checkbox), Some(first)) = (checkbox, lines.first_mut()) {
                first.insert_str(0, checkbox);
            }
            lines
        })
        .collect();
    let start = list.start.or_else(|| list.items.first().and_then(|i| i.value));
    cx.markup.list(list.ordered, start, items)
}

fn simple_sect_lines(sect: &DocSimpleSect, cx: &RenderContext<'_>) -> Vec<String> {
    let body = render_flow(&sect.content, cx);
    let custom = sect.title.render_text(cx);
    let admonition = |kind: AdmonitionKind, default: &str| {
        let title = if custom.is_empty() { default } else { custom.as_str() };
        cx.markup.admonition(kind, title, body.clone())
    };
    let title = match &sect.kind {
        SimpleSectKind::Note => return admonition(AdmonitionKind::Note, "Note"),
        SimpleSectKind::Warning => return admonition(AdmonitionKind::Warning, "Warning"),
        SimpleSectKind::Attention => return admonition(AdmonitionKind::Danger, "Attention"),
        SimpleSectKind::Important => return admonition(AdmonitionKind::Info, "Important"),
        SimpleSectKind::Remark => return admonition(AdmonitionKind::Info, "Remark"),
        SimpleSectKind::See => "See also",
        SimpleSectKind::Return => "Returns",
        SimpleSectKind::Author => "Author",
        SimpleSectKind::Authors => "Authors",
        SimpleSectKind::Version => "Version",
        SimpleSectKind::Since => "Since",
        SimpleSectKind::Date => "Date",
        SimpleSectKind::Pre => "Precondition",
        SimpleSectKind::Post => "Postcondition",
        SimpleSectKind::Copyright => "Copyright",
        SimpleSectKind::Invariant => "Invariant",
        SimpleSectKind::Rcs => "RCS",
        SimpleSectKind::Par => "",
        SimpleSectKind::Other(kind) => {
            cx.unsupported("simplesect kind", kind);
            ""
        }
    };
    let title = if custom.is_empty() { title } else { custom.as_str() };
    if title.is_empty() {
        body
    } else {
        cx.markup.labelled(title, body)
    }
}

fn param_list_lines(list: &DocParamList, cx: &RenderContext<'_>) -> Vec<String> {
    let (title, column) = match list.kind {
        ParamListKind::Param => ("Parameters", "Name"),
        ParamListKind::RetVal => ("Return values", "Value"),
        ParamListKind::Exception => ("Exceptions", "Exception"),
        ParamListKind::TemplateParam => ("Template Parameters", "Name"),
    };
    let mut rows = vec![vec![TableCell::header(column), TableCell::header("Description")]];
    for item in &list.items {
        let names: Vec<String> = item
            .names
            .iter()
            .flat_map(|list| {
                let types = list
                    .types
                    .iter()
                    .map(|t| t.render_text(cx).trim().to_string())
                    .collect::<Vec<_>>()
                    .join(" | ");
                list.names.iter().map(move |name| {
                    let mut label = cx.markup.style(MarkupStyle::ComputerOutput, name.content.render_text(cx).trim());
                    if let Some(direction) = name.direction {
                        let tag = match direction {
                            ParamDirection::In => "[in]",
                            ParamDirection::Out => "[out]",
                            ParamDirection::InOut => "[in,out]",
                        };
                        label = format!("{} {label}", cx.text(tag));
                    }
                    if !types.is_empty() {
                        label = format!("{types} {label}");
                    }
                    label
                })
            })
            .collect();
        rows.push(vec![
            TableCell::new(names.join(", ")),
            TableCell::new(item.description.render_text(cx)),
        ]);
    }
    cx.markup.labelled(title, cx.markup.table(&rows, None))
}

fn table_lines(table: &DocTable, cx: &RenderContext<'_>) -> Vec<String> {
    let rows: Vec<Vec<TableCell>> = table
        .rows
        .iter()
        .map(|row| {
            row.entries
                .iter()
                .map(|entry| TableCell {
                    content: inline(&render_flow(&entry.content, cx)),
                    header: entry.thead,
                    colspan: entry.colspan.unwrap_or(1),
                    rowspan: entry.rowspan.unwrap_or(1),
                    align: entry.align.clone(),
                })
                .collect()
        })
        .collect();
    let caption = table.caption.as_ref().map(|c| c.render_text(cx));
    cx.markup.table(&rows, caption.as_deref())
}

fn xref_lines(x: &DocXRefSect, cx: &RenderContext<'_>) -> Vec<String> {
    let kind = match x.kind() {
        "deprecated" => AdmonitionKind::Warning,
        "bug" => AdmonitionKind::Danger,
        "todo" | "test" => AdmonitionKind::Info,
        other => {
            cx.unsupported("xrefsect kind", other);
            AdmonitionKind::Note
        }
    };
    cx.markup.admonition(kind, &cx.text(&x.title), x.description.render_lines(cx))
}

fn diagram_lines(diagram: &DocDiagram, cx: &RenderContext<'_>) -> Vec<String> {
    let m = cx.markup;
    let language = match diagram.kind {
        DiagramKind::Dot => Some("dot"),
        DiagramKind::Msc => Some("mscgen"),
        DiagramKind::PlantUml => Some("plantuml"),
        DiagramKind::DotFile | DiagramKind::MscFile | DiagramKind::DiaFile => None,
    };
    let mut lines = match (&diagram.source, diagram.name.as_deref()) {
        (Some(source), _) => {
            let code = cx.code();
            let source: Vec<String> = source.lines().map(|l| code.text(l)).collect();
            m.code_block(language, &source)
        }
        (None, Some(name)) => m.paragraph(&m.style(MarkupStyle::ComputerOutput, &cx.text(name))),
        (None, None) => Vec::new(),
    };
    push_block(&mut lines, m.paragraph(&diagram.caption.render_text(cx)));
    lines
}

/// A program listing as a code block. Callers decide whether listings are
/// wanted at all.
pub fn render_listing(listing: &ProgramListing, cx: &RenderContext<'_>) -> Vec<String> {
    let code = cx.code();
    let lines: Vec<String> = listing.lines.iter().map(|line| line.render_text(&code)).collect();
    cx.markup.code_block(listing.language(), &lines)
}

impl RenderText for CodeLine {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        self.highlights.render_text(cx)
    }
}

impl RenderText for Highlight {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        let content: String = self
            .items
            .iter()
            .map(|item| match item {
                HighlightItem::Text(t) => cx.text(t),
                HighlightItem::Space(n) => " ".repeat(*n),
                HighlightItem::Ref(r) => cx.reference(&r.refid, r.kindref, r.external.as_deref(), cx.text(&r.text)),
            })
            .collect();
        let class = self.class.css_class();
        if class.is_none() {
            if let crate::model::HighlightClass::Other(name) = &self.class {
                cx.unsupported("highlight class", name);
            }
        }
        cx.markup.highlight(class, &content)
    }
}
