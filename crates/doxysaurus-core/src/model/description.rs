//! The doc* family: paragraphs, inline markup, lists, tables, listings,
//! sections and admonitions.
//!
//! Everything here is mixed content. Children are kept as one ordered
//! `Vec<DocNode>` so renderers can reproduce the original interleaving of
//! prose and markup.
//!
//! Which elements are legal depends on the container:
//!
//! - block containers (descriptions, `sectN`, `internal`) take `title`, `para`,
//!   `internal` and the next section level;
//! - paragraphs take inline and block commands;
//! - inline containers (titles, links, headings, terms) take inline commands only.

use super::linked_text::{RefKind, RefText};
use super::FromXml;
use crate::error::ParseError;
use crate::xml::{required, set_once, Content, Element};

/// Entity-like empty elements and the characters they stand for.
const SYMBOLS: &[(&str, &str)] = &[
    ("nonbreakablespace", "\u{a0}"),
    ("ensp", "\u{2002}"),
    ("emsp", "\u{2003}"),
    ("thinsp", "\u{2009}"),
    ("zwnj", "\u{200c}"),
    ("zwj", "\u{200d}"),
    ("lrm", "\u{200e}"),
    ("rlm", "\u{200f}"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("sbquo", "\u{201a}"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("bdquo", "\u{201e}"),
    ("dagger", "\u{2020}"),
    ("Dagger", "\u{2021}"),
    ("bull", "\u{2022}"),
    ("hellip", "\u{2026}"),
    ("permil", "\u{2030}"),
    ("prime", "\u{2032}"),
    ("Prime", "\u{2033}"),
    ("lsaquo", "\u{2039}"),
    ("rsaquo", "\u{203a}"),
    ("oline", "\u{203e}"),
    ("frasl", "\u{2044}"),
    ("euro", "\u{20ac}"),
    ("trademark", "\u{2122}"),
    ("tm", "\u{2122}"),
    ("copy", "\u{a9}"),
    ("registered", "\u{ae}"),
    ("iexcl", "\u{a1}"),
    ("cent", "\u{a2}"),
    ("pound", "\u{a3}"),
    ("yen", "\u{a5}"),
    ("sect", "\u{a7}"),
    ("laquo", "\u{ab}"),
    ("deg", "\u{b0}"),
    ("plusmn", "\u{b1}"),
    ("micro", "\u{b5}"),
    ("middot", "\u{b7}"),
    ("raquo", "\u{bb}"),
    ("iquest", "\u{bf}"),
    ("times", "\u{d7}"),
    ("divide", "\u{f7}"),
    ("szlig", "\u{df}"),
    ("larr", "\u{2190}"),
    ("uarr", "\u{2191}"),
    ("rarr", "\u{2192}"),
    ("darr", "\u{2193}"),
    ("harr", "\u{2194}"),
    ("lArr", "\u{21d0}"),
    ("rArr", "\u{21d2}"),
    ("hArr", "\u{21d4}"),
    ("forall", "\u{2200}"),
    ("exist", "\u{2203}"),
    ("empty", "\u{2205}"),
    ("isin", "\u{2208}"),
    ("sum", "\u{2211}"),
    ("minus", "\u{2212}"),
    ("infin", "\u{221e}"),
    ("and", "\u{2227}"),
    ("or", "\u{2228}"),
    ("ne", "\u{2260}"),
    ("equiv", "\u{2261}"),
    ("le", "\u{2264}"),
    ("ge", "\u{2265}"),
    ("alpha", "\u{3b1}"),
    ("beta", "\u{3b2}"),
    ("gamma", "\u{3b3}"),
    ("delta", "\u{3b4}"),
    ("epsilon", "\u{3b5}"),
    ("lambda", "\u{3bb}"),
    ("mu", "\u{3bc}"),
    ("pi", "\u{3c0}"),
    ("sigma", "\u{3c3}"),
    ("omega", "\u{3c9}"),
];

fn symbol(name: &str) -> Option<&'static str> {
    SYMBOLS.iter().find(|(n, _)| *n == name).map(|(_, s)| *s)
}

// -- Description / sections ---------------------------------------------------

/// `briefdescription`, `detaileddescription`, `inbodydescription` and the
/// other `descriptionType` elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    pub element_name: String,
    pub title: Option<DocTitle>,
    pub content: Vec<DocNode>,
}

impl Description {
    /// No paragraphs, sections or non-blank text.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(DocNode::is_blank)
    }
}

impl FromXml for Description {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut title = None;
        let content = parse_block_content(el, 0, &mut title)?;
        Ok(Self {
            element_name: el.name().to_string(),
            title,
            content,
        })
    }
}

/// `title`, `term` and `summary`; inline content only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocTitle {
    pub content: Vec<DocNode>,
}

impl FromXml for DocTitle {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        Ok(Self {
            content: parse_mixed(el, DocContext::Inline)?,
        })
    }
}

/// `sect1` … `sect6`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocSect {
    pub level: u8,
    pub id: Option<String>,
    pub title: Option<DocTitle>,
    pub content: Vec<DocNode>,
}

impl DocSect {
    fn parse(el: Element<'_, '_>, level: u8) -> Result<Self, ParseError> {
        el.expect_attributes(&["id"])?;
        let mut title = None;
        let content = parse_block_content(el, level, &mut title)?;
        Ok(Self {
            level,
            id: el.opt_attribute_string("id"),
            title,
            content,
        })
    }
}

/// `internal` blocks, at any section level.
#[derive(Debug, Clone, PartialEq)]
pub struct DocInternal {
    pub content: Vec<DocNode>,
}

fn section_level(name: &str) -> Option<u8> {
    match name {
        "sect1" => Some(1),
        "sect2" => Some(2),
        "sect3" => Some(3),
        "sect4" => Some(4),
        "sect5" => Some(5),
        "sect6" => Some(6),
        _ => None,
    }
}

/// Content of a block container at `level` (0 for descriptions).
fn parse_block_content(
    el: Element<'_, '_>,
    level: u8,
    title: &mut Option<DocTitle>,
) -> Result<Vec<DocNode>, ParseError> {
    let mut nodes = Vec::new();
    for item in el.content() {
        let child = match item {
            Content::Text(t) if t.trim().is_empty() => continue,
            Content::Text(t) => {
                nodes.push(DocNode::Text(t.to_string()));
                continue;
            }
            Content::Element(child) => child,
        };
        match child.name() {
            "title" => set_once(title, DocTitle::from_xml(child)?, &el, &child)?,
            "para" => nodes.push(DocNode::Para(DocPara::from_xml(child)?)),
            "internal" => {
                child.expect_attributes(&[])?;
                let mut ignored = None;
                let content = parse_block_content(child, level, &mut ignored)?;
                nodes.push(DocNode::Internal(DocInternal { content }));
            }
            name => match section_level(name) {
                Some(n) if n == level + 1 => nodes.push(DocNode::Sect(DocSect::parse(child, n)?)),
                _ => return Err(el.unexpected_element(&child)),
            },
        }
    }
    Ok(nodes)
}

// -- Paragraph and the DocNode enum -------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocPara {
    pub content: Vec<DocNode>,
}

impl FromXml for DocPara {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        Ok(Self {
            content: parse_mixed(el, DocContext::Para)?,
        })
    }
}

/// Which command group a mixed container accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocContext {
    /// docTitleCmdGroup
    Inline,
    /// docCmdGroup
    Para,
}

fn parse_mixed(el: Element<'_, '_>, ctx: DocContext) -> Result<Vec<DocNode>, ParseError> {
    let mut nodes = Vec::new();
    for item in el.content() {
        match item {
            Content::Text(t) => nodes.push(DocNode::Text(t.to_string())),
            Content::Element(child) => {
                let node = match parse_inline(child)? {
                    Some(node) => node,
                    None if ctx == DocContext::Para => match parse_block(child)? {
                        Some(node) => node,
                        None => return Err(el.unexpected_element(&child)),
                    },
                    None => return Err(el.unexpected_element(&child)),
                };
                nodes.push(node);
            }
        }
    }
    Ok(nodes)
}

/// Only `para` children.
fn parse_paras(el: Element<'_, '_>) -> Result<Vec<DocNode>, ParseError> {
    let mut paras = Vec::new();
    for child in el.child_elements()? {
        match child.name() {
            "para" => paras.push(DocNode::Para(DocPara::from_xml(child)?)),
            _ => return Err(el.unexpected_element(&child)),
        }
    }
    Ok(paras)
}

/// Inline styling commands sharing `docMarkupType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupStyle {
    Bold,
    Emphasis,
    ComputerOutput,
    Strike,
    Underline,
    Del,
    Ins,
    Subscript,
    Superscript,
    Small,
    Center,
    Cite,
}

impl MarkupStyle {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bold" => Self::Bold,
            "emphasis" => Self::Emphasis,
            "computeroutput" => Self::ComputerOutput,
            "s" | "strike" => Self::Strike,
            "underline" => Self::Underline,
            "del" => Self::Del,
            "ins" => Self::Ins,
            "subscript" => Self::Subscript,
            "superscript" => Self::Superscript,
            "small" => Self::Small,
            "center" => Self::Center,
            "cite" => Self::Cite,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocMarkup {
    pub style: MarkupStyle,
    pub content: Vec<DocNode>,
}

/// One node of doc* mixed content.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Text(String),
    Para(DocPara),
    Sect(DocSect),
    Internal(DocInternal),
    Markup(DocMarkup),
    Ulink(DocUrlLink),
    Ref(DocRef),
    Anchor(DocAnchor),
    LineBreak,
    Symbol(DocSymbol),
    Formula(DocFormula),
    Image(DocImage),
    Emoji(DocEmoji),
    Diagram(DocDiagram),
    OutputOnly(DocOutputOnly),
    IndexEntry(DocIndexEntry),
    List(DocList),
    SimpleSect(DocSimpleSect),
    ParameterList(DocParamList),
    ProgramListing(ProgramListing),
    Verbatim(DocVerbatim),
    Preformatted(Vec<DocNode>),
    Table(DocTable),
    VariableList(DocVariableList),
    XrefSect(DocXRefSect),
    Heading(DocHeading),
    HorizontalRule,
    BlockQuote(Vec<DocNode>),
    ParBlock(Vec<DocNode>),
    TocList(DocTocList),
    Details(DocDetails),
    Language(DocLanguage),
    CopyDoc(DocCopy),
}

impl DocNode {
    /// Whitespace-only text, or a container holding only such text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(t) => t.trim().is_empty(),
            Self::Para(p) => p.content.iter().all(Self::is_blank),
            Self::IndexEntry(_) => true,
            _ => false,
        }
    }

    /// Nodes that must be emitted as separate block lines.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Para(_)
                | Self::Sect(_)
                | Self::Internal(_)
                | Self::List(_)
                | Self::SimpleSect(_)
                | Self::ParameterList(_)
                | Self::ProgramListing(_)
                | Self::Verbatim(_)
                | Self::Preformatted(_)
                | Self::Table(_)
                | Self::VariableList(_)
                | Self::XrefSect(_)
                | Self::Heading(_)
                | Self::HorizontalRule
                | Self::BlockQuote(_)
                | Self::ParBlock(_)
                | Self::TocList(_)
                | Self::Details(_)
                | Self::Language(_)
                | Self::CopyDoc(_)
        ) || matches!(self, Self::OutputOnly(o) if o.block)
            || matches!(self, Self::Image(i) if !i.inline)
            || matches!(self, Self::Diagram(_))
    }
}

/// docTitleCmdGroup members.
fn parse_inline(el: Element<'_, '_>) -> Result<Option<DocNode>, ParseError> {
    let name = el.name();
    if let Some(style) = MarkupStyle::from_name(name) {
        el.expect_attributes(&[])?;
        return Ok(Some(DocNode::Markup(DocMarkup {
            style,
            content: parse_mixed(el, DocContext::Para)?,
        })));
    }
    if let Some(text) = symbol(name) {
        el.expect_attributes(&[])?;
        if let Some(Content::Element(child)) = el.content().first() {
            return Err(el.unexpected_element(child));
        }
        return Ok(Some(DocNode::Symbol(DocSymbol {
            name: name.to_string(),
            text,
        })));
    }
    let node = match name {
        "ulink" => DocNode::Ulink(DocUrlLink::from_xml(el)?),
        "ref" => DocNode::Ref(DocRef::from_xml(el)?),
        "anchor" => {
            el.expect_attributes(&["id"])?;
            DocNode::Anchor(DocAnchor {
                id: el.attribute_string("id")?,
            })
        }
        "linebreak" => {
            el.expect_attributes(&[])?;
            DocNode::LineBreak
        }
        "formula" => {
            el.expect_attributes(&["id"])?;
            DocNode::Formula(DocFormula {
                id: el.opt_attribute_string("id"),
                text: el.inner_text()?,
            })
        }
        "image" => DocNode::Image(DocImage::from_xml(el)?),
        "emoji" => {
            el.expect_attributes(&["name", "unicode"])?;
            DocNode::Emoji(DocEmoji {
                name: el.attribute_string("name")?,
                unicode: el.attribute_string("unicode")?,
            })
        }
        "dot" | "msc" | "plantuml" | "dotfile" | "mscfile" | "diafile" => {
            DocNode::Diagram(DocDiagram::from_xml(el)?)
        }
        "htmlonly" | "manonly" | "xmlonly" | "rtfonly" | "latexonly" | "docbookonly" => {
            DocNode::OutputOnly(DocOutputOnly::from_xml(el)?)
        }
        "indexentry" => DocNode::IndexEntry(DocIndexEntry::from_xml(el)?),
        _ => return Ok(None),
    };
    Ok(Some(node))
}

/// docCmdGroup members that are not in docTitleCmdGroup.
fn parse_block(el: Element<'_, '_>) -> Result<Option<DocNode>, ParseError> {
    let node = match el.name() {
        "itemizedlist" | "orderedlist" => DocNode::List(DocList::from_xml(el)?),
        "simplesect" => DocNode::SimpleSect(DocSimpleSect::from_xml(el)?),
        "parameterlist" => DocNode::ParameterList(DocParamList::from_xml(el)?),
        "programlisting" => DocNode::ProgramListing(ProgramListing::from_xml(el)?),
        "verbatim" | "javadocliteral" | "javadoccode" => {
            el.expect_attributes(&[])?;
            DocNode::Verbatim(DocVerbatim {
                element_name: el.name().to_string(),
                text: el.inner_text()?,
            })
        }
        "preformatted" => {
            el.expect_attributes(&[])?;
            DocNode::Preformatted(parse_mixed(el, DocContext::Para)?)
        }
        "table" => DocNode::Table(DocTable::from_xml(el)?),
        "variablelist" => DocNode::VariableList(DocVariableList::from_xml(el)?),
        "xrefsect" => DocNode::XrefSect(DocXRefSect::from_xml(el)?),
        "heading" => DocNode::Heading(DocHeading::from_xml(el)?),
        "hruler" => {
            el.expect_attributes(&[])?;
            DocNode::HorizontalRule
        }
        "blockquote" => {
            el.expect_attributes(&[])?;
            DocNode::BlockQuote(parse_paras(el)?)
        }
        "parblock" => {
            el.expect_attributes(&[])?;
            DocNode::ParBlock(parse_paras(el)?)
        }
        "toclist" => DocNode::TocList(DocTocList::from_xml(el)?),
        "details" => DocNode::Details(DocDetails::from_xml(el)?),
        "language" => {
            el.expect_attributes(&["langid"])?;
            DocNode::Language(DocLanguage {
                langid: el.attribute_string("langid")?,
                content: parse_paras(el)?,
            })
        }
        "copydoc" => {
            el.expect_attributes(&["link"])?;
            let mut ignored = None;
            DocNode::CopyDoc(DocCopy {
                link: el.attribute_string("link")?,
                content: parse_block_content(el, 0, &mut ignored)?,
            })
        }
        _ => return Ok(None),
    };
    Ok(Some(node))
}

// -- Inline types -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DocUrlLink {
    pub url: String,
    pub content: Vec<DocNode>,
}

impl FromXml for DocUrlLink {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["url"])?;
        Ok(Self {
            url: el.attribute_string("url")?,
            content: parse_mixed(el, DocContext::Inline)?,
        })
    }
}

/// A cross-reference inside prose (`docRefTextType`).
#[derive(Debug, Clone, PartialEq)]
pub struct DocRef {
    pub refid: String,
    pub kindref: RefKind,
    pub external: Option<String>,
    pub content: Vec<DocNode>,
}

impl FromXml for DocRef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "kindref", "external"])?;
        Ok(Self {
            refid: el.attribute_string("refid")?,
            kindref: RefKind::parse(&el)?,
            external: el.opt_attribute_string("external"),
            content: parse_mixed(el, DocContext::Inline)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocAnchor {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSymbol {
    pub name: String,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFormula {
    pub id: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocImage {
    /// Target generator: html, latex, docbook, rtf or xml.
    pub kind: Option<String>,
    pub name: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub alt: Option<String>,
    pub inline: bool,
    pub caption: Vec<DocNode>,
}

impl FromXml for DocImage {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["type", "name", "width", "height", "alt", "inline", "caption"])?;
        Ok(Self {
            kind: el.opt_attribute_string("type"),
            name: el.opt_attribute_string("name"),
            width: el.opt_attribute_string("width"),
            height: el.opt_attribute_string("height"),
            alt: el.opt_attribute_string("alt"),
            inline: el.opt_attribute_bool("inline")?,
            caption: parse_mixed(el, DocContext::Inline)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEmoji {
    pub name: String,
    pub unicode: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Dot,
    Msc,
    PlantUml,
    DotFile,
    MscFile,
    DiaFile,
}

/// Inline diagram sources (`dot`, `msc`, `plantuml`) and diagram file
/// references (`dotfile`, `mscfile`, `diafile`).
#[derive(Debug, Clone, PartialEq)]
pub struct DocDiagram {
    pub kind: DiagramKind,
    pub name: Option<String>,
    pub caption: Vec<DocNode>,
    /// Diagram source text, for the inline kinds.
    pub source: Option<String>,
}

impl FromXml for DocDiagram {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["name", "width", "height", "caption", "engine"])?;
        let kind = match el.name() {
            "dot" => DiagramKind::Dot,
            "msc" => DiagramKind::Msc,
            "plantuml" => DiagramKind::PlantUml,
            "dotfile" => DiagramKind::DotFile,
            "mscfile" => DiagramKind::MscFile,
            _ => DiagramKind::DiaFile,
        };
        let inline_source = matches!(kind, DiagramKind::Dot | DiagramKind::Msc | DiagramKind::PlantUml);
        let (caption, source) = if inline_source {
            let caption = el
                .opt_attribute_str("caption")
                .map(|c| vec![DocNode::Text(c.to_string())])
                .unwrap_or_default();
            (caption, Some(el.inner_text()?))
        } else {
            (parse_mixed(el, DocContext::Inline)?, None)
        };
        Ok(Self {
            kind,
            name: el.opt_attribute_string("name"),
            caption,
            source,
        })
    }
}

/// Generator-specific passthrough blocks (`htmlonly`, `latexonly`, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocOutputOnly {
    pub format: String,
    pub block: bool,
    pub text: String,
}

impl FromXml for DocOutputOnly {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["block"])?;
        Ok(Self {
            format: el.name().trim_end_matches("only").to_string(),
            block: el.opt_attribute_bool("block")?,
            text: el.inner_text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocIndexEntry {
    pub primary: String,
    pub secondary: String,
}

impl FromXml for DocIndexEntry {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut primary = None;
        let mut secondary = None;
        for child in el.child_elements()? {
            match child.name() {
                "primaryie" => set_once(&mut primary, child.inner_text()?, &el, &child)?,
                "secondaryie" => set_once(&mut secondary, child.inner_text()?, &el, &child)?,
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            primary: required(primary, &el, "primaryie")?,
            secondary: secondary.unwrap_or_default(),
        })
    }
}

// -- Block types --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DocList {
    pub ordered: bool,
    /// `type` attribute of ordered lists (`1`, `a`, `A`, `i`, `I`).
    pub numbering: Option<String>,
    pub start: Option<u32>,
    pub items: Vec<DocListItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocListItem {
    /// Checkbox state override (`checked` / `unchecked`).
    pub override_state: Option<String>,
    pub value: Option<u32>,
    pub content: Vec<DocNode>,
}

impl FromXml for DocListItem {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["override", "value"])?;
        Ok(Self {
            override_state: el.opt_attribute_string("override"),
            value: el.opt_attribute_number("value")?,
            content: parse_paras(el)?,
        })
    }
}

impl FromXml for DocList {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["type", "start"])?;
        let mut items = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "listitem" => items.push(DocListItem::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            ordered: el.name() == "orderedlist",
            numbering: el.opt_attribute_string("type"),
            start: el.opt_attribute_number("start")?,
            items,
        })
    }
}

/// `simplesect` kinds. Unknown kinds are kept and rendered neutrally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSectKind {
    See,
    Return,
    Author,
    Authors,
    Version,
    Since,
    Date,
    Note,
    Warning,
    Pre,
    Post,
    Copyright,
    Invariant,
    Remark,
    Attention,
    Important,
    Par,
    Rcs,
    Other(String),
}

impl SimpleSectKind {
    fn from_value(value: &str) -> Self {
        match value {
            "see" => Self::See,
            "return" => Self::Return,
            "author" => Self::Author,
            "authors" => Self::Authors,
            "version" => Self::Version,
            "since" => Self::Since,
            "date" => Self::Date,
            "note" => Self::Note,
            "warning" => Self::Warning,
            "pre" => Self::Pre,
            "post" => Self::Post,
            "copyright" => Self::Copyright,
            "invariant" => Self::Invariant,
            "remark" => Self::Remark,
            "attention" => Self::Attention,
            "important" => Self::Important,
            "par" => Self::Par,
            "rcs" => Self::Rcs,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocSimpleSect {
    pub kind: SimpleSectKind,
    pub title: Option<DocTitle>,
    pub content: Vec<DocNode>,
}

impl FromXml for DocSimpleSect {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["kind"])?;
        let mut title = None;
        let mut content = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "title" => set_once(&mut title, DocTitle::from_xml(child)?, &el, &child)?,
                "para" => content.push(DocNode::Para(DocPara::from_xml(child)?)),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            kind: SimpleSectKind::from_value(el.attribute_str("kind")?),
            title,
            content,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamListKind {
    Param,
    RetVal,
    Exception,
    TemplateParam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDirection {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocParamName {
    pub direction: Option<ParamDirection>,
    pub content: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocParamNameList {
    pub types: Vec<Vec<DocNode>>,
    pub names: Vec<DocParamName>,
}

impl FromXml for DocParamNameList {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut list = Self::default();
        for child in el.child_elements()? {
            match child.name() {
                "parametertype" => {
                    child.expect_attributes(&[])?;
                    list.types.push(parse_mixed(child, DocContext::Inline)?);
                }
                "parametername" => {
                    child.expect_attributes(&["direction"])?;
                    let direction = match child.opt_attribute_str("direction") {
                        None => None,
                        Some("in") => Some(ParamDirection::In),
                        Some("out") => Some(ParamDirection::Out),
                        Some("inout") => Some(ParamDirection::InOut),
                        Some(other) => {
                            return Err(child.invalid_attribute("direction", other, "in, out or inout"))
                        }
                    };
                    list.names.push(DocParamName {
                        direction,
                        content: parse_mixed(child, DocContext::Inline)?,
                    });
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(list)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocParamItem {
    pub names: Vec<DocParamNameList>,
    pub description: Description,
}

impl FromXml for DocParamItem {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut names = Vec::new();
        let mut description = None;
        for child in el.child_elements()? {
            match child.name() {
                "parameternamelist" => names.push(DocParamNameList::from_xml(child)?),
                "parameterdescription" => {
                    set_once(&mut description, Description::from_xml(child)?, &el, &child)?
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            names,
            description: required(description, &el, "parameterdescription")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocParamList {
    pub kind: ParamListKind,
    pub items: Vec<DocParamItem>,
}

impl FromXml for DocParamList {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["kind"])?;
        let kind = match el.attribute_str("kind")? {
            "param" => ParamListKind::Param,
            "retval" => ParamListKind::RetVal,
            "exception" => ParamListKind::Exception,
            "templateparam" => ParamListKind::TemplateParam,
            other => {
                return Err(el.invalid_attribute(
                    "kind",
                    other,
                    "param, retval, exception or templateparam",
                ))
            }
        };
        let mut items = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "parameteritem" => items.push(DocParamItem::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self { kind, items })
    }
}

// -- Program listings ---------------------------------------------------------

/// Highlight classes emitted by Doxygen's code parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightClass {
    Comment,
    Normal,
    Preprocessor,
    Keyword,
    KeywordType,
    KeywordFlow,
    StringLiteral,
    CharLiteral,
    XmlCData,
    VhdlKeyword,
    VhdlLogic,
    VhdlChar,
    VhdlDigit,
    Other(String),
}

impl HighlightClass {
    fn from_value(value: &str) -> Self {
        match value {
            "comment" => Self::Comment,
            "normal" => Self::Normal,
            "preprocessor" => Self::Preprocessor,
            "keyword" => Self::Keyword,
            "keywordtype" => Self::KeywordType,
            "keywordflow" => Self::KeywordFlow,
            "stringliteral" => Self::StringLiteral,
            "charliteral" => Self::CharLiteral,
            "xmlcdata" => Self::XmlCData,
            "vhdlkeyword" => Self::VhdlKeyword,
            "vhdllogic" => Self::VhdlLogic,
            "vhdlchar" => Self::VhdlChar,
            "vhdldigit" => Self::VhdlDigit,
            other => Self::Other(other.to_string()),
        }
    }

    /// CSS class name; `None` for unknown classes.
    pub fn css_class(&self) -> Option<&'static str> {
        Some(match self {
            Self::Comment => "comment",
            Self::Normal => "normal",
            Self::Preprocessor => "preprocessor",
            Self::Keyword => "keyword",
            Self::KeywordType => "keywordtype",
            Self::KeywordFlow => "keywordflow",
            Self::StringLiteral => "stringliteral",
            Self::CharLiteral => "charliteral",
            Self::XmlCData => "xmlcdata",
            Self::VhdlKeyword => "vhdlkeyword",
            Self::VhdlLogic => "vhdllogic",
            Self::VhdlChar => "vhdlchar",
            Self::VhdlDigit => "vhdldigit",
            Self::Other(_) => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightItem {
    Text(String),
    /// `<sp/>`, possibly repeated via its `value` attribute.
    Space(usize),
    Ref(RefText),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub class: HighlightClass,
    pub items: Vec<HighlightItem>,
}

impl FromXml for Highlight {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["class"])?;
        let mut items = Vec::new();
        for item in el.content() {
            match item {
                Content::Text(t) => items.push(HighlightItem::Text(t.to_string())),
                Content::Element(child) => match child.name() {
                    "sp" => {
                        child.expect_attributes(&["value"])?;
                        let count = child.opt_attribute_number::<usize>("value")?.unwrap_or(1);
                        items.push(HighlightItem::Space(count));
                    }
                    "ref" => items.push(HighlightItem::Ref(RefText::from_xml(child)?)),
                    _ => return Err(el.unexpected_element(&child)),
                },
            }
        }
        Ok(Self {
            class: HighlightClass::from_value(el.attribute_str("class")?),
            items,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub lineno: Option<u32>,
    pub refid: Option<String>,
    pub refkind: Option<RefKind>,
    pub external: Option<String>,
    pub highlights: Vec<Highlight>,
}

impl FromXml for CodeLine {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["lineno", "refid", "refkind", "external"])?;
        let refkind = match el.opt_attribute_str("refkind") {
            None => None,
            Some("compound") => Some(RefKind::Compound),
            Some("member") => Some(RefKind::Member),
            Some(other) => return Err(el.invalid_attribute("refkind", other, "compound or member")),
        };
        let mut highlights = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "highlight" => highlights.push(Highlight::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            lineno: el.opt_attribute_number("lineno")?,
            refid: el.opt_attribute_string("refid"),
            refkind,
            external: el.opt_attribute_string("external"),
            highlights,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramListing {
    /// Source file name or extension (`.cpp`), used as a language hint.
    pub filename: Option<String>,
    pub lines: Vec<CodeLine>,
}

impl ProgramListing {
    /// Language hint derived from `filename`.
    pub fn language(&self) -> Option<&str> {
        source_language(self.filename.as_deref()?)
    }
}

/// Code block language for a file name or bare extension.
pub fn source_language(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(match ext {
        "" => return None,
        "h" | "hh" | "hpp" | "hxx" | "c" | "cc" | "cpp" | "cxx" | "ipp" | "tpp" => "cpp",
        "py" => "python",
        "sh" => "bash",
        "rs" => "rust",
        other => other,
    })
}

impl FromXml for ProgramListing {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["filename"])?;
        let mut lines = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "codeline" => lines.push(CodeLine::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            filename: el.opt_attribute_string("filename"),
            lines,
        })
    }
}

/// `verbatim`, `javadocliteral`, `javadoccode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocVerbatim {
    pub element_name: String,
    pub text: String,
}

// -- Tables -------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    pub thead: bool,
    pub colspan: Option<u32>,
    pub rowspan: Option<u32>,
    pub align: Option<String>,
    pub valign: Option<String>,
    pub width: Option<String>,
    pub class: Option<String>,
    pub content: Vec<DocNode>,
}

impl FromXml for DocEntry {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["thead", "colspan", "rowspan", "align", "valign", "width", "class"])?;
        Ok(Self {
            thead: el.attribute_bool("thead")?,
            colspan: el.opt_attribute_number("colspan")?,
            rowspan: el.opt_attribute_number("rowspan")?,
            align: el.opt_attribute_string("align"),
            valign: el.opt_attribute_string("valign"),
            width: el.opt_attribute_string("width"),
            class: el.opt_attribute_string("class"),
            content: parse_paras(el)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocRow {
    pub entries: Vec<DocEntry>,
}

impl FromXml for DocRow {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut entries = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "entry" => entries.push(DocEntry::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocTable {
    pub rows_count: u32,
    pub cols_count: u32,
    pub width: Option<String>,
    pub caption: Option<DocTitle>,
    pub rows: Vec<DocRow>,
}

impl FromXml for DocTable {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["rows", "cols", "width"])?;
        let mut caption = None;
        let mut rows = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "caption" => {
                    child.expect_attributes(&["id"])?;
                    let title = DocTitle {
                        content: parse_mixed(child, DocContext::Inline)?,
                    };
                    set_once(&mut caption, title, &el, &child)?;
                }
                "row" => rows.push(DocRow::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            rows_count: el.attribute_number("rows")?,
            cols_count: el.attribute_number("cols")?,
            width: el.opt_attribute_string("width"),
            caption,
            rows,
        })
    }
}

// -- Other blocks -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DocVarListEntry {
    pub term: DocTitle,
    pub item: DocListItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocVariableList {
    pub entries: Vec<DocVarListEntry>,
}

impl FromXml for DocVariableList {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut entries = Vec::new();
        let mut pending: Option<DocTitle> = None;
        for child in el.child_elements()? {
            match child.name() {
                "varlistentry" if pending.is_none() => {
                    child.expect_attributes(&[])?;
                    let mut term = None;
                    for inner in child.child_elements()? {
                        match inner.name() {
                            "term" => set_once(&mut term, DocTitle::from_xml(inner)?, &child, &inner)?,
                            _ => return Err(child.unexpected_element(&inner)),
                        }
                    }
                    pending = Some(required(term, &child, "term")?);
                }
                "listitem" => match pending.take() {
                    Some(term) => entries.push(DocVarListEntry {
                        term,
                        item: DocListItem::from_xml(child)?,
                    }),
                    None => return Err(el.unexpected_element(&child)),
                },
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        if pending.is_some() {
            return Err(el.missing_element("listitem"));
        }
        Ok(Self { entries })
    }
}

/// Cross-reference sections: `\todo`, `\bug`, `\deprecated`, `\test`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocXRefSect {
    pub id: String,
    pub title: String,
    pub description: Description,
}

impl DocXRefSect {
    /// `deprecated_1_deprecated000001` → `deprecated`.
    pub fn kind(&self) -> &str {
        self.id.split("_1").next().unwrap_or(&self.id)
    }
}

impl FromXml for DocXRefSect {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["id"])?;
        let mut titles = Vec::new();
        let mut description = None;
        for child in el.child_elements()? {
            match child.name() {
                "xreftitle" => titles.push(child.inner_text()?),
                "xrefdescription" => {
                    set_once(&mut description, Description::from_xml(child)?, &el, &child)?
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            id: el.attribute_string("id")?,
            title: titles.join(", "),
            description: required(description, &el, "xrefdescription")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocHeading {
    pub level: u8,
    pub content: Vec<DocNode>,
}

impl FromXml for DocHeading {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["level"])?;
        let level: u8 = el.attribute_number("level")?;
        if !(1..=6).contains(&level) {
            return Err(el.invalid_attribute("level", &level.to_string(), "1 to 6"));
        }
        Ok(Self {
            level,
            content: parse_mixed(el, DocContext::Inline)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocTocItem {
    pub id: Option<String>,
    pub content: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocTocList {
    pub items: Vec<DocTocItem>,
}

impl FromXml for DocTocList {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut items = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "tocitem" => {
                    child.expect_attributes(&["id"])?;
                    items.push(DocTocItem {
                        id: child.opt_attribute_string("id"),
                        content: parse_mixed(child, DocContext::Inline)?,
                    });
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self { items })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocDetails {
    pub summary: Option<DocTitle>,
    pub content: Vec<DocNode>,
}

impl FromXml for DocDetails {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut summary = None;
        let mut content = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "summary" => set_once(&mut summary, DocTitle::from_xml(child)?, &el, &child)?,
                "para" => content.push(DocNode::Para(DocPara::from_xml(child)?)),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self { summary, content })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocLanguage {
    pub langid: String,
    pub content: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocCopy {
    pub link: String,
    pub content: Vec<DocNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn description(xml: &str) -> Result<Description, ParseError> {
        let doc = parse_document(xml).unwrap();
        Description::from_xml(Element::new(doc.root_element()))
    }

    fn first_para(desc: &Description) -> &DocPara {
        match desc.content.first() {
            Some(DocNode::Para(p)) => p,
            other => panic!("expected para, got {other:?}"),
        }
    }

    #[test]
    fn paragraph_keeps_interleaving() {
        let desc = description(
            r#"<detaileddescription><para>before <ref refid="a_1b" kindref="member">name</ref> after</para></detaileddescription>"#,
        )
        .unwrap();
        let para = first_para(&desc);
        assert_eq!(para.content.len(), 3);
        assert_eq!(para.content[0], DocNode::Text("before ".to_string()));
        assert!(matches!(&para.content[1], DocNode::Ref(r) if r.refid == "a_1b"));
        assert_eq!(para.content[2], DocNode::Text(" after".to_string()));
    }

    #[test]
    fn blank_description_is_empty() {
        let desc = description("<briefdescription>\n</briefdescription>").unwrap();
        assert!(desc.is_empty());
        assert_eq!(desc.element_name, "briefdescription");
    }

    #[test]
    fn sections_nest_by_level() {
        let desc = description(
            r#"<detaileddescription><sect1 id="s1"><title>One</title><sect2 id="s2"><para>x</para></sect2></sect1></detaileddescription>"#,
        )
        .unwrap();
        match &desc.content[0] {
            DocNode::Sect(s) => {
                assert_eq!(s.level, 1);
                assert!(s.title.is_some());
                assert!(matches!(&s.content[0], DocNode::Sect(inner) if inner.level == 2));
            }
            other => panic!("expected sect1, got {other:?}"),
        }
    }

    #[test]
    fn skipped_section_level_is_rejected() {
        let err = description(
            r#"<detaileddescription><sect2 id="s"><para>x</para></sect2></detaileddescription>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedElement { ref found, .. } if found == "sect2"));
    }

    #[test]
    fn block_commands_not_allowed_in_titles() {
        let err = description(
            "<detaileddescription><title><itemizedlist/></title></detaileddescription>",
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedElement { .. }));
    }

    #[test]
    fn unknown_element_is_rejected() {
        let err = description("<briefdescription><para><blink>x</blink></para></briefdescription>")
            .unwrap_err();
        assert!(err.to_string().contains("<blink>"));
    }

    #[test]
    fn lists_and_symbols() {
        let desc = description(
            "<detaileddescription><para><itemizedlist><listitem><para>a<ndash/>b</para></listitem></itemizedlist></para></detaileddescription>",
        )
        .unwrap();
        let para = first_para(&desc);
        match &para.content[0] {
            DocNode::List(list) => {
                assert!(!list.ordered);
                assert_eq!(list.items.len(), 1);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn simplesect_unknown_kind_is_kept() {
        let desc = description(
            r#"<detaileddescription><para><simplesect kind="fancy"><para>x</para></simplesect></para></detaileddescription>"#,
        )
        .unwrap();
        assert!(matches!(
            &first_para(&desc).content[0],
            DocNode::SimpleSect(s) if s.kind == SimpleSectKind::Other("fancy".to_string())
        ));
    }

    #[test]
    fn parameter_list() {
        let desc = description(
            r#"<detaileddescription><para><parameterlist kind="param"><parameteritem><parameternamelist><parametername direction="in">x</parametername></parameternamelist><parameterdescription><para>the x</para></parameterdescription></parameteritem></parameterlist></para></detaileddescription>"#,
        )
        .unwrap();
        match &first_para(&desc).content[0] {
            DocNode::ParameterList(list) => {
                assert_eq!(list.kind, ParamListKind::Param);
                assert_eq!(list.items[0].names[0].names[0].direction, Some(ParamDirection::In));
            }
            other => panic!("expected parameterlist, got {other:?}"),
        }
    }

    #[test]
    fn parameter_item_requires_description() {
        let err = description(
            r#"<detaileddescription><para><parameterlist kind="param"><parameteritem><parameternamelist><parametername>x</parametername></parameternamelist></parameteritem></parameterlist></para></detaileddescription>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::MissingElement { child: "parameterdescription", .. }));
    }

    #[test]
    fn program_listing_with_spaces() {
        let desc = description(
            r#"<detaileddescription><para><programlisting filename=".cpp"><codeline><highlight class="keyword">int</highlight><highlight class="normal"><sp/>x;</highlight></codeline></programlisting></para></detaileddescription>"#,
        )
        .unwrap();
        match &first_para(&desc).content[0] {
            DocNode::ProgramListing(listing) => {
                assert_eq!(listing.language(), Some("cpp"));
                let normal = &listing.lines[0].highlights[1];
                assert_eq!(normal.items[0], HighlightItem::Space(1));
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn table_requires_thead_attribute() {
        let err = description(
            r#"<detaileddescription><para><table rows="1" cols="1"><row><entry><para>x</para></entry></row></table></para></detaileddescription>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { ref attribute, .. } if attribute == "thead"));
    }

    #[test]
    fn variable_list_pairs_terms_with_items() {
        let desc = description(
            "<detaileddescription><para><variablelist><varlistentry><term>A</term></varlistentry><listitem><para>a</para></listitem></variablelist></para></detaileddescription>",
        )
        .unwrap();
        assert!(matches!(
            &first_para(&desc).content[0],
            DocNode::VariableList(v) if v.entries.len() == 1
        ));
    }

    #[test]
    fn variable_list_item_without_term_is_rejected() {
        assert!(description(
            "<detaileddescription><para><variablelist><listitem><para>a</para></listitem></variablelist></para></detaileddescription>",
        )
        .is_err());
    }

    #[test]
    fn xrefsect_kind() {
        let desc = description(
            r#"<detaileddescription><para><xrefsect id="deprecated_1_deprecated000001"><xreftitle>Deprecated</xreftitle><xrefdescription><para>old</para></xrefdescription></xrefsect></para></detaileddescription>"#,
        )
        .unwrap();
        match &first_para(&desc).content[0] {
            DocNode::XrefSect(x) => {
                assert_eq!(x.kind(), "deprecated");
                assert_eq!(x.title, "Deprecated");
            }
            other => panic!("expected xrefsect, got {other:?}"),
        }
    }
}
