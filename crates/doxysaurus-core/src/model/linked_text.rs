//! Linked text: plain text interleaved with typed cross-references.

use super::FromXml;
use crate::error::ParseError;
use crate::xml::{Content, Element};

/// What a `refid` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Compound,
    Member,
}

impl RefKind {
    pub(crate) fn parse(el: &Element<'_, '_>) -> Result<Self, ParseError> {
        match el.attribute_str("kindref")? {
            "compound" => Ok(Self::Compound),
            "member" => Ok(Self::Member),
            other => Err(el.invalid_attribute("kindref", other, "compound or member")),
        }
    }
}

/// A `<ref>` leaf in linked text or code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefText {
    pub refid: String,
    pub kindref: RefKind,
    pub external: Option<String>,
    pub tooltip: Option<String>,
    pub text: String,
}

impl FromXml for RefText {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "kindref", "external", "tooltip"])?;
        Ok(Self {
            refid: el.attribute_string("refid")?,
            kindref: RefKind::parse(&el)?,
            external: el.opt_attribute_string("external"),
            tooltip: el.opt_attribute_string("tooltip"),
            text: el.inner_text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedTextItem {
    Text(String),
    Ref(RefText),
}

/// Mixed content of `text` runs and `ref` tokens, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedText {
    pub element_name: String,
    pub items: Vec<LinkedTextItem>,
}

impl LinkedText {
    /// The text with references flattened to their labels.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|item| match item {
                LinkedTextItem::Text(t) => t.as_str(),
                LinkedTextItem::Ref(r) => r.text.as_str(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|item| match item {
            LinkedTextItem::Text(t) => t.trim().is_empty(),
            LinkedTextItem::Ref(_) => false,
        })
    }
}

impl FromXml for LinkedText {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut items = Vec::new();
        for item in el.content() {
            match item {
                Content::Text(t) => items.push(LinkedTextItem::Text(t.to_string())),
                Content::Element(child) if child.name() == "ref" => {
                    items.push(LinkedTextItem::Ref(RefText::from_xml(child)?));
                }
                Content::Element(child) => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            element_name: el.name().to_string(),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn parse(xml: &str) -> Result<LinkedText, ParseError> {
        let doc = parse_document(xml).unwrap();
        LinkedText::from_xml(Element::new(doc.root_element()))
    }

    #[test]
    fn keeps_text_and_refs_in_order() {
        let text = parse(
            r#"<type>const <ref refid="classns_1_1_base" kindref="compound">Base</ref> &amp;</type>"#,
        )
        .unwrap();
        assert_eq!(text.items.len(), 3);
        assert_eq!(text.plain_text(), "const Base &");
        match &text.items[1] {
            LinkedTextItem::Ref(r) => {
                assert_eq!(r.refid, "classns_1_1_base");
                assert_eq!(r.kindref, RefKind::Compound);
            }
            other => panic!("expected ref, got {other:?}"),
        }
    }

    #[test]
    fn rejects_foreign_elements() {
        assert!(parse("<type>int <bold>x</bold></type>").is_err());
    }

    #[test]
    fn rejects_bad_kindref() {
        let err = parse(r#"<type><ref refid="a" kindref="file">a</ref></type>"#).unwrap_err();
        assert!(err.to_string().contains("kindref"));
    }
}
