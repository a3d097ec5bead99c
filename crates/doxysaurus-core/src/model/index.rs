//! `index.xml`: the list of every compound and its members.

use super::compound::CompoundKind;
use super::FromXml;
use crate::error::ParseError;
use crate::xml::{required, set_once, Element};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoxygenIndex {
    pub version: String,
    pub lang: Option<String>,
    pub compounds: Vec<IndexCompound>,
}

impl FromXml for DoxygenIndex {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["version", "lang", "noNamespaceSchemaLocation"])?;
        let mut compounds = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "compound" => compounds.push(IndexCompound::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            version: el.attribute_string("version")?,
            lang: el.opt_attribute_string("lang"),
            compounds,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCompound {
    pub refid: String,
    pub kind: CompoundKind,
    pub name: String,
    pub members: Vec<IndexMember>,
}

impl FromXml for IndexCompound {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "kind"])?;
        let mut name = None;
        let mut members = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "name" => set_once(&mut name, child.inner_text()?, &el, &child)?,
                "member" => members.push(IndexMember::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            refid: el.attribute_string("refid")?,
            kind: CompoundKind::parse(&el, "kind")?,
            name: required(name, &el, "name")?,
            members,
        })
    }
}

/// A member listed under its compound. `kind` additionally takes
/// `enumvalue`, so it stays a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMember {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

impl FromXml for IndexMember {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "kind"])?;
        for child in el.child_elements()? {
            if child.name() != "name" {
                return Err(el.unexpected_element(&child));
            }
        }
        Ok(Self {
            refid: el.attribute_string("refid")?,
            kind: el.attribute_string("kind")?,
            name: el.inner_element_text("name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    #[test]
    fn parses_index() {
        let doc = parse_document(
            r#"<doxygenindex version="1.9.8" xml:lang="en-US">
  <compound refid="classns_1_1_widget" kind="class"><name>ns::Widget</name>
    <member refid="classns_1_1_widget_1a1" kind="function"><name>draw</name></member>
  </compound>
  <compound refid="namespacens" kind="namespace"><name>ns</name></compound>
</doxygenindex>"#,
        )
        .unwrap();
        let index = DoxygenIndex::from_xml(Element::root(&doc, "doxygenindex").unwrap()).unwrap();
        assert_eq!(index.compounds.len(), 2);
        assert_eq!(index.compounds[0].kind, CompoundKind::Class);
        assert_eq!(index.compounds[0].members[0].name, "draw");
        assert_eq!(index.compounds[1].refid, "namespacens");
    }

    #[test]
    fn compound_without_name_is_rejected() {
        let doc = parse_document(r#"<doxygenindex version="1"><compound refid="a" kind="class"/></doxygenindex>"#)
            .unwrap();
        let err = DoxygenIndex::from_xml(Element::new(doc.root_element())).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement { child: "name", .. }));
    }
}
