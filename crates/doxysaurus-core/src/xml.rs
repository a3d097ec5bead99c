//! Element accessor: typed lookups over a parsed `roxmltree` node.
//!
//! Every extraction fails loudly: the Doxygen schema is fixed, so a shape
//! mismatch means version skew or an unmodelled element and must stop the
//! parse of that file.

use crate::error::ParseError;
use roxmltree::{Document, Node};
use std::str::FromStr;

/// Parse XML text into a `roxmltree` document.
pub fn parse_document(text: &str) -> Result<Document<'_>, ParseError> {
    Document::parse(text).map_err(|e| ParseError::Xml(e.to_string()))
}

/// A single XML element.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input: 'a> {
    node: Node<'a, 'input>,
}

/// One entry of an element's ordered content.
#[derive(Debug, Clone, Copy)]
pub enum Content<'a, 'input: 'a> {
    Text(&'a str),
    Element(Element<'a, 'input>),
}

impl<'a, 'input: 'a> Element<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// The document root, which must be named `expected`.
    pub fn root(doc: &'a Document<'input>, expected: &'static str) -> Result<Self, ParseError> {
        let root = Self::new(doc.root_element());
        if root.name() != expected {
            return Err(ParseError::UnexpectedRoot {
                expected,
                found: root.name().to_string(),
                position: root.position(),
            });
        }
        Ok(root)
    }

    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// `line:column` of the element start tag.
    pub fn position(&self) -> String {
        let pos = self.node.document().text_pos_at(self.node.range().start);
        format!("{}:{}", pos.row, pos.col)
    }

    // -- Attributes -----------------------------------------------------------

    fn find_attribute(&self, name: &str) -> Option<&'a str> {
        // Compare local names so that `xml:lang` is found as `lang`.
        self.node
            .attributes()
            .find(|a| a.name() == name)
            .map(|a| a.value())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.find_attribute(name).is_some()
    }

    /// Reject any attribute whose local name is not in `allowed`.
    pub fn expect_attributes(&self, allowed: &[&str]) -> Result<(), ParseError> {
        for attr in self.node.attributes() {
            if !allowed.contains(&attr.name()) {
                return Err(ParseError::UnexpectedAttribute {
                    element: self.name().to_string(),
                    attribute: attr.name().to_string(),
                    position: self.position(),
                });
            }
        }
        Ok(())
    }

    pub fn attribute_str(&self, name: &str) -> Result<&'a str, ParseError> {
        self.find_attribute(name)
            .ok_or_else(|| ParseError::MissingAttribute {
                element: self.name().to_string(),
                attribute: name.to_string(),
                position: self.position(),
            })
    }

    pub fn opt_attribute_str(&self, name: &str) -> Option<&'a str> {
        self.find_attribute(name)
    }

    pub fn attribute_string(&self, name: &str) -> Result<String, ParseError> {
        self.attribute_str(name).map(str::to_string)
    }

    pub fn opt_attribute_string(&self, name: &str) -> Option<String> {
        self.find_attribute(name).map(str::to_string)
    }

    pub fn attribute_number<T: FromStr>(&self, name: &str) -> Result<T, ParseError> {
        let value = self.attribute_str(name)?;
        self.parse_number(name, value)
    }

    pub fn opt_attribute_number<T: FromStr>(&self, name: &str) -> Result<Option<T>, ParseError> {
        match self.find_attribute(name) {
            Some(value) => self.parse_number(name, value).map(Some),
            None => Ok(None),
        }
    }

    fn parse_number<T: FromStr>(&self, name: &str, value: &str) -> Result<T, ParseError> {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| self.invalid_attribute(name, value, "a number"))
    }

    /// Doxygen booleans are `yes` / `no`.
    pub fn attribute_bool(&self, name: &str) -> Result<bool, ParseError> {
        let value = self.attribute_str(name)?;
        self.parse_bool(name, value)
    }

    /// Optional boolean; absence reads as `false`.
    pub fn opt_attribute_bool(&self, name: &str) -> Result<bool, ParseError> {
        match self.find_attribute(name) {
            Some(value) => self.parse_bool(name, value),
            None => Ok(false),
        }
    }

    fn parse_bool(&self, name: &str, value: &str) -> Result<bool, ParseError> {
        match value {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(self.invalid_attribute(name, value, "yes or no")),
        }
    }

    pub fn invalid_attribute(&self, name: &str, value: &str, expected: &'static str) -> ParseError {
        ParseError::InvalidAttribute {
            element: self.name().to_string(),
            attribute: name.to_string(),
            value: value.to_string(),
            expected,
            position: self.position(),
        }
    }

    // -- Children -------------------------------------------------------------

    /// Ordered content: elements and text runs, comments skipped.
    pub fn content(&self) -> Vec<Content<'a, 'input>> {
        self.node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(Content::Element(Element::new(child)))
                } else if child.is_text() {
                    child.text().map(Content::Text)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Element-only content. Blank text between elements is ignored, any
    /// other text is an error.
    pub fn child_elements(&self) -> Result<Vec<Element<'a, 'input>>, ParseError> {
        let mut children = Vec::new();
        for item in self.content() {
            match item {
                Content::Element(el) => children.push(el),
                Content::Text(text) if text.trim().is_empty() => {}
                Content::Text(text) => return Err(self.unexpected_text(text)),
            }
        }
        Ok(children)
    }

    pub fn has_inner_element(&self, name: &str) -> bool {
        self.node
            .children()
            .any(|c| c.is_element() && c.tag_name().name() == name)
    }

    pub fn inner_elements(&self, name: &str) -> Vec<Element<'a, 'input>> {
        self.node
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == name)
            .map(Element::new)
            .collect()
    }

    /// True when the element carries any non-blank text directly.
    pub fn has_inner_text(&self) -> bool {
        self.node
            .children()
            .any(|c| c.is_text() && c.text().is_some_and(|t| !t.trim().is_empty()))
    }

    /// Concatenated text of an element that must contain only text.
    pub fn inner_text(&self) -> Result<String, ParseError> {
        let mut text = String::new();
        for item in self.content() {
            match item {
                Content::Text(t) => text.push_str(t),
                Content::Element(el) => {
                    return Err(ParseError::ExpectedText {
                        element: self.name().to_string(),
                        found: el.name().to_string(),
                        position: el.position(),
                    })
                }
            }
        }
        Ok(text)
    }

    /// True when exactly one `name` child exists and it holds only text.
    pub fn is_inner_element_text(&self, name: &str) -> bool {
        let matches = self.inner_elements(name);
        matches.len() == 1 && !matches[0].node.children().any(|c| c.is_element())
    }

    /// Text of the single `name` child.
    pub fn inner_element_text(&self, name: &'static str) -> Result<String, ParseError> {
        let matches = self.inner_elements(name);
        match matches.as_slice() {
            [] => Err(self.missing_element(name)),
            [only] => only.inner_text(),
            [_, second, ..] => Err(self.duplicate_element(second)),
        }
    }

    // -- Error builders -------------------------------------------------------

    pub fn unexpected_element(&self, child: &Element<'_, '_>) -> ParseError {
        ParseError::UnexpectedElement {
            parent: self.name().to_string(),
            found: child.name().to_string(),
            position: child.position(),
        }
    }

    pub fn unexpected_text(&self, text: &str) -> ParseError {
        ParseError::UnexpectedText {
            element: self.name().to_string(),
            text: text.trim().to_string(),
            position: self.position(),
        }
    }

    pub fn missing_element(&self, child: &'static str) -> ParseError {
        ParseError::MissingElement {
            element: self.name().to_string(),
            child,
            position: self.position(),
        }
    }

    pub fn duplicate_element(&self, child: &Element<'_, '_>) -> ParseError {
        ParseError::DuplicateElement {
            element: self.name().to_string(),
            child: child.name().to_string(),
            position: child.position(),
        }
    }
}

/// Store a singleton child, rejecting a second occurrence.
pub fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    parent: &Element<'_, '_>,
    child: &Element<'_, '_>,
) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(parent.duplicate_element(child));
    }
    *slot = Some(value);
    Ok(())
}

/// Unwrap a required singleton child after the scan.
pub fn required<T>(
    slot: Option<T>,
    parent: &Element<'_, '_>,
    name: &'static str,
) -> Result<T, ParseError> {
    slot.ok_or_else(|| parent.missing_element(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_root<R>(xml: &str, f: impl FnOnce(Element<'_, '_>) -> R) -> R {
        let doc = parse_document(xml).unwrap();
        f(Element::new(doc.root_element()))
    }

    #[test]
    fn attribute_lookup_and_coercion() {
        with_root(r#"<m id="x" line="12" static="yes" xml:lang="en"/>"#, |el| {
            assert!(el.has_attribute("id"));
            assert!(el.has_attribute("lang"));
            assert_eq!(el.attribute_str("id").unwrap(), "x");
            assert_eq!(el.attribute_number::<u32>("line").unwrap(), 12);
            assert!(el.attribute_bool("static").unwrap());
            assert!(!el.opt_attribute_bool("const").unwrap());
        });
    }

    #[test]
    fn missing_attribute_is_an_error() {
        with_root("<m/>", |el| {
            let err = el.attribute_str("id").unwrap_err();
            assert!(matches!(err, ParseError::MissingAttribute { .. }));
            assert!(err.to_string().contains("'id'"));
        });
    }

    #[test]
    fn bad_bool_is_an_error() {
        with_root(r#"<m static="true"/>"#, |el| {
            let err = el.attribute_bool("static").unwrap_err();
            assert!(matches!(err, ParseError::InvalidAttribute { .. }));
        });
    }

    #[test]
    fn unknown_attribute_rejected() {
        with_root(r#"<m id="x" colour="red"/>"#, |el| {
            let err = el.expect_attributes(&["id"]).unwrap_err();
            assert!(err.to_string().contains("colour"));
        });
    }

    #[test]
    fn content_preserves_order() {
        with_root("<p>a<b>x</b>c</p>", |el| {
            let kinds: Vec<String> = el
                .content()
                .iter()
                .map(|c| match c {
                    Content::Text(t) => format!("text:{t}"),
                    Content::Element(e) => format!("el:{}", e.name()),
                })
                .collect();
            assert_eq!(kinds, ["text:a", "el:b", "text:c"]);
        });
    }

    #[test]
    fn child_elements_rejects_stray_text() {
        with_root("<c>\n  <a/>\n  stray\n</c>", |el| {
            assert!(matches!(
                el.child_elements().unwrap_err(),
                ParseError::UnexpectedText { .. }
            ));
        });
    }

    #[test]
    fn inner_text_rules() {
        with_root("<c><name>Widget</name><t>a<b/></t></c>", |el| {
            assert!(el.is_inner_element_text("name"));
            assert!(!el.is_inner_element_text("t"));
            assert_eq!(el.inner_element_text("name").unwrap(), "Widget");
            assert!(matches!(
                el.inner_element_text("missing").unwrap_err(),
                ParseError::MissingElement { .. }
            ));
            assert!(!el.has_inner_text());
        });
    }

    #[test]
    fn position_is_line_and_column() {
        with_root("<a>\n  <b/>\n</a>", |el| {
            let b = el.inner_elements("b")[0];
            assert_eq!(b.position(), "2:3");
        });
    }

    #[test]
    fn root_name_is_checked() {
        let doc = parse_document("<other/>").unwrap();
        assert!(matches!(
            Element::root(&doc, "doxygen").unwrap_err(),
            ParseError::UnexpectedRoot { .. }
        ));
    }
}
