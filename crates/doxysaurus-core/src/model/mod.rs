//! Data model for Doxygen's XML output, one type per schema complex type.
//!
//! Each type parses its own element in [`FromXml::from_xml`]; that function is
//! the whole parsing algorithm for the type. A value is only returned once
//! every cardinality and choice constraint of the schema has been checked.

pub mod compound;
pub mod description;
pub mod doxyfile;
pub mod index;
pub mod linked_text;
pub mod member;

use crate::error::ParseError;
use crate::xml::{parse_document, Element};

pub use compound::*;
pub use description::*;
pub use doxyfile::*;
pub use index::*;
pub use linked_text::*;
pub use member::*;

/// Construct a model value from its XML element.
pub trait FromXml: Sized {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError>;
}

/// Parse a whole document whose root element must be `root`.
pub fn parse_str<T: FromXml>(text: &str, root: &'static str) -> Result<T, ParseError> {
    let doc = parse_document(text)?;
    T::from_xml(Element::root(&doc, root)?)
}

/// Parse every child of `el` as `T`, requiring element-only content.
pub(crate) fn parse_all<T: FromXml>(els: &[Element<'_, '_>]) -> Result<Vec<T>, ParseError> {
    els.iter().map(|el| T::from_xml(*el)).collect()
}

/// `prot` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protection {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

impl Protection {
    pub(crate) fn parse(el: &Element<'_, '_>, attr: &str) -> Result<Self, ParseError> {
        match el.opt_attribute_str(attr) {
            None | Some("public") => Ok(Self::Public),
            Some("protected") => Ok(Self::Protected),
            Some("private") => Ok(Self::Private),
            Some("package") => Ok(Self::Package),
            Some(other) => Err(el.invalid_attribute(
                attr,
                other,
                "public, protected, private or package",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        }
    }
}

/// `virt` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Virtualness {
    #[default]
    NonVirtual,
    Virtual,
    PureVirtual,
}

impl Virtualness {
    pub(crate) fn parse(el: &Element<'_, '_>, attr: &str) -> Result<Self, ParseError> {
        match el.opt_attribute_str(attr) {
            None | Some("non-virtual") => Ok(Self::NonVirtual),
            Some("virtual") => Ok(Self::Virtual),
            Some("pure-virtual") => Ok(Self::PureVirtual),
            Some(other) => Err(el.invalid_attribute(
                attr,
                other,
                "non-virtual, virtual or pure-virtual",
            )),
        }
    }
}
