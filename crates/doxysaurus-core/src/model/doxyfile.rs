//! `Doxyfile.xml`: the configuration Doxygen ran with.

use super::FromXml;
use crate::error::ParseError;
use crate::xml::Element;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Int,
    Bool,
    String,
    StringList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoxyfileOption {
    pub id: String,
    /// Whether the value is Doxygen's default.
    pub is_default: bool,
    pub option_type: OptionType,
    pub values: Vec<String>,
}

impl FromXml for DoxyfileOption {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["id", "default", "type"])?;
        let option_type = match el.attribute_str("type")? {
            "int" => OptionType::Int,
            "bool" => OptionType::Bool,
            "string" => OptionType::String,
            "stringlist" => OptionType::StringList,
            other => return Err(el.invalid_attribute("type", other, "int, bool, string or stringlist")),
        };
        let mut values = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "value" => values.push(child.inner_text()?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            id: el.attribute_string("id")?,
            is_default: el.attribute_bool("default")?,
            option_type,
            values,
        })
    }
}

/// Options keyed by id, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doxyfile {
    pub options: IndexMap<String, DoxyfileOption>,
}

impl Doxyfile {
    pub fn get(&self, id: &str) -> Option<&DoxyfileOption> {
        self.options.get(id)
    }

    /// First value of a string option, if non-empty.
    pub fn string(&self, id: &str) -> Option<&str> {
        self.get(id)
            .and_then(|o| o.values.first())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn bool(&self, id: &str) -> Option<bool> {
        match self.string(id)? {
            "YES" => Some(true),
            "NO" => Some(false),
            _ => None,
        }
    }

    pub fn project_name(&self) -> Option<&str> {
        self.string("PROJECT_NAME")
    }

    pub fn project_brief(&self) -> Option<&str> {
        self.string("PROJECT_BRIEF")
    }

    pub fn project_number(&self) -> Option<&str> {
        self.string("PROJECT_NUMBER")
    }
}

impl FromXml for Doxyfile {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["version", "lang", "noNamespaceSchemaLocation"])?;
        let mut options = IndexMap::new();
        for child in el.child_elements()? {
            match child.name() {
                "option" => {
                    let option = DoxyfileOption::from_xml(child)?;
                    if options.contains_key(&option.id) {
                        return Err(el.duplicate_element(&child));
                    }
                    options.insert(option.id.clone(), option);
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self { options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn parse(xml: &str) -> Result<Doxyfile, ParseError> {
        let doc = parse_document(xml).unwrap();
        Doxyfile::from_xml(Element::root(&doc, "doxyfile")?)
    }

    #[test]
    fn project_fields() {
        let file = parse(
            r#"<doxyfile version="1.9.8" xml:lang="en-US">
  <option id="PROJECT_NAME" default="no" type="string"><value>Widgets</value></option>
  <option id="PROJECT_BRIEF" default="yes" type="string"><value></value></option>
  <option id="GENERATE_XML" default="no" type="bool"><value>YES</value></option>
  <option id="INPUT" default="no" type="stringlist"><value>src</value><value>include</value></option>
</doxyfile>"#,
        )
        .unwrap();
        assert_eq!(file.project_name(), Some("Widgets"));
        assert_eq!(file.project_brief(), None);
        assert_eq!(file.bool("GENERATE_XML"), Some(true));
        assert_eq!(file.get("INPUT").unwrap().values.len(), 2);
        assert_eq!(file.options.get_index(0).unwrap().0, "PROJECT_NAME");
    }

    #[test]
    fn bad_option_type_is_rejected() {
        let err = parse(r#"<doxyfile version="1"><option id="X" default="no" type="float"/></doxyfile>"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }
}
