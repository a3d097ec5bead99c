//! Section and member definitions.

use super::description::Description;
use super::linked_text::LinkedText;
use super::{parse_all, FromXml, Protection, Virtualness};
use crate::error::ParseError;
use crate::xml::{required, set_once, Element};

/// `memberdef` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Define,
    Property,
    Event,
    Variable,
    Typedef,
    Enum,
    Function,
    Signal,
    Prototype,
    Friend,
    Dcop,
    Slot,
    Interface,
    Service,
}

impl MemberKind {
    fn parse(el: &Element<'_, '_>) -> Result<Self, ParseError> {
        Ok(match el.attribute_str("kind")? {
            "define" => Self::Define,
            "property" => Self::Property,
            "event" => Self::Event,
            "variable" => Self::Variable,
            "typedef" => Self::Typedef,
            "enum" => Self::Enum,
            "function" => Self::Function,
            "signal" => Self::Signal,
            "prototype" => Self::Prototype,
            "friend" => Self::Friend,
            "dcop" => Self::Dcop,
            "slot" => Self::Slot,
            "interface" => Self::Interface,
            "service" => Self::Service,
            other => return Err(el.invalid_attribute("kind", other, "a member kind")),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Define => "define",
            Self::Property => "property",
            Self::Event => "event",
            Self::Variable => "variable",
            Self::Typedef => "typedef",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Signal => "signal",
            Self::Prototype => "prototype",
            Self::Friend => "friend",
            Self::Dcop => "dcop",
            Self::Slot => "slot",
            Self::Interface => "interface",
            Self::Service => "service",
        }
    }
}

/// `memberdef` attributes that are plain yes/no flags without their own field.
const MEMBER_FLAGS: &[&str] = &[
    "extern",
    "local",
    "nodiscard",
    "consteval",
    "constinit",
    "readable",
    "writable",
    "initonly",
    "settable",
    "privatesettable",
    "protectedsettable",
    "gettable",
    "privategettable",
    "protectedgettable",
    "final",
    "sealed",
    "new",
    "add",
    "remove",
    "raise",
    "optional",
    "required",
    "attribute",
    "property",
    "readonly",
    "bound",
    "removable",
    "constrained",
    "transient",
    "maybevoid",
    "maybedefault",
    "maybeambiguous",
];

const MEMBER_ATTRIBUTES: &[&str] = &[
    "kind",
    "id",
    "prot",
    "static",
    "strong",
    "const",
    "explicit",
    "inline",
    "refqual",
    "virt",
    "volatile",
    "mutable",
    "noexcept",
    "noexceptexpression",
    "constexpr",
    "accessor",
];

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDef {
    pub kind: MemberKind,
    pub id: String,
    pub prot: Protection,
    pub is_static: bool,
    pub is_const: bool,
    pub is_explicit: bool,
    pub is_inline: bool,
    pub is_volatile: bool,
    pub is_mutable: bool,
    pub is_constexpr: bool,
    pub is_noexcept: bool,
    /// Strongly typed enum (`enum class`).
    pub is_strong: bool,
    pub virt: Virtualness,
    /// `lvalue` or `rvalue`.
    pub refqual: Option<String>,
    pub accessor: Option<String>,
    /// Names of the remaining flags set to `yes`, in attribute order.
    pub flags: Vec<String>,

    pub template_params: Option<TemplateParamList>,
    pub type_: Option<LinkedText>,
    pub definition: Option<String>,
    pub argsstring: Option<String>,
    pub name: String,
    pub qualified_name: Option<String>,
    pub read: Option<String>,
    pub write: Option<String>,
    pub bitfield: Option<String>,
    pub reimplements: Vec<Reimplement>,
    pub reimplemented_by: Vec<Reimplement>,
    pub qualifiers: Vec<String>,
    pub params: Vec<Param>,
    pub enum_values: Vec<EnumValue>,
    pub requires_clause: Option<LinkedText>,
    pub initializer: Option<LinkedText>,
    pub exceptions: Option<LinkedText>,
    pub brief: Option<Description>,
    pub detailed: Option<Description>,
    pub inbody: Option<Description>,
    pub location: Location,
    pub references: Vec<Reference>,
    pub referenced_by: Vec<Reference>,
}

impl MemberDef {
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f == name)
    }

    /// Any non-empty brief, detailed or in-body description.
    pub fn is_documented(&self) -> bool {
        [&self.brief, &self.detailed, &self.inbody]
            .into_iter()
            .flatten()
            .any(|d| !d.is_empty())
    }
}

impl FromXml for MemberDef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        let allowed: Vec<&str> = MEMBER_ATTRIBUTES.iter().chain(MEMBER_FLAGS).copied().collect();
        el.expect_attributes(&allowed)?;

        let mut flags = Vec::new();
        for flag in MEMBER_FLAGS {
            if el.opt_attribute_bool(flag)? {
                flags.push(flag.to_string());
            }
        }

        let mut template_params = None;
        let mut type_ = None;
        let mut definition = None;
        let mut argsstring = None;
        let mut name = None;
        let mut qualified_name = None;
        let mut read = None;
        let mut write = None;
        let mut bitfield = None;
        let mut reimplements = Vec::new();
        let mut reimplemented_by = Vec::new();
        let mut qualifiers = Vec::new();
        let mut params = Vec::new();
        let mut enum_values = Vec::new();
        let mut requires_clause = None;
        let mut initializer = None;
        let mut exceptions = None;
        let mut brief = None;
        let mut detailed = None;
        let mut inbody = None;
        let mut location = None;
        let mut references = Vec::new();
        let mut referenced_by = Vec::new();

        for child in el.child_elements()? {
            match child.name() {
                "templateparamlist" => {
                    set_once(&mut template_params, TemplateParamList::from_xml(child)?, &el, &child)?
                }
                "type" => set_once(&mut type_, LinkedText::from_xml(child)?, &el, &child)?,
                "definition" => set_once(&mut definition, child.inner_text()?, &el, &child)?,
                "argsstring" => set_once(&mut argsstring, child.inner_text()?, &el, &child)?,
                "name" => set_once(&mut name, child.inner_text()?, &el, &child)?,
                "qualifiedname" => set_once(&mut qualified_name, child.inner_text()?, &el, &child)?,
                "read" => set_once(&mut read, child.inner_text()?, &el, &child)?,
                "write" => set_once(&mut write, child.inner_text()?, &el, &child)?,
                "bitfield" => set_once(&mut bitfield, child.inner_text()?, &el, &child)?,
                "reimplements" => reimplements.push(Reimplement::from_xml(child)?),
                "reimplementedby" => reimplemented_by.push(Reimplement::from_xml(child)?),
                "qualifier" => qualifiers.push(child.inner_text()?),
                "param" => params.push(Param::from_xml(child)?),
                "enumvalue" => enum_values.push(EnumValue::from_xml(child)?),
                "requiresclause" => {
                    set_once(&mut requires_clause, LinkedText::from_xml(child)?, &el, &child)?
                }
                "initializer" => set_once(&mut initializer, LinkedText::from_xml(child)?, &el, &child)?,
                "exceptions" => set_once(&mut exceptions, LinkedText::from_xml(child)?, &el, &child)?,
                "briefdescription" => set_once(&mut brief, Description::from_xml(child)?, &el, &child)?,
                "detaileddescription" => {
                    set_once(&mut detailed, Description::from_xml(child)?, &el, &child)?
                }
                "inbodydescription" => set_once(&mut inbody, Description::from_xml(child)?, &el, &child)?,
                "location" => set_once(&mut location, Location::from_xml(child)?, &el, &child)?,
                "references" => references.push(Reference::from_xml(child)?),
                "referencedby" => referenced_by.push(Reference::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }

        Ok(Self {
            kind: MemberKind::parse(&el)?,
            id: el.attribute_string("id")?,
            prot: Protection::parse(&el, "prot")?,
            is_static: el.opt_attribute_bool("static")?,
            is_const: el.opt_attribute_bool("const")?,
            is_explicit: el.opt_attribute_bool("explicit")?,
            is_inline: el.opt_attribute_bool("inline")?,
            is_volatile: el.opt_attribute_bool("volatile")?,
            is_mutable: el.opt_attribute_bool("mutable")?,
            is_constexpr: el.opt_attribute_bool("constexpr")?,
            is_noexcept: el.opt_attribute_bool("noexcept")?,
            is_strong: el.opt_attribute_bool("strong")?,
            virt: Virtualness::parse(&el, "virt")?,
            refqual: el.opt_attribute_string("refqual"),
            accessor: el.opt_attribute_string("accessor"),
            flags,
            template_params,
            type_,
            definition,
            argsstring,
            name: required(name, &el, "name")?,
            qualified_name,
            read,
            write,
            bitfield,
            reimplements,
            reimplemented_by,
            qualifiers,
            params,
            enum_values,
            requires_clause,
            initializer,
            exceptions,
            brief,
            detailed,
            inbody,
            location: required(location, &el, "location")?,
            references,
            referenced_by,
        })
    }
}

/// `templateparamlist`, a list of `param`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateParamList {
    pub params: Vec<Param>,
}

impl FromXml for TemplateParamList {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let children = el.child_elements()?;
        if let Some(bad) = children.iter().find(|c| c.name() != "param") {
            return Err(el.unexpected_element(bad));
        }
        Ok(Self {
            params: parse_all(&children)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Param {
    pub attributes: Option<String>,
    pub type_: Option<LinkedText>,
    pub declname: Option<String>,
    pub defname: Option<String>,
    pub array: Option<String>,
    pub defval: Option<LinkedText>,
    pub type_constraint: Option<LinkedText>,
    pub brief: Option<Description>,
}

impl Param {
    /// `declname`, falling back to `defname`.
    pub fn name(&self) -> Option<&str> {
        self.declname.as_deref().or(self.defname.as_deref())
    }
}

impl FromXml for Param {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut param = Self::default();
        for child in el.child_elements()? {
            match child.name() {
                "attributes" => set_once(&mut param.attributes, child.inner_text()?, &el, &child)?,
                "type" => set_once(&mut param.type_, LinkedText::from_xml(child)?, &el, &child)?,
                "declname" => set_once(&mut param.declname, child.inner_text()?, &el, &child)?,
                "defname" => set_once(&mut param.defname, child.inner_text()?, &el, &child)?,
                "array" => set_once(&mut param.array, child.inner_text()?, &el, &child)?,
                "defval" => set_once(&mut param.defval, LinkedText::from_xml(child)?, &el, &child)?,
                "typeconstraint" => {
                    set_once(&mut param.type_constraint, LinkedText::from_xml(child)?, &el, &child)?
                }
                "briefdescription" => {
                    set_once(&mut param.brief, Description::from_xml(child)?, &el, &child)?
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(param)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub id: String,
    pub prot: Protection,
    pub name: String,
    pub initializer: Option<LinkedText>,
    pub brief: Option<Description>,
    pub detailed: Option<Description>,
}

impl FromXml for EnumValue {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["id", "prot"])?;
        let mut name = None;
        let mut initializer = None;
        let mut brief = None;
        let mut detailed = None;
        for child in el.child_elements()? {
            match child.name() {
                "name" => set_once(&mut name, child.inner_text()?, &el, &child)?,
                "initializer" => set_once(&mut initializer, LinkedText::from_xml(child)?, &el, &child)?,
                "briefdescription" => set_once(&mut brief, Description::from_xml(child)?, &el, &child)?,
                "detaileddescription" => {
                    set_once(&mut detailed, Description::from_xml(child)?, &el, &child)?
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            id: el.attribute_string("id")?,
            prot: Protection::parse(&el, "prot")?,
            name: required(name, &el, "name")?,
            initializer,
            brief,
            detailed,
        })
    }
}

/// Source position of a declaration and its body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub decl_file: Option<String>,
    pub decl_line: Option<u32>,
    pub decl_column: Option<u32>,
    pub body_file: Option<String>,
    pub body_start: Option<i64>,
    pub body_end: Option<i64>,
}

impl FromXml for Location {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[
            "file",
            "line",
            "column",
            "declfile",
            "declline",
            "declcolumn",
            "bodyfile",
            "bodystart",
            "bodyend",
        ])?;
        if let Some(child) = el.child_elements()?.first() {
            return Err(el.unexpected_element(child));
        }
        Ok(Self {
            file: el.attribute_string("file")?,
            line: el.opt_attribute_number("line")?,
            column: el.opt_attribute_number("column")?,
            decl_file: el.opt_attribute_string("declfile"),
            decl_line: el.opt_attribute_number("declline")?,
            decl_column: el.opt_attribute_number("declcolumn")?,
            body_file: el.opt_attribute_string("bodyfile"),
            // bodyend is -1 for declarations without a body.
            body_start: el.opt_attribute_number("bodystart")?,
            body_end: el.opt_attribute_number("bodyend")?,
        })
    }
}

/// `reimplements` / `reimplementedby`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reimplement {
    pub refid: String,
    pub text: String,
}

impl FromXml for Reimplement {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid"])?;
        Ok(Self {
            refid: el.attribute_string("refid")?,
            text: el.inner_text()?,
        })
    }
}

/// `references` / `referencedby`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub refid: String,
    pub compoundref: Option<String>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    pub text: String,
}

impl FromXml for Reference {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "compoundref", "startline", "endline"])?;
        Ok(Self {
            refid: el.attribute_string("refid")?,
            compoundref: el.opt_attribute_string("compoundref"),
            start_line: el.opt_attribute_number("startline")?,
            end_line: el.opt_attribute_number("endline")?,
            text: el.inner_text()?,
        })
    }
}

/// `sectiondef` kinds and their default headings.
const SECTION_TITLES: &[(&str, &str)] = &[
    ("user-defined", "User Defined"),
    ("public-type", "Public Member Types"),
    ("public-func", "Public Member Functions"),
    ("public-attrib", "Public Attributes"),
    ("public-slot", "Public Slots"),
    ("signal", "Signals"),
    ("dcop-func", "DCOP Functions"),
    ("property", "Properties"),
    ("event", "Events"),
    ("public-static-func", "Public Static Functions"),
    ("public-static-attrib", "Public Static Attributes"),
    ("protected-type", "Protected Member Types"),
    ("protected-func", "Protected Member Functions"),
    ("protected-attrib", "Protected Attributes"),
    ("protected-slot", "Protected Slots"),
    ("protected-static-func", "Protected Static Functions"),
    ("protected-static-attrib", "Protected Static Attributes"),
    ("package-type", "Package Types"),
    ("package-func", "Package Functions"),
    ("package-attrib", "Package Attributes"),
    ("package-static-func", "Package Static Functions"),
    ("package-static-attrib", "Package Static Attributes"),
    ("private-type", "Private Member Types"),
    ("private-func", "Private Member Functions"),
    ("private-attrib", "Private Attributes"),
    ("private-slot", "Private Slots"),
    ("private-static-func", "Private Static Functions"),
    ("private-static-attrib", "Private Static Attributes"),
    ("friend", "Friends"),
    ("related", "Related Functions"),
    ("define", "Macro Definitions"),
    ("prototype", "Prototypes"),
    ("typedef", "Typedefs"),
    ("enum", "Enumerations"),
    ("func", "Functions"),
    ("var", "Variables"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Known(&'static str),
    Other(String),
}

impl SectionKind {
    fn from_value(value: &str) -> Self {
        match SECTION_TITLES.iter().find(|(k, _)| *k == value) {
            Some((k, _)) => Self::Known(*k),
            None => Self::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(k) => k,
            Self::Other(s) => s,
        }
    }

    /// Default heading; `None` for unknown kinds.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::Known(k) => SECTION_TITLES.iter().find(|(n, _)| n == k).map(|(_, t)| *t),
            Self::Other(_) => None,
        }
    }
}

/// `member` entry of a reference-style section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMember {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

impl FromXml for SectionMember {
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

/// The two alternatives of a section's member list.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionMembers {
    Empty,
    Definitions(Vec<MemberDef>),
    References(Vec<SectionMember>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionDef {
    pub kind: SectionKind,
    pub header: Option<String>,
    pub description: Option<Description>,
    pub members: SectionMembers,
}

impl SectionDef {
    pub fn definitions(&self) -> &[MemberDef] {
        match &self.members {
            SectionMembers::Definitions(defs) => defs,
            _ => &[],
        }
    }
}

impl FromXml for SectionDef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["kind"])?;
        let mut header = None;
        let mut description = None;
        let mut members = SectionMembers::Empty;
        for child in el.child_elements()? {
            match child.name() {
                "header" => set_once(&mut header, child.inner_text()?, &el, &child)?,
                "description" => set_once(&mut description, Description::from_xml(child)?, &el, &child)?,
                "memberdef" => {
                    let def = MemberDef::from_xml(child)?;
                    match &mut members {
                        SectionMembers::Empty => members = SectionMembers::Definitions(vec![def]),
                        SectionMembers::Definitions(defs) => defs.push(def),
                        SectionMembers::References(_) => {
                            return Err(choice_conflict(&el, &child, "member"))
                        }
                    }
                }
                "member" => {
                    let member = SectionMember::from_xml(child)?;
                    match &mut members {
                        SectionMembers::Empty => members = SectionMembers::References(vec![member]),
                        SectionMembers::References(refs) => refs.push(member),
                        SectionMembers::Definitions(_) => {
                            return Err(choice_conflict(&el, &child, "memberdef"))
                        }
                    }
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            kind: SectionKind::from_value(el.attribute_str("kind")?),
            header,
            description,
            members,
        })
    }
}

fn choice_conflict(el: &Element<'_, '_>, child: &Element<'_, '_>, started: &'static str) -> ParseError {
    ParseError::ChoiceConflict {
        element: el.name().to_string(),
        started,
        found: child.name().to_string(),
        position: child.position(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    fn parse<T: FromXml>(xml: &str) -> Result<T, ParseError> {
        let doc = parse_document(xml).unwrap();
        T::from_xml(Element::new(doc.root_element()))
    }

    const FUNCTION: &str = r#"<memberdef kind="function" id="classns_1_1_widget_1a1" prot="public" static="no" const="yes" virt="virtual" nodiscard="yes">
  <type>int</type>
  <definition>int ns::Widget::size</definition>
  <argsstring>() const</argsstring>
  <name>size</name>
  <qualifiedname>ns::Widget::size</qualifiedname>
  <briefdescription><para>Number of items.</para></briefdescription>
  <detaileddescription/>
  <inbodydescription/>
  <location file="widget.h" line="12" column="7" bodyfile="widget.h" bodystart="12" bodyend="-1"/>
</memberdef>"#;

    #[test]
    fn parses_function_member() {
        let m: MemberDef = parse(FUNCTION).unwrap();
        assert_eq!(m.kind, MemberKind::Function);
        assert_eq!(m.name, "size");
        assert!(m.is_const);
        assert!(!m.is_static);
        assert_eq!(m.virt, Virtualness::Virtual);
        assert!(m.has_flag("nodiscard"));
        assert_eq!(m.location.line, Some(12));
        assert_eq!(m.location.body_end, Some(-1));
        assert!(m.is_documented());
    }

    #[test]
    fn member_requires_name_and_location() {
        let err = parse::<MemberDef>(r#"<memberdef kind="variable" id="v" prot="public" static="no"><name>x</name></memberdef>"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingElement { child: "location", .. }));
    }

    #[test]
    fn member_kind_is_strict() {
        let err = parse::<MemberDef>(r#"<memberdef kind="gadget" id="v"><name>x</name><location file="a.h"/></memberdef>"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { ref attribute, .. } if attribute == "kind"));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = parse::<MemberDef>(
            r#"<memberdef kind="variable" id="v"><name>x</name><name>y</name><location file="a.h"/></memberdef>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateElement { .. }));
    }

    #[test]
    fn enum_values() {
        let m: MemberDef = parse(
            r#"<memberdef kind="enum" id="e" prot="public" static="no" strong="yes"><name>Color</name>
<enumvalue id="e_1red" prot="public"><name>red</name><initializer>= 1</initializer></enumvalue>
<location file="a.h"/></memberdef>"#,
        )
        .unwrap();
        assert!(m.is_strong);
        assert_eq!(m.enum_values[0].name, "red");
        assert_eq!(m.enum_values[0].initializer.as_ref().unwrap().plain_text(), "= 1");
    }

    #[test]
    fn sectiondef_with_definitions() {
        let xml = format!(r#"<sectiondef kind="public-func">{FUNCTION}</sectiondef>"#);
        let s: SectionDef = parse(&xml).unwrap();
        assert_eq!(s.kind.title(), Some("Public Member Functions"));
        assert_eq!(s.definitions().len(), 1);
    }

    #[test]
    fn sectiondef_rejects_mixed_alternatives() {
        let xml = format!(
            r#"<sectiondef kind="public-func">{FUNCTION}<member refid="r" kind="function"><name>f</name></member></sectiondef>"#
        );
        let err = parse::<SectionDef>(&xml).unwrap_err();
        assert!(matches!(err, ParseError::ChoiceConflict { started: "memberdef", .. }));
    }

    #[test]
    fn sectiondef_unknown_kind_is_kept() {
        let s: SectionDef = parse(r#"<sectiondef kind="shiny"/>"#).unwrap();
        assert_eq!(s.kind, SectionKind::Other("shiny".to_string()));
        assert_eq!(s.kind.title(), None);
        assert_eq!(s.members, SectionMembers::Empty);
    }

    #[test]
    fn template_params() {
        let t: TemplateParamList = parse(
            "<templateparamlist><param><type>typename</type><declname>T</declname><defval>int</defval></param></templateparamlist>",
        )
        .unwrap();
        assert_eq!(t.params[0].name(), Some("T"));
        assert_eq!(t.params[0].defval.as_ref().unwrap().plain_text(), "int");
    }
}
