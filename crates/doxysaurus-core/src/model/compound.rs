//! `<doxygen>` compound files and the `compounddef` family.

use super::description::{Description, ProgramListing};
use super::linked_text::LinkedText;
use super::member::{Location, SectionDef, TemplateParamList};
use super::{FromXml, Protection, Virtualness};
use crate::error::ParseError;
use crate::xml::{required, set_once, Element};

/// Root of every `<refid>.xml` file.
#[derive(Debug, Clone, PartialEq)]
pub struct DoxygenFile {
    pub version: String,
    pub lang: Option<String>,
    pub compounds: Vec<CompoundDef>,
}

impl FromXml for DoxygenFile {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["version", "lang", "noNamespaceSchemaLocation"])?;
        let mut compounds = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "compounddef" => compounds.push(CompoundDef::from_xml(child)?),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Class,
    Struct,
    Union,
    Interface,
    Protocol,
    Category,
    Exception,
    Service,
    Singleton,
    Module,
    Type,
    File,
    Namespace,
    Group,
    Page,
    Example,
    Dir,
    Concept,
}

impl CompoundKind {
    pub fn from_name(value: &str) -> Option<Self> {
        Some(match value {
            "class" => Self::Class,
            "struct" => Self::Struct,
            "union" => Self::Union,
            "interface" => Self::Interface,
            "protocol" => Self::Protocol,
            "category" => Self::Category,
            "exception" => Self::Exception,
            "service" => Self::Service,
            "singleton" => Self::Singleton,
            "module" => Self::Module,
            "type" => Self::Type,
            "file" => Self::File,
            "namespace" => Self::Namespace,
            "group" => Self::Group,
            "page" => Self::Page,
            "example" => Self::Example,
            "dir" => Self::Dir,
            "concept" => Self::Concept,
            _ => return None,
        })
    }

    pub(crate) fn parse(el: &Element<'_, '_>, attr: &str) -> Result<Self, ParseError> {
        let value = el.attribute_str(attr)?;
        Self::from_name(value).ok_or_else(|| el.invalid_attribute(attr, value, "a compound kind"))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Interface => "interface",
            Self::Protocol => "protocol",
            Self::Category => "category",
            Self::Exception => "exception",
            Self::Service => "service",
            Self::Singleton => "singleton",
            Self::Module => "module",
            Self::Type => "type",
            Self::File => "file",
            Self::Namespace => "namespace",
            Self::Group => "group",
            Self::Page => "page",
            Self::Example => "example",
            Self::Dir => "dir",
            Self::Concept => "concept",
        }
    }

    /// Kinds that belong in the classes collection.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Union
                | Self::Interface
                | Self::Protocol
                | Self::Category
                | Self::Exception
                | Self::Service
                | Self::Singleton
                | Self::Type
        )
    }
}

/// `basecompoundref` / `derivedcompoundref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRef {
    pub refid: Option<String>,
    pub prot: Protection,
    pub virt: Virtualness,
    pub text: String,
}

impl FromXml for CompoundRef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "prot", "virt"])?;
        Ok(Self {
            refid: el.opt_attribute_string("refid"),
            prot: Protection::parse(&el, "prot")?,
            virt: Virtualness::parse(&el, "virt")?,
            text: el.inner_text()?,
        })
    }
}

/// `includes` / `includedby`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub refid: Option<String>,
    /// Quoted (`"x.h"`) rather than system (`<x.h>`) include.
    pub local: bool,
    pub text: String,
}

impl FromXml for Include {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "local"])?;
        Ok(Self {
            refid: el.opt_attribute_string("refid"),
            local: el.opt_attribute_bool("local")?,
            text: el.inner_text()?,
        })
    }
}

/// `innerclass`, `innernamespace`, `innerfile`, … entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerRef {
    pub element_name: String,
    pub refid: String,
    pub prot: Protection,
    pub text: String,
}

impl FromXml for InnerRef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "prot"])?;
        Ok(Self {
            element_name: el.name().to_string(),
            refid: el.attribute_string("refid")?,
            prot: Protection::parse(&el, "prot")?,
            text: el.inner_text()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphLink {
    pub refid: String,
    pub external: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphChild {
    pub refid: String,
    pub relation: String,
    pub edge_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub link: Option<GraphLink>,
    pub children: Vec<GraphChild>,
}

impl FromXml for GraphNode {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["id"])?;
        let mut label = None;
        let mut link = None;
        let mut children = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "label" => set_once(&mut label, child.inner_text()?, &el, &child)?,
                "link" => {
                    child.expect_attributes(&["refid", "external"])?;
                    let value = GraphLink {
                        refid: child.attribute_string("refid")?,
                        external: child.opt_attribute_string("external"),
                    };
                    set_once(&mut link, value, &el, &child)?;
                }
                "childnode" => {
                    child.expect_attributes(&["refid", "relation"])?;
                    let mut edge_labels = Vec::new();
                    for label in child.child_elements()? {
                        match label.name() {
                            "edgelabel" => edge_labels.push(label.inner_text()?),
                            _ => return Err(child.unexpected_element(&label)),
                        }
                    }
                    children.push(GraphChild {
                        refid: child.attribute_string("refid")?,
                        relation: child.attribute_string("relation")?,
                        edge_labels,
                    });
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            id: el.attribute_string("id")?,
            label: required(label, &el, "label")?,
            link,
            children,
        })
    }
}

/// Include, inheritance and collaboration graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub element_name: String,
    pub nodes: Vec<GraphNode>,
}

impl FromXml for Graph {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut nodes = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "node" => nodes.push(GraphNode::from_xml(child)?),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            element_name: el.name().to_string(),
            nodes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocSect {
    pub name: String,
    pub reference: String,
    pub children: Vec<TocSect>,
}

impl FromXml for TocSect {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut name = None;
        let mut reference = None;
        let mut children = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "name" => set_once(&mut name, child.inner_text()?, &el, &child)?,
                "reference" => set_once(&mut reference, child.inner_text()?, &el, &child)?,
                "tableofcontents" => children.extend(TableOfContents::from_xml(child)?.sections),
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            name: required(name, &el, "name")?,
            reference: required(reference, &el, "reference")?,
            children,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
    pub sections: Vec<TocSect>,
}

impl FromXml for TableOfContents {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&[])?;
        let mut sections = Vec::new();
        for child in el.child_elements()? {
            match child.name() {
                "tocsect" => sections.push(TocSect::from_xml(child)?),
                // Nested lists without an owning tocsect attach to the last one.
                "tableofcontents" => {
                    let nested = TableOfContents::from_xml(child)?.sections;
                    match sections.last_mut() {
                        Some(last) => last.children.extend(nested),
                        None => sections.extend(nested),
                    }
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self { sections })
    }
}

/// `listofallmembers/member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub refid: String,
    pub prot: Protection,
    pub virt: Virtualness,
    pub ambiguity_scope: Option<String>,
    pub scope: String,
    pub name: String,
}

impl FromXml for MemberRef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(&["refid", "prot", "virt", "ambiguityscope"])?;
        let mut scope = None;
        let mut name = None;
        for child in el.child_elements()? {
            match child.name() {
                "scope" => set_once(&mut scope, child.inner_text()?, &el, &child)?,
                "name" => set_once(&mut name, child.inner_text()?, &el, &child)?,
                _ => return Err(el.unexpected_element(&child)),
            }
        }
        Ok(Self {
            refid: el.attribute_string("refid")?,
            prot: Protection::parse(&el, "prot")?,
            virt: Virtualness::parse(&el, "virt")?,
            ambiguity_scope: el.opt_attribute_string("ambiguityscope"),
            scope: required(scope, &el, "scope")?,
            name: required(name, &el, "name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub refid: Option<String>,
    pub text: String,
}

/// One documented entity of kind [`CompoundKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundDef {
    pub id: String,
    pub kind: CompoundKind,
    pub language: Option<String>,
    pub prot: Protection,
    pub is_final: bool,
    pub is_inline: bool,
    pub is_sealed: bool,
    pub is_abstract: bool,

    pub compound_name: String,
    pub title: Option<String>,
    pub base_compounds: Vec<CompoundRef>,
    pub derived_compounds: Vec<CompoundRef>,
    pub includes: Vec<Include>,
    pub included_by: Vec<Include>,
    pub include_graph: Option<Graph>,
    pub included_by_graph: Option<Graph>,
    pub inner_dirs: Vec<InnerRef>,
    pub inner_files: Vec<InnerRef>,
    pub inner_classes: Vec<InnerRef>,
    pub inner_concepts: Vec<InnerRef>,
    pub inner_modules: Vec<InnerRef>,
    pub inner_namespaces: Vec<InnerRef>,
    pub inner_pages: Vec<InnerRef>,
    pub inner_groups: Vec<InnerRef>,
    pub qualifiers: Vec<String>,
    pub template_params: Option<TemplateParamList>,
    pub sections: Vec<SectionDef>,
    pub table_of_contents: Option<TableOfContents>,
    pub requires_clause: Option<LinkedText>,
    pub initializer: Option<LinkedText>,
    pub brief: Option<Description>,
    pub detailed: Option<Description>,
    pub exports: Vec<Export>,
    pub inheritance_graph: Option<Graph>,
    pub collaboration_graph: Option<Graph>,
    pub program_listing: Option<ProgramListing>,
    pub location: Option<Location>,
    pub list_of_all_members: Vec<MemberRef>,
}

impl CompoundDef {
    /// Any non-empty brief or detailed description.
    pub fn is_documented(&self) -> bool {
        [&self.brief, &self.detailed]
            .into_iter()
            .flatten()
            .any(|d| !d.is_empty())
    }
}

const COMPOUND_ATTRIBUTES: &[&str] = &[
    "id", "kind", "language", "prot", "final", "inline", "sealed", "abstract",
];

impl FromXml for CompoundDef {
    fn from_xml(el: Element<'_, '_>) -> Result<Self, ParseError> {
        el.expect_attributes(COMPOUND_ATTRIBUTES)?;

        let mut compound_name = None;
        let mut title = None;
        let mut base_compounds = Vec::new();
        let mut derived_compounds = Vec::new();
        let mut includes = Vec::new();
        let mut included_by = Vec::new();
        let mut include_graph = None;
        let mut included_by_graph = None;
        let mut inner_dirs = Vec::new();
        let mut inner_files = Vec::new();
        let mut inner_classes = Vec::new();
        let mut inner_concepts = Vec::new();
        let mut inner_modules = Vec::new();
        let mut inner_namespaces = Vec::new();
        let mut inner_pages = Vec::new();
        let mut inner_groups = Vec::new();
        let mut qualifiers = Vec::new();
        let mut template_params = None;
        let mut sections = Vec::new();
        let mut table_of_contents = None;
        let mut requires_clause = None;
        let mut initializer = None;
        let mut brief = None;
        let mut detailed = None;
        let mut exports = None;
        let mut inheritance_graph = None;
        let mut collaboration_graph = None;
        let mut program_listing = None;
        let mut location = None;
        let mut list_of_all_members = None;

        for child in el.child_elements()? {
            match child.name() {
                "compoundname" => set_once(&mut compound_name, child.inner_text()?, &el, &child)?,
                "title" => set_once(&mut title, child.inner_text()?, &el, &child)?,
                "basecompoundref" => base_compounds.push(CompoundRef::from_xml(child)?),
                "derivedcompoundref" => derived_compounds.push(CompoundRef::from_xml(child)?),
                "includes" => includes.push(Include::from_xml(child)?),
                "includedby" => included_by.push(Include::from_xml(child)?),
                "incdepgraph" => set_once(&mut include_graph, Graph::from_xml(child)?, &el, &child)?,
                "invincdepgraph" => {
                    set_once(&mut included_by_graph, Graph::from_xml(child)?, &el, &child)?
                }
                "innerdir" => inner_dirs.push(InnerRef::from_xml(child)?),
                "innerfile" => inner_files.push(InnerRef::from_xml(child)?),
                "innerclass" => inner_classes.push(InnerRef::from_xml(child)?),
                "innerconcept" => inner_concepts.push(InnerRef::from_xml(child)?),
                "innermodule" => inner_modules.push(InnerRef::from_xml(child)?),
                "innernamespace" => inner_namespaces.push(InnerRef::from_xml(child)?),
                "innerpage" => inner_pages.push(InnerRef::from_xml(child)?),
                "innergroup" => inner_groups.push(InnerRef::from_xml(child)?),
                "qualifier" => qualifiers.push(child.inner_text()?),
                "templateparamlist" => {
                    set_once(&mut template_params, TemplateParamList::from_xml(child)?, &el, &child)?
                }
                "sectiondef" => sections.push(SectionDef::from_xml(child)?),
                "tableofcontents" => {
                    set_once(&mut table_of_contents, TableOfContents::from_xml(child)?, &el, &child)?
                }
                "requiresclause" => {
                    set_once(&mut requires_clause, LinkedText::from_xml(child)?, &el, &child)?
                }
                "initializer" => set_once(&mut initializer, LinkedText::from_xml(child)?, &el, &child)?,
                "briefdescription" => set_once(&mut brief, Description::from_xml(child)?, &el, &child)?,
                "detaileddescription" => {
                    set_once(&mut detailed, Description::from_xml(child)?, &el, &child)?
                }
                "exports" => set_once(&mut exports, parse_exports(child)?, &el, &child)?,
                "inheritancegraph" => {
                    set_once(&mut inheritance_graph, Graph::from_xml(child)?, &el, &child)?
                }
                "collaborationgraph" => {
                    set_once(&mut collaboration_graph, Graph::from_xml(child)?, &el, &child)?
                }
                "programlisting" => {
                    set_once(&mut program_listing, ProgramListing::from_xml(child)?, &el, &child)?
                }
                "location" => set_once(&mut location, Location::from_xml(child)?, &el, &child)?,
                "listofallmembers" => {
                    set_once(&mut list_of_all_members, parse_member_refs(child)?, &el, &child)?
                }
                _ => return Err(el.unexpected_element(&child)),
            }
        }

        Ok(Self {
            id: el.attribute_string("id")?,
            kind: CompoundKind::parse(&el, "kind")?,
            language: el.opt_attribute_string("language"),
            prot: Protection::parse(&el, "prot")?,
            is_final: el.opt_attribute_bool("final")?,
            is_inline: el.opt_attribute_bool("inline")?,
            is_sealed: el.opt_attribute_bool("sealed")?,
            is_abstract: el.opt_attribute_bool("abstract")?,
            compound_name: required(compound_name, &el, "compoundname")?,
            title,
            base_compounds,
            derived_compounds,
            includes,
            included_by,
            include_graph,
            included_by_graph,
            inner_dirs,
            inner_files,
            inner_classes,
            inner_concepts,
            inner_modules,
            inner_namespaces,
            inner_pages,
            inner_groups,
            qualifiers,
            template_params,
            sections,
            table_of_contents,
            requires_clause,
            initializer,
            brief,
            detailed,
            exports: exports.unwrap_or_default(),
            inheritance_graph,
            collaboration_graph,
            program_listing,
            location,
            list_of_all_members: list_of_all_members.unwrap_or_default(),
        })
    }
}

fn parse_exports(el: Element<'_, '_>) -> Result<Vec<Export>, ParseError> {
    el.expect_attributes(&[])?;
    let mut exports = Vec::new();
    for child in el.child_elements()? {
        match child.name() {
            "export" => {
                child.expect_attributes(&["refid"])?;
                exports.push(Export {
                    refid: child.opt_attribute_string("refid"),
                    text: child.inner_text()?,
                });
            }
            _ => return Err(el.unexpected_element(&child)),
        }
    }
    Ok(exports)
}

fn parse_member_refs(el: Element<'_, '_>) -> Result<Vec<MemberRef>, ParseError> {
    el.expect_attributes(&[])?;
    let mut members = Vec::new();
    for child in el.child_elements()? {
        match child.name() {
            "member" => members.push(MemberRef::from_xml(child)?),
            _ => return Err(el.unexpected_element(&child)),
        }
    }
    Ok(members)
}
