//! Compound collections keyed by id, in discovery order.

use crate::error::LinkError;
use crate::model::{CompoundDef, CompoundKind};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKind {
    Classes,
    Namespaces,
    Groups,
    Files,
    Folders,
    Pages,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 6] = [
        Self::Classes,
        Self::Namespaces,
        Self::Groups,
        Self::Files,
        Self::Folders,
        Self::Pages,
    ];

    /// The collection a compound kind belongs to, if any.
    pub fn for_compound(kind: CompoundKind) -> Option<Self> {
        match kind {
            CompoundKind::Namespace => Some(Self::Namespaces),
            CompoundKind::Group => Some(Self::Groups),
            CompoundKind::File => Some(Self::Files),
            CompoundKind::Dir => Some(Self::Folders),
            CompoundKind::Page => Some(Self::Pages),
            k if k.is_class_like() => Some(Self::Classes),
            _ => None,
        }
    }

    /// Singular noun used in error messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Classes => "class",
            Self::Namespaces => "namespace",
            Self::Groups => "group",
            Self::Files => "file",
            Self::Folders => "folder",
            Self::Pages => "page",
        }
    }

    /// First permalink segment.
    pub fn bucket(&self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Namespaces => "namespaces",
            Self::Groups => "groups",
            Self::Files => "files",
            Self::Folders => "folders",
            Self::Pages => "pages",
        }
    }
}

/// A collected compound together with everything derived from its links.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundNode {
    pub def: CompoundDef,
    /// Parent of the same collection; set at most once.
    pub parent_id: Option<String>,
    /// Children of the same collection, in the parent's listing order.
    pub child_ids: Vec<String>,
    /// Containing folder, for files.
    pub folder_id: Option<String>,
    pub base_ids: Vec<String>,
    pub derived_ids: Vec<String>,
    /// Name relative to the parent.
    pub local_name: String,
    /// Number of ancestors.
    pub depth: usize,
    /// Path below the base URL, without extension.
    pub permalink: String,
}

impl CompoundNode {
    pub fn new(def: CompoundDef) -> Self {
        Self {
            def,
            parent_id: None,
            child_ids: Vec::new(),
            folder_id: None,
            base_ids: Vec::new(),
            derived_ids: Vec::new(),
            local_name: String::new(),
            depth: 0,
            permalink: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn name(&self) -> &str {
        &self.def.compound_name
    }

    /// Page title: the explicit title if any, else the compound name.
    pub fn title(&self) -> &str {
        self.def
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.def.compound_name)
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    kind: CollectionKind,
    nodes: IndexMap<String, CompoundNode>,
}

impl Collection {
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            nodes: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn add(&mut self, def: CompoundDef) -> Result<(), LinkError> {
        if self.nodes.contains_key(&def.id) {
            return Err(LinkError::DuplicateId {
                collection: self.kind.noun(),
                id: def.id,
            });
        }
        self.nodes.insert(def.id.clone(), CompoundNode::new(def));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&CompoundNode, LinkError> {
        self.nodes.get(id).ok_or_else(|| self.not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut CompoundNode, LinkError> {
        let kind = self.kind;
        self.nodes.get_mut(id).ok_or_else(|| LinkError::NotFound {
            collection: kind.noun(),
            id: id.to_string(),
        })
    }

    pub fn find(&self, id: &str) -> Option<&CompoundNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompoundNode> {
        self.nodes.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CompoundNode> {
        self.nodes.values_mut()
    }

    /// Nodes without a parent, in discovery order.
    pub fn top_level(&self) -> impl Iterator<Item = &CompoundNode> {
        self.iter().filter(|n| n.is_top_level())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn not_found(&self, id: &str) -> LinkError {
        LinkError::NotFound {
            collection: self.kind.noun(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_def(id: &str, kind: CompoundKind, name: &str) -> CompoundDef {
    CompoundDef {
        id: id.to_string(),
        kind,
        language: None,
        prot: Default::default(),
        is_final: false,
        is_inline: false,
        is_sealed: false,
        is_abstract: false,
        compound_name: name.to_string(),
        title: None,
        base_compounds: Vec::new(),
        derived_compounds: Vec::new(),
        includes: Vec::new(),
        included_by: Vec::new(),
        include_graph: None,
        included_by_graph: None,
        inner_dirs: Vec::new(),
        inner_files: Vec::new(),
        inner_classes: Vec::new(),
        inner_concepts: Vec::new(),
        inner_modules: Vec::new(),
        inner_namespaces: Vec::new(),
        inner_pages: Vec::new(),
        inner_groups: Vec::new(),
        qualifiers: Vec::new(),
        template_params: None,
        sections: Vec::new(),
        table_of_contents: None,
        requires_clause: None,
        initializer: None,
        brief: None,
        detailed: None,
        exports: Vec::new(),
        inheritance_graph: None,
        collaboration_graph: None,
        program_listing: None,
        location: None,
        list_of_all_members: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let mut classes = Collection::new(CollectionKind::Classes);
        classes.add(test_def("a", CompoundKind::Class, "A")).unwrap();
        classes.add(test_def("b", CompoundKind::Struct, "B")).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.get("b").unwrap().name(), "B");
        let ids: Vec<&str> = classes.iter().map(|n| n.id()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut classes = Collection::new(CollectionKind::Classes);
        classes.add(test_def("a", CompoundKind::Class, "A")).unwrap();
        let err = classes.add(test_def("a", CompoundKind::Class, "A2")).unwrap_err();
        assert_eq!(
            err,
            LinkError::DuplicateId {
                collection: "class",
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn missing_id_is_not_found() {
        let pages = Collection::new(CollectionKind::Pages);
        assert!(matches!(pages.get("nope"), Err(LinkError::NotFound { collection: "page", .. })));
    }

    #[test]
    fn dispatch_by_kind() {
        assert_eq!(
            CollectionKind::for_compound(CompoundKind::Exception),
            Some(CollectionKind::Classes)
        );
        assert_eq!(
            CollectionKind::for_compound(CompoundKind::Dir),
            Some(CollectionKind::Folders)
        );
        assert_eq!(CollectionKind::for_compound(CompoundKind::Example), None);
        assert_eq!(CollectionKind::for_compound(CompoundKind::Concept), None);
        assert_eq!(CollectionKind::for_compound(CompoundKind::Module), None);
    }

    #[test]
    fn title_falls_back_to_name() {
        let mut def = test_def("g", CompoundKind::Group, "core");
        assert_eq!(CompoundNode::new(def.clone()).title(), "core");
        def.title = Some("Core API".to_string());
        assert_eq!(CompoundNode::new(def).title(), "Core API");
    }
}
