//! Wiring compounds into per-collection trees.
//!
//! [`Collections::build`] runs in fixed passes: dispatch, same-kind edges,
//! cross-kind edges, cycle check, local names, depth. Any broken link stops
//! the build with a [`LinkError`].

use crate::collection::{Collection, CollectionKind, CompoundNode};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::LinkError;
use crate::model::{CompoundDef, InnerRef};
use std::collections::HashSet;
use tracing::{debug, info};

/// The six compound collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Collections {
    pub classes: Collection,
    pub namespaces: Collection,
    pub groups: Collection,
    pub files: Collection,
    pub folders: Collection,
    pub pages: Collection,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            classes: Collection::new(CollectionKind::Classes),
            namespaces: Collection::new(CollectionKind::Namespaces),
            groups: Collection::new(CollectionKind::Groups),
            files: Collection::new(CollectionKind::Files),
            folders: Collection::new(CollectionKind::Folders),
            pages: Collection::new(CollectionKind::Pages),
        }
    }
}

/// One edge listed by `owner` in `element`.
struct Edge {
    owner: String,
    element: String,
    child: String,
}

impl Collections {
    pub fn build(defs: Vec<CompoundDef>, diagnostics: &Diagnostics) -> Result<Self, LinkError> {
        let mut collections = Self::default();
        for def in defs {
            match CollectionKind::for_compound(def.kind) {
                Some(kind) => collections.get_mut(kind).add(def)?,
                None => diagnostics.note(
                    DiagnosticKind::SkippedCompound,
                    format!("skipping {} '{}' ({})", def.kind.as_str(), def.compound_name, def.id),
                ),
            }
        }

        for kind in CollectionKind::ALL {
            collections.link_same_kind(kind)?;
        }
        collections.link_files_to_folders()?;
        collections.check_cross_references()?;
        collections.link_inheritance()?;
        for kind in CollectionKind::ALL {
            collections.get(kind).check_cycles()?;
        }
        for kind in CollectionKind::ALL {
            collections.assign_local_names(kind)?;
            collections.assign_depths(kind);
        }

        info!(
            classes = collections.classes.len(),
            namespaces = collections.namespaces.len(),
            groups = collections.groups.len(),
            files = collections.files.len(),
            folders = collections.folders.len(),
            pages = collections.pages.len(),
            "collections built"
        );
        Ok(collections)
    }

    pub fn get(&self, kind: CollectionKind) -> &Collection {
        match kind {
            CollectionKind::Classes => &self.classes,
            CollectionKind::Namespaces => &self.namespaces,
            CollectionKind::Groups => &self.groups,
            CollectionKind::Files => &self.files,
            CollectionKind::Folders => &self.folders,
            CollectionKind::Pages => &self.pages,
        }
    }

    pub fn get_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        match kind {
            CollectionKind::Classes => &mut self.classes,
            CollectionKind::Namespaces => &mut self.namespaces,
            CollectionKind::Groups => &mut self.groups,
            CollectionKind::Files => &mut self.files,
            CollectionKind::Folders => &mut self.folders,
            CollectionKind::Pages => &mut self.pages,
        }
    }

    /// Look a compound up in every collection.
    pub fn find(&self, id: &str) -> Option<(CollectionKind, &CompoundNode)> {
        CollectionKind::ALL
            .into_iter()
            .find_map(|kind| self.get(kind).find(id).map(|node| (kind, node)))
    }

    /// Every collected compound, collection by collection.
    pub fn iter(&self) -> impl Iterator<Item = (CollectionKind, &CompoundNode)> {
        CollectionKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |node| (kind, node)))
    }

    pub fn len(&self) -> usize {
        CollectionKind::ALL.iter().map(|k| self.get(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ancestors of `id` in its collection, nearest first.
    pub fn ancestors(&self, kind: CollectionKind, id: &str) -> Vec<&CompoundNode> {
        let collection = self.get(kind);
        let mut chain = Vec::new();
        let mut current = collection.find(id).and_then(|n| n.parent_id.as_deref());
        while let Some(parent_id) = current {
            match collection.find(parent_id) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent.parent_id.as_deref();
                }
                None => break,
            }
            if chain.len() > collection.len() {
                break;
            }
        }
        chain
    }

    fn link_same_kind(&mut self, kind: CollectionKind) -> Result<(), LinkError> {
        let edges = edges(self.get(kind), |def| own_kind_children(kind, def));
        let collection = self.get_mut(kind);
        for edge in edges {
            if !collection.contains(&edge.child) {
                return Err(dangling(&edge, kind));
            }
            let child = collection.get_mut(&edge.child)?;
            match &child.parent_id {
                Some(existing) if *existing == edge.owner => continue,
                Some(existing) => {
                    return Err(LinkError::MultipleParents {
                        id: edge.child.clone(),
                        first: existing.clone(),
                        second: edge.owner.clone(),
                    })
                }
                None => child.parent_id = Some(edge.owner.clone()),
            }
            collection.get_mut(&edge.owner)?.child_ids.push(edge.child);
        }
        debug!(collection = kind.bucket(), "linked same-kind children");
        Ok(())
    }

    fn link_files_to_folders(&mut self) -> Result<(), LinkError> {
        let edges = edges(&self.folders, |def| def.inner_files.as_slice());
        for edge in edges {
            if !self.files.contains(&edge.child) {
                return Err(dangling(&edge, CollectionKind::Files));
            }
            let file = self.files.get_mut(&edge.child)?;
            match &file.folder_id {
                Some(existing) if *existing == edge.owner => {}
                Some(existing) => {
                    return Err(LinkError::MultipleParents {
                        id: edge.child.clone(),
                        first: existing.clone(),
                        second: edge.owner.clone(),
                    })
                }
                None => file.folder_id = Some(edge.owner.clone()),
            }
        }
        Ok(())
    }

    /// Inner lists that point into another collection must resolve there.
    fn check_cross_references(&self) -> Result<(), LinkError> {
        use CollectionKind::*;
        let checks: [(CollectionKind, CollectionKind, fn(&CompoundDef) -> &[InnerRef]); 8] = [
            (Namespaces, Classes, |d| d.inner_classes.as_slice()),
            (Files, Classes, |d| d.inner_classes.as_slice()),
            (Groups, Classes, |d| d.inner_classes.as_slice()),
            (Files, Namespaces, |d| d.inner_namespaces.as_slice()),
            (Groups, Namespaces, |d| d.inner_namespaces.as_slice()),
            (Groups, Files, |d| d.inner_files.as_slice()),
            (Groups, Folders, |d| d.inner_dirs.as_slice()),
            (Groups, Pages, |d| d.inner_pages.as_slice()),
        ];
        for (owner_kind, target_kind, list) in checks {
            let target = self.get(target_kind);
            for edge in edges(self.get(owner_kind), list) {
                if !target.contains(&edge.child) {
                    return Err(dangling(&edge, target_kind));
                }
            }
        }
        Ok(())
    }

    fn link_inheritance(&mut self) -> Result<(), LinkError> {
        let mut links = Vec::new();
        for node in self.classes.iter() {
            let bases = node.def.base_compounds.iter().map(|r| ("basecompoundref", r));
            let derived = node.def.derived_compounds.iter().map(|r| ("derivedcompoundref", r));
            for (element, compound_ref) in bases.chain(derived) {
                let Some(refid) = &compound_ref.refid else {
                    continue;
                };
                if !self.classes.contains(refid) {
                    return Err(LinkError::DanglingReference {
                        owner: node.id().to_string(),
                        element: element.to_string(),
                        refid: refid.clone(),
                        collection: CollectionKind::Classes.noun(),
                    });
                }
                links.push((node.id().to_string(), element, refid.clone()));
            }
        }
        for (owner, element, refid) in links {
            let node = self.classes.get_mut(&owner)?;
            if element == "basecompoundref" {
                node.base_ids.push(refid);
            } else {
                node.derived_ids.push(refid);
            }
        }
        Ok(())
    }

    fn assign_local_names(&mut self, kind: CollectionKind) -> Result<(), LinkError> {
        let mut names = Vec::with_capacity(self.get(kind).len());
        for node in self.get(kind).iter() {
            let parent = match &node.parent_id {
                Some(id) => Some(self.get(kind).get(id)?),
                None => None,
            };
            names.push((node.id().to_string(), local_name(kind, node, parent)?));
        }
        let collection = self.get_mut(kind);
        for (id, name) in names {
            collection.get_mut(&id)?.local_name = name;
        }
        Ok(())
    }

    fn assign_depths(&mut self, kind: CollectionKind) {
        let depths: Vec<(String, usize)> = self
            .get(kind)
            .iter()
            .map(|n| (n.id().to_string(), self.ancestors(kind, n.id()).len()))
            .collect();
        for (node, (_, depth)) in self.get_mut(kind).iter_mut().zip(depths) {
            node.depth = depth;
        }
    }
}

impl Collection {
    fn check_cycles(&self) -> Result<(), LinkError> {
        let mut acyclic: HashSet<&str> = HashSet::new();
        for node in self.iter() {
            let mut path: HashSet<&str> = HashSet::new();
            let mut current = Some(node);
            while let Some(n) = current {
                if acyclic.contains(n.id()) {
                    break;
                }
                if !path.insert(n.id()) {
                    return Err(LinkError::Cycle { id: n.id().to_string() });
                }
                current = n.parent_id.as_deref().and_then(|p| self.find(p));
            }
            acyclic.extend(path);
        }
        Ok(())
    }
}

fn own_kind_children(kind: CollectionKind, def: &CompoundDef) -> &[InnerRef] {
    match kind {
        CollectionKind::Classes => &def.inner_classes,
        CollectionKind::Namespaces => &def.inner_namespaces,
        CollectionKind::Groups => &def.inner_groups,
        CollectionKind::Folders => &def.inner_dirs,
        CollectionKind::Pages => &def.inner_pages,
        CollectionKind::Files => &[],
    }
}

fn edges<'a>(collection: &'a Collection, list: impl Fn(&'a CompoundDef) -> &'a [InnerRef]) -> Vec<Edge> {
    collection
        .iter()
        .flat_map(|node| {
            list(&node.def).iter().map(move |inner| Edge {
                owner: node.id().to_string(),
                element: inner.element_name.clone(),
                child: inner.refid.clone(),
            })
        })
        .collect()
}

fn dangling(edge: &Edge, target: CollectionKind) -> LinkError {
    LinkError::DanglingReference {
        owner: edge.owner.clone(),
        element: edge.element.clone(),
        refid: edge.child.clone(),
        collection: target.noun(),
    }
}

fn local_name(
    kind: CollectionKind,
    node: &CompoundNode,
    parent: Option<&CompoundNode>,
) -> Result<String, LinkError> {
    let name = node.name();
    let strip = |separator: &'static str| -> Result<String, LinkError> {
        match parent {
            None => Ok(name.to_string()),
            Some(parent) => name
                .strip_prefix(parent.name())
                .and_then(|rest| rest.strip_prefix(separator))
                .map(str::to_string)
                .ok_or_else(|| LinkError::NameMismatch {
                    id: node.id().to_string(),
                    name: name.to_string(),
                    parent_id: parent.id().to_string(),
                    parent_name: parent.name().to_string(),
                    separator,
                }),
        }
    };
    match kind {
        CollectionKind::Namespaces => strip("::"),
        CollectionKind::Folders => strip("/"),
        CollectionKind::Classes if parent.is_some() => strip("::"),
        CollectionKind::Classes => Ok(split_scoped_name(name)
            .last()
            .map(|s| s.to_string())
            .unwrap_or_else(|| name.to_string())),
        CollectionKind::Groups | CollectionKind::Pages => Ok(node.title().to_string()),
        CollectionKind::Files => Ok(name.rsplit('/').next().unwrap_or(name).to_string()),
    }
}

/// Split a C++ qualified name on `::`, ignoring separators inside `<>`.
///
/// `ns::Map<std::string, int>::Entry` → `["ns", "Map<std::string, int>", "Entry"]`.
pub fn split_scoped_name(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&name[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&name[start..]);
    segments.retain(|s| !s.is_empty());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::test_def;
    use crate::model::{CompoundKind, CompoundRef, Protection, Virtualness};

    fn inner(element: &str, refid: &str) -> InnerRef {
        InnerRef {
            element_name: element.to_string(),
            refid: refid.to_string(),
            prot: Protection::Public,
            text: String::new(),
        }
    }

    fn build(defs: Vec<CompoundDef>) -> Result<Collections, LinkError> {
        Collections::build(defs, &Diagnostics::default())
    }

    #[test]
    fn split_respects_templates() {
        assert_eq!(
            split_scoped_name("ns::Map<std::string, int>::Entry"),
            ["ns", "Map<std::string, int>", "Entry"]
        );
        assert_eq!(split_scoped_name("Widget"), ["Widget"]);
        assert_eq!(split_scoped_name("::Global"), ["Global"]);
    }

    #[test]
    fn namespaces_nest_and_strip_prefix() {
        let mut ns = test_def("namespacens", CompoundKind::Namespace, "ns");
        ns.inner_namespaces.push(inner("innernamespace", "namespacens_1_1detail"));
        let detail = test_def("namespacens_1_1detail", CompoundKind::Namespace, "ns::detail");
        let c = build(vec![ns, detail]).unwrap();
        let detail = c.namespaces.get("namespacens_1_1detail").unwrap();
        assert_eq!(detail.parent_id.as_deref(), Some("namespacens"));
        assert_eq!(detail.local_name, "detail");
        assert_eq!(detail.depth, 1);
        assert_eq!(c.namespaces.get("namespacens").unwrap().child_ids, ["namespacens_1_1detail"]);
        assert_eq!(c.namespaces.top_level().count(), 1);
    }

    #[test]
    fn namespace_prefix_mismatch_is_fatal() {
        let mut ns = test_def("namespacens", CompoundKind::Namespace, "ns");
        ns.inner_namespaces.push(inner("innernamespace", "namespaceother"));
        let other = test_def("namespaceother", CompoundKind::Namespace, "other::detail");
        let err = build(vec![ns, other]).unwrap_err();
        assert!(matches!(err, LinkError::NameMismatch { ref id, separator: "::", .. } if id == "namespaceother"));
    }

    #[test]
    fn dangling_group_member_names_both_ids() {
        let mut group = test_def("group__core", CompoundKind::Group, "core");
        group.inner_classes.push(inner("innerclass", "classmissing"));
        let err = build(vec![group]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("group__core"));
        assert!(message.contains("classmissing"));
    }

    #[test]
    fn second_parent_is_fatal() {
        let mut a = test_def("dir_a", CompoundKind::Dir, "a");
        let mut b = test_def("dir_b", CompoundKind::Dir, "b");
        a.inner_dirs.push(inner("innerdir", "dir_c"));
        b.inner_dirs.push(inner("innerdir", "dir_c"));
        let c = test_def("dir_c", CompoundKind::Dir, "a/c");
        assert!(matches!(build(vec![a, b, c]).unwrap_err(), LinkError::MultipleParents { .. }));
    }

    #[test]
    fn cycle_is_detected() {
        let mut a = test_def("page_a", CompoundKind::Page, "a");
        let mut b = test_def("page_b", CompoundKind::Page, "b");
        a.inner_pages.push(inner("innerpage", "page_b"));
        b.inner_pages.push(inner("innerpage", "page_a"));
        assert!(matches!(build(vec![a, b]).unwrap_err(), LinkError::Cycle { .. }));
    }

    #[test]
    fn files_attach_to_folders() {
        let mut src = test_def("dir_src", CompoundKind::Dir, "src");
        let mut util = test_def("dir_util", CompoundKind::Dir, "src/util");
        src.inner_dirs.push(inner("innerdir", "dir_util"));
        util.inner_files.push(inner("innerfile", "strings_8h"));
        let file = test_def("strings_8h", CompoundKind::File, "strings.h");
        let c = build(vec![src, util, file]).unwrap();
        assert_eq!(c.folders.get("dir_util").unwrap().local_name, "util");
        assert_eq!(c.files.get("strings_8h").unwrap().folder_id.as_deref(), Some("dir_util"));
        assert_eq!(c.files.get("strings_8h").unwrap().local_name, "strings.h");
    }

    #[test]
    fn classes_take_last_segment_and_record_bases() {
        let base = test_def("classns_1_1_base", CompoundKind::Class, "ns::Base");
        let mut widget = test_def("classns_1_1_widget", CompoundKind::Class, "ns::Widget");
        widget.base_compounds.push(CompoundRef {
            refid: Some("classns_1_1_base".to_string()),
            prot: Protection::Public,
            virt: Virtualness::NonVirtual,
            text: "ns::Base".to_string(),
        });
        widget.inner_classes.push(inner("innerclass", "classns_1_1_widget_1_1_part"));
        let part = test_def("classns_1_1_widget_1_1_part", CompoundKind::Struct, "ns::Widget::Part");
        let c = build(vec![base, widget, part]).unwrap();
        let widget = c.classes.get("classns_1_1_widget").unwrap();
        assert_eq!(widget.local_name, "Widget");
        assert_eq!(widget.base_ids, ["classns_1_1_base"]);
        assert_eq!(c.classes.get("classns_1_1_widget_1_1_part").unwrap().local_name, "Part");
    }

    #[test]
    fn unresolved_base_is_fatal() {
        let mut widget = test_def("classw", CompoundKind::Class, "W");
        widget.base_compounds.push(CompoundRef {
            refid: Some("classnowhere".to_string()),
            prot: Protection::Public,
            virt: Virtualness::NonVirtual,
            text: "Nowhere".to_string(),
        });
        assert!(matches!(build(vec![widget]).unwrap_err(), LinkError::DanglingReference { .. }));
    }

    #[test]
    fn skipped_kinds_are_noted() {
        let diagnostics = Diagnostics::default();
        let c = Collections::build(
            vec![test_def("example_8cpp-example", CompoundKind::Example, "example.cpp")],
            &diagnostics,
        )
        .unwrap();
        assert!(c.is_empty());
        assert_eq!(diagnostics.count(DiagnosticKind::SkippedCompound), 1);
    }
}
