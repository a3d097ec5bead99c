//! Navigation tree for the site sidebar.

use crate::collection::{Collection, CollectionKind, CompoundNode};
use crate::hierarchy::Collections;
use crate::options::Options;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub label: String,
    /// Absolute link; `None` for category headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

impl SidebarItem {
    fn category(label: &str, mut children: Vec<SidebarItem>) -> Option<Self> {
        if children.is_empty() {
            return None;
        }
        sort(&mut children);
        Some(Self {
            label: label.to_string(),
            permalink: None,
            children,
        })
    }
}

fn sort(items: &mut [SidebarItem]) {
    items.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()).then(a.label.cmp(&b.label)));
}

/// Sidebar with every collected compound.
pub fn build_sidebar(collections: &Collections, options: &Options) -> Vec<SidebarItem> {
    build_sidebar_filtered(collections, options, &|_: &CompoundNode| true)
}

/// Sidebar restricted to compounds accepted by `keep`. A rejected compound
/// takes its subtree with it.
pub fn build_sidebar_filtered(
    collections: &Collections,
    options: &Options,
    keep: &dyn Fn(&CompoundNode) -> bool,
) -> Vec<SidebarItem> {
    let tree = Tree {
        collections,
        options,
        keep,
    };
    [
        ("Topics", CollectionKind::Groups),
        ("Namespaces", CollectionKind::Namespaces),
        ("Classes", CollectionKind::Classes),
        ("Files", CollectionKind::Folders),
        ("Pages", CollectionKind::Pages),
    ]
    .into_iter()
    .filter_map(|(label, kind)| {
        let roots = match kind {
            CollectionKind::Folders => tree.file_roots(),
            kind => tree.roots(collections.get(kind)),
        };
        SidebarItem::category(label, roots)
    })
    .collect()
}

struct Tree<'a> {
    collections: &'a Collections,
    options: &'a Options,
    keep: &'a dyn Fn(&CompoundNode) -> bool,
}

impl Tree<'_> {
    fn roots(&self, collection: &Collection) -> Vec<SidebarItem> {
        collection
            .top_level()
            .filter(|n| (self.keep)(n))
            .map(|n| self.item(collection, n, n.name()))
            .collect()
    }

    fn item(&self, collection: &Collection, node: &CompoundNode, label: &str) -> SidebarItem {
        let mut children: Vec<SidebarItem> = node
            .child_ids
            .iter()
            .filter_map(|id| collection.find(id))
            .filter(|n| (self.keep)(n))
            .map(|n| self.item(collection, n, &n.local_name))
            .collect();
        if collection.kind() == CollectionKind::Folders {
            children.extend(self.files_in(node.id()));
        }
        sort(&mut children);
        let label = match collection.kind() {
            CollectionKind::Groups | CollectionKind::Pages => node.title(),
            _ if label.is_empty() => node.name(),
            _ => label,
        };
        self.leaf(node, label, children)
    }

    fn leaf(&self, node: &CompoundNode, label: &str, children: Vec<SidebarItem>) -> SidebarItem {
        SidebarItem {
            label: label.to_string(),
            permalink: Some(self.options.url(&node.permalink)),
            children,
        }
    }

    fn files_in(&self, folder_id: &str) -> Vec<SidebarItem> {
        self.collections
            .files
            .iter()
            .filter(|f| f.folder_id.as_deref() == Some(folder_id) && (self.keep)(f))
            .map(|f| self.leaf(f, &f.local_name, Vec::new()))
            .collect()
    }

    /// Top-level folders, then files that sit in no folder.
    fn file_roots(&self) -> Vec<SidebarItem> {
        let mut roots = self.roots(&self.collections.folders);
        roots.extend(
            self.collections
                .files
                .iter()
                .filter(|f| f.folder_id.is_none() && (self.keep)(f))
                .map(|f| self.leaf(f, &f.local_name, Vec::new())),
        );
        roots
    }
}
