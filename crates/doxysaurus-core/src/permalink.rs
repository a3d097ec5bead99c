//! Permalinks for compounds, and resolution of `refid`s to links.

use crate::collection::{CollectionKind, CompoundNode};
use crate::hierarchy::{split_scoped_name, Collections};
use crate::model::RefKind;
use crate::options::Options;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// A resolved link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    /// Path below the base URL, e.g. `classes/ns/widget`.
    pub path: String,
    pub anchor: Option<String>,
}

impl Permalink {
    pub fn url(&self, options: &Options) -> String {
        let mut url = options.url(&self.path);
        if let Some(anchor) = &self.anchor {
            url.push('#');
            url.push_str(anchor);
        }
        url
    }
}

/// Lower-case, collapse non-alphanumeric runs to `-`, trim `-`.
/// `Foo<int>` becomes `foo-int`.
pub fn sanitize_segment(segment: &str) -> String {
    let lower = segment.to_lowercase();
    NON_ALNUM.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// Sanitize a qualified name segment by segment. Segments that sanitize
/// to nothing are dropped.
pub fn sanitize_path(name: &str, separator: &str) -> String {
    let segments: Vec<&str> = if separator == "::" {
        split_scoped_name(name)
    } else {
        name.split(separator).collect()
    };
    segments
        .into_iter()
        .map(sanitize_segment)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Anchor of a member refid: the part after the last `_1`.
pub fn member_anchor(refid: &str) -> &str {
    refid.rsplit_once("_1").map_or(refid, |(_, anchor)| anchor)
}

/// Maps compound ids to their permalinks and member ids to their owners.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    compounds: HashMap<String, String>,
    members: HashMap<String, String>,
}

impl Resolver {
    /// Compute and store the permalink of every compound, then index members.
    pub fn assign(collections: &mut Collections) -> Self {
        let mut resolver = Self::default();
        let mut taken: HashSet<String> = HashSet::new();

        for kind in CollectionKind::ALL {
            let view: &Collections = collections;
            let paths: Vec<(String, String)> = view
                .get(kind)
                .iter()
                .map(|node| {
                    let path = unique(base_path(view, kind, node), &mut taken);
                    (node.id().to_string(), path)
                })
                .collect();
            for (node, (_, path)) in collections.get_mut(kind).iter_mut().zip(&paths) {
                node.permalink = path.clone();
            }
            for (id, path) in paths {
                resolver.compounds.insert(id, path);
            }
        }

        for (_, node) in collections.iter() {
            for section in &node.def.sections {
                for member in section.definitions() {
                    resolver.index_member(&member.id, node.id());
                    for value in &member.enum_values {
                        resolver.index_member(&value.id, node.id());
                    }
                }
            }
        }
        debug!(
            compounds = resolver.compounds.len(),
            members = resolver.members.len(),
            "permalinks assigned"
        );
        resolver
    }

    /// First owner wins unless a later owner is the one encoded in the refid.
    fn index_member(&mut self, refid: &str, owner: &str) {
        let encoded = refid
            .strip_prefix(owner)
            .is_some_and(|rest| rest.starts_with("_1"));
        if encoded || !self.members.contains_key(refid) {
            self.members.insert(refid.to_string(), owner.to_string());
        }
    }

    pub fn compound_path(&self, id: &str) -> Option<&str> {
        self.compounds.get(id).map(String::as_str)
    }

    /// Compound that documents a member.
    pub fn member_owner<'a>(&'a self, refid: &'a str) -> Option<&'a str> {
        if let Some(owner) = self.members.get(refid) {
            return Some(owner.as_str());
        }
        let (owner, _) = refid.rsplit_once("_1")?;
        self.compounds.contains_key(owner).then_some(owner)
    }

    pub fn permalink(&self, refid: &str, kindref: RefKind) -> Option<Permalink> {
        match kindref {
            RefKind::Compound => Some(Permalink {
                path: self.compound_path(refid)?.to_string(),
                anchor: None,
            }),
            RefKind::Member => {
                let owner = self.member_owner(refid)?;
                Some(Permalink {
                    path: self.compound_path(owner)?.to_string(),
                    anchor: Some(member_anchor(refid).to_string()),
                })
            }
        }
    }
}

fn base_path(collections: &Collections, kind: CollectionKind, node: &CompoundNode) -> String {
    let relative = match kind {
        CollectionKind::Classes | CollectionKind::Namespaces => sanitize_path(node.name(), "::"),
        CollectionKind::Folders => sanitize_path(node.name(), "/"),
        CollectionKind::Files => {
            let file = sanitize_segment(node.name().rsplit('/').next().unwrap_or(node.name()));
            let folder = node
                .folder_id
                .as_deref()
                .and_then(|id| collections.folders.find(id))
                .map(|folder| sanitize_path(folder.name(), "/"))
                .unwrap_or_default();
            [folder, file]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/")
        }
        CollectionKind::Groups | CollectionKind::Pages => sanitize_path(node.name(), "/"),
    };
    let relative = if relative.is_empty() {
        sanitize_segment(node.id())
    } else {
        relative
    };
    format!("{}/{}", kind.bucket(), relative)
}

/// `path`, or `path-2`, `path-3`, … if already taken.
fn unique(path: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(path.clone()) {
        return path;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{path}-{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
