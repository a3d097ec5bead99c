//! Compound pages.

use super::description::render_listing;
use super::member::{location_lines, section_index, template_line};
use super::text::TextMarkup;
use super::{
    create_markup, push_block, Markup, OutputFormat, RenderContext, RenderLines, RenderText, TableCell,
    TODO_PLACEHOLDER,
};
use crate::collection::{CollectionKind, CompoundNode};
use crate::diagnostics::Diagnostics;
use crate::error::LinkError;
use crate::hierarchy::Collections;
use crate::model::{CompoundDef, CompoundKind, InnerRef, Protection, TocSect};
use crate::options::Options;
use crate::permalink::{member_anchor, Resolver};

/// One rendered compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub kind: CollectionKind,
    pub title: String,
    /// Path below the base URL, without extension.
    pub permalink: String,
    /// Brief description as plain text, for front-matter and sidebars.
    pub brief: String,
    pub lines: Vec<String>,
}

impl Page {
    pub fn content(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Renders compound pages in one output format.
pub struct Renderer<'a> {
    collections: &'a Collections,
    resolver: &'a Resolver,
    options: &'a Options,
    diagnostics: &'a Diagnostics,
    markup: Box<dyn Markup>,
}

impl<'a> Renderer<'a> {
    pub fn new(
        collections: &'a Collections,
        resolver: &'a Resolver,
        options: &'a Options,
        format: OutputFormat,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            collections,
            resolver,
            options,
            diagnostics,
            markup: create_markup(format),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.markup.format()
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(self.markup.as_ref(), self.resolver, self.options, self.diagnostics)
    }

    /// Render every compound, collection by collection.
    pub fn render_all(&self) -> Vec<Page> {
        self.collections
            .iter()
            .map(|(kind, node)| self.render_node(kind, node))
            .collect()
    }

    pub fn render_compound(&self, kind: CollectionKind, id: &str) -> Result<Page, LinkError> {
        let node = self.collections.get(kind).get(id)?;
        Ok(self.render_node(kind, node))
    }

    pub fn render_node(&self, kind: CollectionKind, node: &CompoundNode) -> Page {
        let cx = self.context();
        let def = &node.def;
        let m = cx.markup;
        let mut lines = Vec::new();

        push_block(&mut lines, def.brief.render_lines(&cx));
        push_block(&mut lines, self.declaration_block(def, &cx));
        push_block(&mut lines, self.inheritance(node, &cx));

        for (title, refs) in [
            ("Namespaces", &def.inner_namespaces),
            ("Classes", &def.inner_classes),
            ("Concepts", &def.inner_concepts),
            ("Modules", &def.inner_modules),
            ("Files", &def.inner_files),
            ("Folders", &def.inner_dirs),
            ("Topics", &def.inner_groups),
            ("Pages", &def.inner_pages),
        ] {
            push_block(&mut lines, self.inner_table(title, refs, &cx));
        }

        for section in &def.sections {
            push_block(&mut lines, section_index(section, &cx));
        }

        let detailed = def.detailed.as_ref().filter(|d| !d.is_empty());
        match detailed {
            Some(detailed) if kind == CollectionKind::Pages => {
                push_block(&mut lines, detailed.render_lines(&cx.with_heading_offset(1)));
            }
            Some(detailed) => {
                push_block(&mut lines, m.heading(2, "Description", None));
                push_block(&mut lines, detailed.render_lines(&cx.with_heading_offset(2)));
            }
            None if !def.is_documented() && self.options.suggest_to_do_descriptions => {
                push_block(&mut lines, m.paragraph(&cx.text(TODO_PLACEHOLDER)));
            }
            None => {}
        }

        if let Some(toc) = &def.table_of_contents {
            if !toc.sections.is_empty() {
                push_block(&mut lines, m.heading(2, "Contents", None));
                push_block(&mut lines, toc_list(&toc.sections, &cx));
            }
        }

        let members: Vec<_> = def.sections.iter().flat_map(|s| s.definitions()).collect();
        if !members.is_empty() {
            push_block(&mut lines, m.heading(2, "Member Documentation", None));
            for member in members {
                push_block(&mut lines, member.render_lines(&cx));
            }
        }

        if kind == CollectionKind::Files && self.options.render_program_listing {
            if let Some(listing) = &def.program_listing {
                push_block(&mut lines, m.heading(2, "Source", None));
                push_block(&mut lines, render_listing(listing, &cx));
            }
        }

        if let Some(location) = &def.location {
            if kind != CollectionKind::Files && kind != CollectionKind::Folders {
                push_block(&mut lines, location_lines("Declared at", location, &cx));
            }
        }

        Page {
            id: node.id().to_string(),
            kind,
            title: node.title().to_string(),
            permalink: node.permalink.clone(),
            brief: self.plain_brief(def),
            lines,
        }
    }

    /// The brief as one line of plain text. Rendered as code so unresolved
    /// references do not warn a second time.
    fn plain_brief(&self, def: &CompoundDef) -> String {
        let Some(brief) = &def.brief else {
            return String::new();
        };
        let cx = RenderContext::new(&TextMarkup, self.resolver, self.options, self.diagnostics).code();
        brief.render_text(&cx).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Template header, `#include` lines and the `class Name` line.
    fn declaration_block(&self, def: &CompoundDef, cx: &RenderContext<'_>) -> Vec<String> {
        let code = cx.code();
        let mut block = Vec::new();
        if def.kind != CompoundKind::File {
            for include in &def.includes {
                let (open, close) = if include.local { ("\"", "\"") } else { ("<", ">") };
                block.push(format!("#include {}", code.text(&format!("{open}{}{close}", include.text))));
            }
        }
        if def.kind.is_class_like() {
            if let Some(params) = &def.template_params {
                block.push(template_line(params, &code));
            }
            let mut line = format!("{} {}", def.kind.as_str(), code.text(&def.compound_name));
            if def.is_final {
                line.push_str(" final");
            }
            block.push(line);
        }
        if block.is_empty() {
            return Vec::new();
        }
        cx.markup.code_block(
            Some(def.language.as_deref().map(language_name).unwrap_or("cpp")),
            &block,
        )
    }

    fn inheritance(&self, node: &CompoundNode, cx: &RenderContext<'_>) -> Vec<String> {
        let m = cx.markup;
        let mut lines = Vec::new();
        for (title, refs) in [
            ("Inherits from", &node.def.base_compounds),
            ("Inherited by", &node.def.derived_compounds),
        ] {
            if refs.is_empty() {
                continue;
            }
            let links: Vec<String> = refs
                .iter()
                .map(|r| {
                    let label = cx.text(&r.text);
                    let link = match &r.refid {
                        Some(id) => cx.compound_link(id, label),
                        None => label,
                    };
                    match r.prot {
                        Protection::Public => link,
                        other => format!("{link} ({})", other.as_str()),
                    }
                })
                .collect();
            push_block(&mut lines, m.labelled(title, m.paragraph(&links.join(", "))));
        }
        lines
    }

    fn inner_table(&self, title: &str, refs: &[InnerRef], cx: &RenderContext<'_>) -> Vec<String> {
        if refs.is_empty() {
            return Vec::new();
        }
        let m = cx.markup;
        let mut rows = vec![vec![TableCell::header("Name"), TableCell::header("Description")]];
        for inner in refs {
            let found = self.collections.find(&inner.refid).map(|(_, n)| n);
            let name = found
                .map(|n| n.local_name.as_str())
                .filter(|n| !n.is_empty())
                .unwrap_or(&inner.text);
            // The child's own page reports its unresolved references.
            let brief = found
                .and_then(|n| n.def.brief.as_ref())
                .map(|b| b.render_text(&cx.quiet()))
                .unwrap_or_default();
            rows.push(vec![
                TableCell::new(cx.compound_link(&inner.refid, cx.text(name))),
                TableCell::new(brief),
            ]);
        }
        let mut lines = m.heading(2, title, None);
        push_block(&mut lines, m.table(&rows, None));
        lines
    }
}

/// Code block language for a compound's `language` attribute.
fn language_name(language: &str) -> &str {
    match language {
        "C++" | "C" => "cpp",
        "Python" => "python",
        "Java" => "java",
        "C#" => "csharp",
        "JavaScript" => "javascript",
        other => other,
    }
}

fn toc_list(sections: &[TocSect], cx: &RenderContext<'_>) -> Vec<String> {
    let items = sections
        .iter()
        .map(|s| {
            let label = cx.markup.link(&cx.text(&s.name), &format!("#{}", member_anchor(&s.reference)));
            let mut item = vec![label];
            item.extend(toc_list(&s.children, cx));
            item
        })
        .collect();
    cx.markup.list(false, None, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_str, DoxygenFile};

    fn collections(files: &[&str]) -> (Collections, Resolver) {
        let defs = files
            .iter()
            .flat_map(|body| {
                let xml = format!(r#"<doxygen version="1.9.8">{body}</doxygen>"#);
                parse_str::<DoxygenFile>(&xml, "doxygen").unwrap().compounds
            })
            .collect();
        let mut collections = Collections::build(defs, &Diagnostics::default()).unwrap();
        let resolver = Resolver::assign(&mut collections);
        (collections, resolver)
    }

    fn render(files: &[&str], options: &Options, kind: CollectionKind, id: &str) -> Page {
        let (collections, resolver) = collections(files);
        let diagnostics = Diagnostics::default();
        Renderer::new(&collections, &resolver, options, OutputFormat::Markdown, &diagnostics)
            .render_compound(kind, id)
            .unwrap()
    }

    const BASE: &str = r#"<compounddef id="classbase" kind="class">
      <compoundname>Base</compoundname>
      <derivedcompoundref refid="classwidget" prot="protected" virt="non-virtual">Widget</derivedcompoundref>
    </compounddef>"#;

    const WIDGET: &str = r#"<compounddef id="classwidget" kind="class" language="C++">
      <compoundname>Widget</compoundname>
      <basecompoundref refid="classbase" prot="public" virt="non-virtual">Base</basecompoundref>
      <sectiondef kind="public-func">
        <memberdef kind="function" id="classwidget_1a1" prot="public" static="no">
          <type>int</type>
          <name>size</name>
          <briefdescription><para>Number of items.</para></briefdescription>
          <location file="widget.h" line="12"/>
        </memberdef>
      </sectiondef>
      <briefdescription><para>A widget.</para></briefdescription>
      <detaileddescription><para>Longer text.</para></detaileddescription>
      <location file="widget.h" line="3"/>
    </compounddef>"#;

    #[test]
    fn class_page_layout() {
        let page = render(&[BASE, WIDGET], &Options::default(), CollectionKind::Classes, "classwidget");
        assert_eq!(page.title, "Widget");
        assert_eq!(page.permalink, "classes/widget");
        assert_eq!(page.brief, "A widget.");
        assert_eq!(page.lines[..5], ["A widget.", "", "```cpp", "class Widget", "```"]);

        let position = |line: &str| {
            page.lines
                .iter()
                .position(|l| l == line)
                .unwrap_or_else(|| panic!("missing {line:?} in {:#?}", page.lines))
        };
        let order = [
            "**Inherits from**",
            "[Base](/api/classes/base)",
            "## Public Member Functions",
            "| [<code>size</code>](#a1) | Number of items. |",
            "## Description",
            "Longer text.",
            "## Member Documentation",
            "### size() {#a1}",
            "Defined at <code>widget.h:12</code>",
            "Declared at <code>widget.h:3</code>",
        ];
        let positions: Vec<usize> = order.iter().map(|&l| position(l)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn non_public_derivation_is_marked() {
        let page = render(&[BASE, WIDGET], &Options::default(), CollectionKind::Classes, "classbase");
        assert!(page.lines.iter().any(|l| l == "[Widget](/api/classes/widget) (protected)"));
    }

    #[test]
    fn undocumented_compound_gets_placeholder() {
        let bare = r#"<compounddef id="namespacebare" kind="namespace"><compoundname>bare</compoundname></compounddef>"#;
        let options = Options {
            suggest_to_do_descriptions: true,
            ..Options::default()
        };
        let page = render(&[bare], &options, CollectionKind::Namespaces, "namespacebare");
        assert_eq!(page.lines, [TODO_PLACEHOLDER]);
        let page = render(&[bare], &Options::default(), CollectionKind::Namespaces, "namespacebare");
        assert!(page.lines.is_empty());
    }

    #[test]
    fn namespace_lists_inner_classes_by_local_name() {
        let ns = r#"<compounddef id="namespacens" kind="namespace">
          <compoundname>ns</compoundname>
          <innerclass refid="classns_1_1_item" prot="public">ns::Item</innerclass>
        </compounddef>"#;
        let item = r#"<compounddef id="classns_1_1_item" kind="struct">
          <compoundname>ns::Item</compoundname>
          <briefdescription><para>One entry.</para></briefdescription>
        </compounddef>"#;
        let page = render(&[ns, item], &Options::default(), CollectionKind::Namespaces, "namespacens");
        assert_eq!(
            page.lines,
            [
                "## Classes",
                "",
                "| Name | Description |",
                "| --- | --- |",
                "| [Item](/api/classes/ns/item) | One entry. |",
            ]
        );
    }

    #[test]
    fn page_toc_links_to_sections() {
        let intro = r#"<compounddef id="intro" kind="page">
          <compoundname>intro</compoundname>
          <title>Introduction</title>
          <tableofcontents>
            <tocsect><name>Setup</name><reference>intro_1setup</reference></tocsect>
          </tableofcontents>
          <detaileddescription>
            <sect1 id="intro_1setup"><title>Setup</title><para>Install it.</para></sect1>
          </detaileddescription>
        </compounddef>"#;
        let page = render(&[intro], &Options::default(), CollectionKind::Pages, "intro");
        assert_eq!(page.title, "Introduction");
        assert_eq!(
            page.lines,
            ["## Setup {#setup}", "", "Install it.", "", "## Contents", "", "- [Setup](#setup)"]
        );
    }

    #[test]
    fn class_contents_precede_member_documentation() {
        let widget = r#"<compounddef id="classwidget" kind="class">
          <compoundname>Widget</compoundname>
          <sectiondef kind="public-func">
            <memberdef kind="function" id="classwidget_1a1" prot="public" static="no">
              <type>int</type>
              <name>size</name>
              <briefdescription><para>Number of items.</para></briefdescription>
            </memberdef>
          </sectiondef>
          <tableofcontents>
            <tocsect><name>Usage</name><reference>classwidget_1usage</reference></tocsect>
          </tableofcontents>
          <briefdescription><para>A widget.</para></briefdescription>
        </compounddef>"#;
        let page = render(&[widget], &Options::default(), CollectionKind::Classes, "classwidget");
        let position = |line: &str| page.lines.iter().position(|l| l == line).unwrap();
        assert!(position("- [Usage](#usage)") < position("## Member Documentation"));
    }
}
