//! Member declarations, per-section member indexes and member details.

use super::{inline, push_block, RenderContext, RenderLines, RenderText, TableCell, TODO_PLACEHOLDER};
use crate::model::{
    source_language, EnumValue, Location, MarkupStyle, MemberDef, MemberKind, Param, RefKind,
    Reimplement, SectionDef, SectionMembers, TemplateParamList, Virtualness,
};
use crate::permalink::member_anchor;

/// Join the non-empty parts with single spaces.
fn words<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter_map(|p| {
            let p = p.as_ref().trim();
            (!p.is_empty()).then(|| p.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `typename T = int`, with an optional array suffix.
fn param_text(param: &Param, cx: &RenderContext<'_>) -> String {
    let mut text = words([
        param.attributes.as_deref().map(|a| cx.text(a)).unwrap_or_default(),
        param.type_.render_text(cx),
        param.name().map(|n| cx.text(n)).unwrap_or_default(),
    ]);
    if let Some(array) = &param.array {
        text.push_str(&cx.text(array));
    }
    if let Some(default) = param.defval.as_ref().filter(|d| !d.is_empty()) {
        text.push_str(" = ");
        text.push_str(default.render_text(cx).trim());
    }
    text
}

/// `template <typename T, int N>`.
pub fn template_line(params: &TemplateParamList, cx: &RenderContext<'_>) -> String {
    let params: Vec<String> = params.params.iter().map(|p| param_text(p, cx)).collect();
    format!("template {}{}{}", cx.text("<"), params.join(", "), cx.text(">"))
}

/// Specifiers that the `type` element does not already carry.
fn specifiers(member: &MemberDef, type_text: &str) -> Vec<&'static str> {
    let mut out = Vec::new();
    let present = |word: &str| type_text.split_whitespace().any(|w| w == word);
    if member.is_static && !present("static") {
        out.push("static");
    }
    if member.is_explicit && !present("explicit") {
        out.push("explicit");
    }
    if member.is_constexpr && !present("constexpr") {
        out.push("constexpr");
    }
    if member.virt != Virtualness::NonVirtual && !present("virtual") {
        out.push("virtual");
    }
    out
}

/// Declaration lines of a member, rendered in code context.
pub fn declaration(member: &MemberDef, cx: &RenderContext<'_>) -> Vec<String> {
    let code = cx.code();
    let ty = member.type_.render_text(&code);
    let ty = ty.trim();
    let plain_type = member.type_.as_ref().map(|t| t.plain_text()).unwrap_or_default();
    let name = code.text(&member.name);
    let args = code.text(member.argsstring.as_deref().unwrap_or(""));
    let initializer = member.initializer.render_text(&code);

    let mut lines = Vec::new();
    if let Some(params) = &member.template_params {
        lines.push(template_line(params, &code));
    }
    let line = match member.kind {
        MemberKind::Function
        | MemberKind::Signal
        | MemberKind::Slot
        | MemberKind::Prototype
        | MemberKind::Dcop => {
            let mut parts: Vec<String> = specifiers(member, &plain_type).into_iter().map(String::from).collect();
            parts.push(ty.to_string());
            parts.push(format!("{name}{args}"));
            words(parts)
        }
        MemberKind::Friend => words(["friend", ty, format!("{name}{args}").as_str()]),
        MemberKind::Variable | MemberKind::Property | MemberKind::Event => {
            let mut parts: Vec<String> = specifiers(member, &plain_type).into_iter().map(String::from).collect();
            parts.push(ty.to_string());
            let mut declarator = format!("{name}{args}");
            if let Some(bits) = &member.bitfield {
                declarator.push_str(" : ");
                declarator.push_str(&code.text(bits));
            }
            parts.push(declarator);
            parts.push(initializer.clone());
            words(parts)
        }
        MemberKind::Typedef => {
            let is_alias = member.definition.as_deref().is_some_and(|d| d.trim_start().starts_with("using"));
            if is_alias {
                words(["using", name.as_str(), "=", ty])
            } else {
                words(["typedef", ty, format!("{name}{args}").as_str()])
            }
        }
        MemberKind::Enum => {
            let underlying = if ty.is_empty() { String::new() } else { format!(": {ty}") };
            let class = if member.is_strong { "class" } else { "" };
            words(["enum", class, name.as_str(), underlying.as_str()])
        }
        MemberKind::Define => {
            let params: Vec<String> = member
                .params
                .iter()
                .filter_map(|p| p.name().map(|n| code.text(n)))
                .collect();
            let head = if params.is_empty() {
                name.clone()
            } else {
                format!("{name}({})", params.join(", "))
            };
            words(["#define", head.as_str(), initializer.as_str()])
        }
        MemberKind::Interface | MemberKind::Service => words([member.kind.as_str(), name.as_str()]),
    };
    lines.push(line);
    lines
}

/// Heading text for a section: its explicit header, else the default for
/// its kind.
pub fn section_title(section: &SectionDef, cx: &RenderContext<'_>) -> String {
    if let Some(header) = section.header.as_deref().filter(|h| !h.trim().is_empty()) {
        return cx.text(header);
    }
    match section.kind.title() {
        Some(title) => cx.text(title),
        None => {
            let kind = section.kind.as_str();
            cx.unsupported("sectiondef kind", kind);
            cx.text(kind)
        }
    }
}

/// Quiet: the member details below repeat this brief.
fn brief_cell(member: &MemberDef, cx: &RenderContext<'_>) -> String {
    let brief = member.brief.render_text(&cx.quiet());
    if brief.is_empty() && cx.options.suggest_to_do_descriptions {
        return cx.text(TODO_PLACEHOLDER);
    }
    brief
}

/// Summary table of one section, linking to the member details.
pub fn section_index(section: &SectionDef, cx: &RenderContext<'_>) -> Vec<String> {
    let m = cx.markup;
    let mut rows = vec![vec![TableCell::header("Name"), TableCell::header("Description")]];
    match &section.members {
        SectionMembers::Empty => return Vec::new(),
        SectionMembers::Definitions(members) => {
            for member in members {
                let label = m.style(MarkupStyle::ComputerOutput, &cx.text(&member.name));
                rows.push(vec![
                    TableCell::new(m.link(&label, &format!("#{}", member_anchor(&member.id)))),
                    TableCell::new(brief_cell(member, cx)),
                ]);
            }
        }
        SectionMembers::References(members) => {
            for member in members {
                let label = m.style(MarkupStyle::ComputerOutput, &cx.text(&member.name));
                rows.push(vec![
                    TableCell::new(cx.reference(&member.refid, RefKind::Member, None, label)),
                    TableCell::new(String::new()),
                ]);
            }
        }
    }
    let mut lines = m.heading(2, &section_title(section, cx), None);
    push_block(&mut lines, section.description.render_lines(cx));
    push_block(&mut lines, m.table(&rows, None));
    lines
}

/// `Defined at file:line` style location note.
pub fn location_lines(prefix: &str, location: &Location, cx: &RenderContext<'_>) -> Vec<String> {
    if location.file.is_empty() {
        return Vec::new();
    }
    let position = match location.line {
        Some(line) => format!("{}:{line}", location.file),
        None => location.file.clone(),
    };
    let text = format!(
        "{} {}",
        cx.text(prefix),
        cx.markup.style(MarkupStyle::ComputerOutput, &cx.text(&position))
    );
    cx.markup.paragraph(&text)
}

fn enum_value_cell(value: &EnumValue, cx: &RenderContext<'_>) -> String {
    let m = cx.markup;
    let mut name = m.style(MarkupStyle::ComputerOutput, &cx.text(&value.name));
    if let Some(init) = value.initializer.as_ref().filter(|i| !i.is_empty()) {
        let init = init.render_text(&cx.code());
        name = format!("{name} {}", m.style(MarkupStyle::ComputerOutput, init.trim()));
    }
    format!("{}{name}", m.anchor(member_anchor(&value.id)))
}

fn enum_values_table(member: &MemberDef, cx: &RenderContext<'_>) -> Vec<String> {
    if member.enum_values.is_empty() {
        return Vec::new();
    }
    let mut rows = vec![vec![TableCell::header("Enumerator"), TableCell::header("Description")]];
    for value in &member.enum_values {
        let description = inline(&[value.brief.render_text(cx), value.detailed.render_text(cx)]);
        rows.push(vec![TableCell::new(enum_value_cell(value, cx)), TableCell::new(description)]);
    }
    cx.markup.table(&rows, None)
}

fn reimplement_lines(prefix: &str, refs: &[Reimplement], cx: &RenderContext<'_>) -> Vec<String> {
    if refs.is_empty() {
        return Vec::new();
    }
    let links: Vec<String> = refs
        .iter()
        .map(|r| cx.reference(&r.refid, RefKind::Member, None, cx.text(&r.text)))
        .collect();
    cx.markup.paragraph(&format!("{} {}.", cx.text(prefix), links.join(", ")))
}

/// Member detail block: anchored heading, declaration, descriptions, enum
/// values, reimplementation links and location.
impl RenderLines for MemberDef {
    fn render_lines(&self, cx: &RenderContext<'_>) -> Vec<String> {
        let m = cx.markup;
        let title = match self.kind {
            MemberKind::Function | MemberKind::Signal | MemberKind::Slot | MemberKind::Prototype => {
                cx.text(&format!("{}()", self.name))
            }
            _ => cx.text(&self.name),
        };
        let mut lines = m.heading(3, &title, Some(member_anchor(&self.id)));

        let language = source_language(&self.location.file);
        push_block(&mut lines, m.code_block(language, &declaration(self, cx)));

        push_block(&mut lines, self.brief.render_lines(cx));
        let nested = cx.with_heading_offset(3);
        push_block(&mut lines, self.detailed.render_lines(&nested));
        push_block(&mut lines, self.inbody.render_lines(&nested));
        if !self.is_documented() && cx.options.suggest_to_do_descriptions {
            push_block(&mut lines, m.paragraph(&cx.text(TODO_PLACEHOLDER)));
        }

        push_block(&mut lines, enum_values_table(self, cx));
        push_block(&mut lines, reimplement_lines("Reimplements", &self.reimplements, cx));
        push_block(&mut lines, reimplement_lines("Reimplemented in", &self.reimplemented_by, cx));
        push_block(&mut lines, location_lines("Defined at", &self.location, cx));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::model::FromXml;
    use crate::render::test_support::Fixture;
    use crate::render::OutputFormat;
    use crate::xml::{parse_document, Element};

    fn member(xml: &str) -> MemberDef {
        let doc = parse_document(xml).unwrap();
        MemberDef::from_xml(Element::new(doc.root_element())).unwrap()
    }

    fn section(xml: &str) -> SectionDef {
        let doc = parse_document(xml).unwrap();
        SectionDef::from_xml(Element::new(doc.root_element())).unwrap()
    }

    const SIZE: &str = r#"<memberdef kind="function" id="classns_1_1_widget_1a1" prot="public" static="no" const="yes" explicit="no" inline="no" virt="virtual">
        <type>std::size_t</type>
        <definition>virtual std::size_t ns::Widget::size</definition>
        <argsstring>() const</argsstring>
        <name>size</name>
        <briefdescription><para>Number of items.</para></briefdescription>
        <detaileddescription></detaileddescription>
        <inbodydescription></inbodydescription>
        <location file="include/widget.h" line="12"/>
      </memberdef>"#;

    #[test]
    fn function_declaration() {
        let fixture = Fixture::new(OutputFormat::Text);
        assert_eq!(declaration(&member(SIZE), &fixture.cx()), ["virtual std::size_t size() const"]);
    }

    #[test]
    fn enum_declaration() {
        let fixture = Fixture::new(OutputFormat::Text);
        let e = member(
            r#"<memberdef kind="enum" id="a_1b" prot="public" static="no" strong="yes"><type>int</type><name>Mode</name><enumvalue id="a_1c" prot="public"><name>On</name><initializer>= 1</initializer></enumvalue><location file="a.h"/></memberdef>"#,
        );
        assert_eq!(declaration(&e, &fixture.cx()), ["enum class Mode : int"]);
    }

    #[test]
    fn define_declaration() {
        let fixture = Fixture::new(OutputFormat::Text);
        let d = member(
            r#"<memberdef kind="define" id="m_8h_1a" prot="public" static="no"><name>MAX</name><param><defname>a</defname></param><param><defname>b</defname></param><initializer>((a) &gt; (b) ? (a) : (b))</initializer><location file="m.h"/></memberdef>"#,
        );
        assert_eq!(declaration(&d, &fixture.cx()), ["#define MAX(a, b) ((a) > (b) ? (a) : (b))"]);
    }

    #[test]
    fn member_details_markdown() {
        let fixture = Fixture::new(OutputFormat::Markdown);
        let lines = member(SIZE).render_lines(&fixture.cx());
        assert_eq!(
            lines,
            [
                "### size() {#a1}",
                "",
                "```cpp",
                "virtual std::size_t size() const",
                "```",
                "",
                "Number of items.",
                "",
                "Defined at <code>include/widget.h:12</code>",
            ]
        );
    }

    #[test]
    fn undocumented_member_gets_placeholder_when_asked() {
        let mut fixture = Fixture::new(OutputFormat::Text);
        fixture.options.suggest_to_do_descriptions = true;
        let m = member(
            r#"<memberdef kind="variable" id="a_1v" prot="public" static="yes"><type>int</type><name>count</name><location file="a.h"/></memberdef>"#,
        );
        let lines = m.render_lines(&fixture.cx());
        assert!(lines.iter().any(|l| l == TODO_PLACEHOLDER));
        assert!(lines.iter().any(|l| l == "    static int count"));
    }

    #[test]
    fn section_index_links_to_anchors() {
        let fixture = Fixture::new(OutputFormat::Markdown);
        let s = section(&format!(r#"<sectiondef kind="public-func">{SIZE}</sectiondef>"#));
        let lines = section_index(&s, &fixture.cx());
        assert_eq!(
            lines,
            [
                "## Public Member Functions",
                "",
                "| Name | Description |",
                "| --- | --- |",
                "| [<code>size</code>](#a1) | Number of items. |",
            ]
        );
    }

    #[test]
    fn unknown_section_kind_warns() {
        let fixture = Fixture::new(OutputFormat::Text);
        let s = section(r#"<sectiondef kind="mystery"><memberdef kind="variable" id="a_1v" prot="public" static="no"><type>int</type><name>v</name><location file="a.h"/></memberdef></sectiondef>"#);
        assert_eq!(section_title(&s, &fixture.cx()), "mystery");
        assert_eq!(fixture.diagnostics.count(DiagnosticKind::UnsupportedValue), 1);
    }
}
