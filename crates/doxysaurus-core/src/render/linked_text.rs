use super::{RenderContext, RenderText};
use crate::model::{LinkedText, LinkedTextItem, RefText};

impl RenderText for RefText {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        cx.titled_reference(
            &self.refid,
            self.kindref,
            self.external.as_deref(),
            self.tooltip.as_deref(),
            cx.text(&self.text),
        )
    }
}

impl RenderText for LinkedText {
    fn render_text(&self, cx: &RenderContext<'_>) -> String {
        self.items
            .iter()
            .map(|item| match item {
                LinkedTextItem::Text(t) => cx.text(t),
                LinkedTextItem::Ref(r) => r.render_text(cx),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::test_def;
    use crate::diagnostics::Diagnostics;
    use crate::hierarchy::Collections;
    use crate::model::{CompoundKind, FromXml};
    use crate::permalink::Resolver;
    use crate::render::test_support::Fixture;
    use crate::render::OutputFormat;
    use crate::xml::{parse_document, Element};

    fn linked(xml: &str) -> LinkedText {
        let doc = parse_document(xml).unwrap();
        LinkedText::from_xml(Element::new(doc.root_element())).unwrap()
    }

    fn resolver() -> Resolver {
        let mut collections = Collections::build(
            vec![test_def("classns_1_1_base", CompoundKind::Class, "ns::Base")],
            &Diagnostics::default(),
        )
        .unwrap();
        Resolver::assign(&mut collections)
    }

    #[test]
    fn type_links_to_compound() {
        let fixture = Fixture::with_resolver(OutputFormat::Markdown, resolver());
        let text = linked(r#"<type>const <ref refid="classns_1_1_base" kindref="compound">Base</ref> &amp;</type>"#);
        assert_eq!(text.render_text(&fixture.cx()), "const [Base](/api/classes/ns/base) &");
    }

    #[test]
    fn markdown_code_drops_links() {
        let fixture = Fixture::with_resolver(OutputFormat::Markdown, resolver());
        let text = linked(r#"<type><ref refid="classns_1_1_base" kindref="compound">Base</ref> *</type>"#);
        assert_eq!(text.render_text(&fixture.cx().code()), "Base *");
    }

    #[test]
    fn html_code_keeps_links() {
        let fixture = Fixture::with_resolver(OutputFormat::Html, resolver());
        let text = linked(r#"<type><ref refid="classns_1_1_base" kindref="compound">Base</ref> &lt;T&gt;</type>"#);
        assert_eq!(
            text.render_text(&fixture.cx().code()),
            "<a href=\"/api/classes/ns/base\">Base</a> &lt;T&gt;"
        );
    }

    #[test]
    fn external_refs_stay_plain() {
        let fixture = Fixture::new(OutputFormat::Html);
        let text = linked(r#"<type><ref refid="x" kindref="compound" external="std.tag">string</ref></type>"#);
        assert_eq!(text.render_text(&fixture.cx()), "string");
        assert!(fixture.diagnostics.entries().is_empty());
    }

    #[test]
    fn tooltip_becomes_link_title() {
        let text = linked(
            r#"<type><ref refid="classns_1_1_base" kindref="compound" tooltip="The &quot;base&quot;">Base</ref></type>"#,
        );
        let html = Fixture::with_resolver(OutputFormat::Html, resolver());
        assert_eq!(
            text.render_text(&html.cx()),
            r#"<a href="/api/classes/ns/base" title="The &quot;base&quot;">Base</a>"#
        );
        let md = Fixture::with_resolver(OutputFormat::Markdown, resolver());
        assert_eq!(text.render_text(&md.cx()), r#"[Base](/api/classes/ns/base "The \"base\"")"#);
    }
}
