use tapestry::{
    Ambiguous, AttributeName, ElementName, Error, Instruction, Markup, Node, Recorder,
    RenderOptions, render_to_string,
};

fn html(rec: &mut Recorder<'_>) -> String {
    let mut doc = rec.compile().unwrap();
    render_to_string(&mut doc, &RenderOptions::default()).unwrap()
}

fn render_err(rec: &mut Recorder<'_>) -> Error {
    let mut doc = rec.compile().unwrap();
    render_to_string(&mut doc, &RenderOptions::default()).unwrap_err()
}

#[test]
fn test_full_page() {
    let m = Markup::new();
    m.doctype();
    m.element(
        ElementName::Html,
        [
            m.attr(AttributeName::Lang, "en"),
            m.element(
                ElementName::Head,
                [
                    m.element(ElementName::Meta, [m.attr(AttributeName::Charset, "utf-8")]),
                    m.element_text(ElementName::Title, "Home"),
                    m.element(
                        ElementName::Link,
                        [
                            m.attr(AttributeName::Rel, "stylesheet"),
                            m.attr(AttributeName::Href, "/css/site.css"),
                        ],
                    ),
                ],
            ),
            m.element(
                ElementName::Body,
                [m.element(
                    ElementName::Main,
                    [
                        m.element_text(ElementName::H1, "Welcome"),
                        m.element(
                            ElementName::P,
                            [
                                m.text("Read the "),
                                m.element(
                                    ElementName::A,
                                    [m.attr(AttributeName::Href, "/docs/"), m.text("docs")],
                                ),
                                m.text("."),
                            ],
                        ),
                    ],
                )],
            ),
        ],
    );

    let options = RenderOptions::new().with_base_path("/index.html");
    assert_eq!(
        m.to_html_with_options(&options).unwrap(),
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Home</title>\n\
         <link rel=\"stylesheet\" href=\"css/site.css\">\n\
         </head>\n\
         <body>\n\
         <main>\n\
         <h1>Welcome</h1>\n\
         <p>Read the <a href=\"docs/\">docs</a>.</p>\n\
         </main>\n\
         </body>\n\
         </html>\n"
    );
}

#[test]
fn test_text_is_escaped() {
    let mut rec = Recorder::new();
    let _ = rec.element_text(ElementName::P, "a < b & c > d").unwrap();
    assert_eq!(html(&mut rec), "<p>a &lt; b &amp; c &gt; d</p>\n");
}

#[test]
fn test_raw_is_verbatim() {
    let mut rec = Recorder::new();
    let raw = rec.raw("<em>already</em> &amp;").unwrap();
    let _ = rec.element(ElementName::P, [raw]).unwrap();
    assert_eq!(html(&mut rec), "<p><em>already</em> &amp;</p>\n");
}

#[test]
fn test_flatten_is_transparent() {
    let mut plain = Recorder::new();
    let class = plain
        .attribute(AttributeName::Class, Some("nav".into()))
        .unwrap();
    let a = plain.element_text(ElementName::Li, "a").unwrap();
    let b = plain.element_text(ElementName::Li, "b").unwrap();
    let _ = plain.element(ElementName::Ul, [class, a, b]).unwrap();

    let mut nested = Recorder::new();
    let class = nested
        .attribute(AttributeName::Class, Some("nav".into()))
        .unwrap();
    let a = nested.element_text(ElementName::Li, "a").unwrap();
    let inner = nested.flatten([a]).unwrap();
    let b = nested.element_text(ElementName::Li, "b").unwrap();
    let outer = nested.flatten([class, inner, b]).unwrap();
    let _ = nested.element(ElementName::Ul, [outer]).unwrap();

    let expected = "<ul class=\"nav\">\n<li>a</li>\n<li>b</li>\n</ul>\n";
    assert_eq!(html(&mut plain), expected);
    assert_eq!(html(&mut nested), expected);
}

#[test]
fn test_flatten_non_null_skips_missing_values() {
    let m = Markup::new();
    let show_badge = false;
    m.element(
        ElementName::Span,
        [m.flatten_non_null([
            Some(m.text("name")),
            show_badge.then(|| m.element_text(ElementName::Em, "new")),
        ])],
    );
    assert_eq!(m.to_html().unwrap(), "<span>name</span>\n");
}

#[test]
fn test_fragment_inside_element() {
    let m = Markup::new();
    let items = m.fragment(|m| {
        for item in ["one", "two"] {
            m.element_text(ElementName::Li, item);
        }
    });
    m.element(ElementName::Ol, [items]);
    assert_eq!(
        m.to_html().unwrap(),
        "<ol>\n<li>one</li>\n<li>two</li>\n</ol>\n"
    );
}

#[test]
fn test_inline_id_and_class() {
    let mut rec = Recorder::new();
    let text = rec.text("t").unwrap();
    let _ = rec
        .element(
            ElementName::Div,
            [
                Instruction::id("main"),
                Instruction::class_name("wide"),
                text,
            ],
        )
        .unwrap();
    assert_eq!(html(&mut rec), "<div id=\"main\" class=\"wide\">t</div>\n");
}

#[test]
fn test_class_values_merge() {
    let m = Markup::new();
    m.element(
        ElementName::Div,
        [
            m.attr(AttributeName::Class, "card"),
            m.noop(),
            m.class_name("shadow"),
        ],
    );
    assert_eq!(m.to_html().unwrap(), "<div class=\"card shadow\"></div>\n");
}

#[test]
fn test_ambiguous_names() {
    let m = Markup::new();
    m.element(
        ElementName::Html,
        [
            m.element(ElementName::Head, [m.ambiguous(Ambiguous::Title, "Page")]),
            m.element(
                ElementName::Body,
                [m.element(
                    ElementName::Abbr,
                    [m.ambiguous(Ambiguous::Title, "HyperText"), m.text("HTML")],
                )],
            ),
        ],
    );
    assert_eq!(
        m.to_html().unwrap(),
        "<html>\n<head>\n<title>Page</title>\n</head>\n<body><abbr title=\"HyperText\">HTML</abbr></body>\n</html>\n"
    );
}

#[test]
fn test_boolean_and_void() {
    let m = Markup::new();
    m.element(
        ElementName::Form,
        [m.element(
            ElementName::Input,
            [
                m.attr(AttributeName::Type, "checkbox"),
                m.flag(AttributeName::Checked),
            ],
        )],
    );
    assert_eq!(
        m.to_html().unwrap(),
        "<form><input type=\"checkbox\" checked></form>\n"
    );
}

#[test]
fn test_document_walk() {
    let mut rec = Recorder::new();
    rec.doctype().unwrap();
    let _ = rec.element_text(ElementName::P, "x").unwrap();

    let mut doc = rec.compile().unwrap();
    let mut nodes = doc.nodes().unwrap();
    assert!(nodes.has_next().unwrap());
    assert!(matches!(nodes.next().unwrap(), Node::DocumentType));
    assert!(nodes.has_next().unwrap());
    match nodes.next().unwrap() {
        Node::Element(mut p) => {
            assert_eq!(p.name(), ElementName::P);
            let mut attrs = p.attributes().unwrap();
            assert!(!attrs.has_next().unwrap());
            let mut children = p.nodes().unwrap();
            assert!(children.has_next().unwrap());
            assert!(matches!(children.next().unwrap(), Node::Text("x")));
            assert!(!children.has_next().unwrap());
            assert!(!children.has_next().unwrap());
        }
        _ => panic!("expected p"),
    }
    assert!(!nodes.has_next().unwrap());
}

#[test]
fn test_recorder_is_reusable() {
    let mut rec = Recorder::new();
    let _ = rec.element_text(ElementName::P, "first").unwrap();
    assert_eq!(html(&mut rec), "<p>first</p>\n");

    // recording after compile continues the same document
    let _ = rec.element_text(ElementName::P, "second").unwrap();
    assert_eq!(html(&mut rec), "<p>first</p>\n<p>second</p>\n");

    rec.reset();
    assert_eq!(rec.tape_len(), 0);
    assert_eq!(rec.object_count(), 0);
    assert_eq!(html(&mut rec), "");
}

#[test]
fn test_compile_with_open_scope() {
    let mut rec = Recorder::new();
    rec.element_begin(ElementName::Div).unwrap();
    assert!(matches!(rec.compile(), Err(Error::ScopeOpen)));
}

#[test]
fn test_value_outside_scope() {
    let mut rec = Recorder::new();
    let text = rec.text("x").unwrap();
    assert!(matches!(
        rec.element_value(text),
        Err(Error::ScopeNotOpen)
    ));
}

#[test]
fn test_missing_record() {
    let mut rec = Recorder::new();
    assert!(matches!(
        rec.element(ElementName::Div, [Instruction::id("x"), foreign_token()]),
        Err(Error::MissingRecord)
    ));
}

/// A token for a record that was never written.
fn foreign_token() -> Instruction<'static> {
    let mut scratch = Recorder::new();
    scratch.text("unused").unwrap()
}

#[test]
fn test_detached_flatten_fails_render() {
    let mut rec = Recorder::new();
    let text = rec.text("x").unwrap();
    let _ = rec.flatten([text]).unwrap();
    assert!(matches!(render_err(&mut rec), Error::DetachedFlatten));
}

#[test]
fn test_top_level_attribute_fails_render() {
    let mut rec = Recorder::new();
    let _ = rec
        .attribute(AttributeName::Id, Some("stray".into()))
        .unwrap();
    assert!(matches!(
        render_err(&mut rec),
        Error::UnsupportedProto { .. }
    ));
}

#[test]
fn test_markup_surfaces_first_error() {
    let m = Markup::new();
    m.element(ElementName::P, [foreign_token()]);
    m.element_text(ElementName::P, "ignored");
    assert!(matches!(m.to_html(), Err(Error::MissingRecord)));
    // reporting the error discards the document
    assert_eq!(m.to_html().unwrap(), "");
    m.element_text(ElementName::P, "ok");
    assert_eq!(m.to_html().unwrap(), "<p>ok</p>\n");
}
