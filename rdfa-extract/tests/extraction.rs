use oxiri::Iri;
use pretty_assertions::assert_eq;
use rdfa_extract::vocab::{rdf, rdfa};
use rdfa_extract::{Error, Extractor, ExtractorConfig, Node, Term, Triple, extract};
use rstest::rstest;
use scraper::Html;

mod utils;

fn iri(value: &str) -> Node {
    Node::Iri(value.to_string())
}

fn literal(value: &str) -> Term {
    Term::Literal(value.to_string())
}

#[test]
fn vocab_then_property() {
    let extraction = extract(
        r#"<div vocab="http://schema.org/"><p property="name">Alice</p></div>"#,
        "http://ex.com/",
    )
    .unwrap();

    // the default vocabulary is recorded but does not prefix the token
    assert_eq!(
        extraction.tuples,
        [
            Triple::new(
                iri("http://ex.com/"),
                rdfa::USES_VOCABULARY,
                iri("http://schema.org/"),
            ),
            Triple::new(iri("http://ex.com/"), "http://ex.com/name", literal("Alice")),
        ]
    );
}

#[test]
fn typed_subject_from_about() {
    let extraction = extract(
        r##"<div typeof="Person" about="#me"><span property="name">Bob</span></div>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [
            Triple::new(iri("http://ex.com/#me"), rdf::TYPE, Term::Iri("Person".into())),
            Triple::new(iri("http://ex.com/#me"), "http://ex.com/name", literal("Bob")),
        ]
    );
}

#[test]
fn rel_links_parent_subject_to_href() {
    let extraction = extract(
        r#"<a rel="foaf:knows" href="http://example.com/bob">Bob</a>"#,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(
            iri("http://ex.com/"),
            "foaf:knows",
            iri("http://example.com/bob"),
        )]
    );
}

#[test]
fn rev_swaps_subject_and_object() {
    let extraction = extract(
        r##"<div about="#a"><span rel="next" rev="prev" resource="#b"></span></div>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [
            Triple::new(iri("http://ex.com/#a"), "http://ex.com/next", iri("http://ex.com/#b")),
            Triple::new(iri("http://ex.com/#b"), "http://ex.com/prev", iri("http://ex.com/#a")),
        ]
    );
}

#[rstest]
#[case::no_text(r#"<span property="name"></span>"#)]
#[case::empty_content(r#"<span property="name" content=""></span>"#)]
#[case::empty_about(r#"<span property="name" about=""></span>"#)]
fn empty_property_value_is_an_empty_literal(#[case] html: &str) {
    let extraction = extract(html, "http://ex.com/").unwrap();
    assert_eq!(
        extraction.tuples,
        [Triple::new(iri("http://ex.com/"), "http://ex.com/name", literal(""))]
    );
}

#[test]
fn content_overrides_text() {
    let extraction = extract(
        r##"<span about="#x" property="name" content="Robert">Bob</span>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(iri("http://ex.com/#x"), "http://ex.com/name", literal("Robert"))]
    );
}

#[test]
fn relative_href_resolves_against_the_base() {
    let extraction = extract(
        r#"<a rel="next" href="/x">next</a>"#,
        "http://example.com/page",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(
            iri("http://example.com/page"),
            "http://example.com/next",
            iri("http://example.com/x"),
        )]
    );
}

#[test]
fn base_element_overrides_the_document_iri() {
    let extraction = extract(
        r#"<html><head><base href="http://other.org/dir/"></head>
        <body><a rel="next" href="x">x</a></body></html>"#,
        "http://example.com/page",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(
            iri("http://other.org/dir/"),
            "http://other.org/dir/next",
            iri("http://other.org/dir/x"),
        )]
    );
}

#[test]
fn every_typeof_token_is_emitted() {
    let extraction = extract(r#"<div typeof="A B  C"></div>"#, "http://ex.com/").unwrap();

    assert_eq!(extraction.tuples.len(), 3);
    let subject = &extraction.tuples[0].subject;
    assert!(matches!(subject, Node::Blank(_)));
    for (triple, expected) in extraction.tuples.iter().zip(["A", "B", "C"]) {
        assert_eq!(&triple.subject, subject);
        assert_eq!(triple.predicate, rdf::TYPE);
        assert_eq!(triple.object, Term::Iri(expected.into()));
    }
}

#[test]
fn plain_elements_pass_the_subject_through() {
    let extraction = extract(
        r##"<div about="#x"><div><section><span property="p">v</span></section></div></div>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(iri("http://ex.com/#x"), "http://ex.com/p", literal("v"))]
    );
}

#[test]
fn siblings_do_not_see_each_other() {
    let extraction = extract(
        r##"<div about="#a">
            <p about="#b"></p>
            <p><span property="p">v</span></p>
        </div>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(iri("http://ex.com/#a"), "http://ex.com/p", literal("v"))]
    );
}

#[test]
fn typed_property_element_nests_a_new_resource() {
    let extraction = extract(
        r##"<div about="#a">
            <div property="author" typeof="Person"><span property="name">Ann</span></div>
        </div>"##,
        "http://ex.com/",
    )
    .unwrap();

    let tuples = &extraction.tuples;
    assert_eq!(tuples.len(), 3);
    let Node::Blank(author) = tuples[0].subject else {
        panic!("expected a blank node, got {}", tuples[0]);
    };
    assert_eq!(tuples[0], Triple::new(author.into(), rdf::TYPE, Term::Iri("Person".into())));
    assert_eq!(tuples[1].subject, iri("http://ex.com/#a"));
    assert_eq!(tuples[1].predicate, "http://ex.com/author");
    assert_eq!(tuples[2], Triple::new(author.into(), "http://ex.com/name", literal("Ann")));
}

#[test]
fn triples_follow_document_order() {
    let extraction = extract(
        r##"<div about="#a" typeof="T"><span property="p">1</span></div>
        <div about="#b" typeof="T"><span property="p">2</span></div>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [
            Triple::new(iri("http://ex.com/#a"), rdf::TYPE, Term::Iri("T".into())),
            Triple::new(iri("http://ex.com/#a"), "http://ex.com/p", literal("1")),
            Triple::new(iri("http://ex.com/#b"), rdf::TYPE, Term::Iri("T".into())),
            Triple::new(iri("http://ex.com/#b"), "http://ex.com/p", literal("2")),
        ]
    );
}

#[test]
fn extraction_is_deterministic() {
    let html = r#"<div typeof="T"><a rel="r" typeof="U"><span property="p">x</span></a></div>"#;
    let first = extract(html, "http://ex.com/").unwrap();
    let second = extract(html, "http://ex.com/").unwrap();
    assert_eq!(first, second);
}

#[test]
fn rdfa_lite_person() {
    let extraction = extract(
        r#"<p vocab="http://schema.org/" typeof="Person">
           My name is
           <span property="name">Manu Sporny</span>
           and you can give me a ring via
           <span property="telephone">1-800-555-0199</span>
           or visit
           <a property="url" href="http://manu.sporny.org/">my homepage</a>.
        </p>"#,
        "http://www.example.com/",
    )
    .unwrap();

    insta::assert_snapshot!(utils::render(&extraction), @r##"
    <http://www.example.com/> <http://www.w3.org/ns/rdfa#usesVocabulary> <http://schema.org/> .
    _:b0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <Person> .
    _:b0 <http://www.example.com/name> "Manu Sporny" .
    _:b0 <http://www.example.com/telephone> "1-800-555-0199" .
    _:b0 <http://www.example.com/url> "my homepage" .
    "##);
}

#[test]
fn tuples_are_produced_lazily() {
    let doc = Html::parse_document(
        r##"<div about="#a" property="p">1</div><div about="#b" property="p">2</div>"##,
    );
    let extractor = Extractor::default();
    let base = Iri::parse("http://ex.com/".to_string()).unwrap();
    let mut tuples = extractor.tuples(doc.root_element(), base);

    assert_eq!(
        tuples.next(),
        Some(Triple::new(iri("http://ex.com/#a"), "http://ex.com/p", literal("1")))
    );
    assert_eq!(tuples.count(), 1);
}

#[test]
fn nesting_beyond_the_limit_is_skipped() {
    let html = r##"<div about="#top" property="p">top</div>
        <div><div><div><span about="#deep" property="p">deep</span></div></div></div>"##;

    let shallow = Extractor::new(ExtractorConfig {
        max_depth: 3,
        ..ExtractorConfig::default()
    });
    let extraction = shallow.extract(html, "http://ex.com/").unwrap();
    assert_eq!(
        extraction.tuples,
        [Triple::new(iri("http://ex.com/#top"), "http://ex.com/p", literal("top"))]
    );

    let extraction = Extractor::default().extract(html, "http://ex.com/").unwrap();
    assert_eq!(extraction.tuples.len(), 2);
}

#[test]
fn unknown_backend_is_rejected() {
    let err = Extractor::from_backend_name("lxml").unwrap_err();
    assert!(matches!(err, Error::UnknownBackend(ref name) if name == "lxml"));
}

#[test]
fn invalid_base_is_rejected() {
    let err = extract("<p></p>", "not a base").unwrap_err();
    assert!(matches!(err, Error::IriParseError { ref iri, .. } if iri == "not a base"));
}

#[rstest]
#[case::fragment(r#"<div vocab="http://schema.org/"><p property="name">Alice</p></div>"#)]
#[case::document(
    r#"<!DOCTYPE html>
<html><head><title>t</title></head><body><div vocab="http://schema.org/"><p property="name">Alice</p></div></body></html>"#
)]
#[case::broken(r#"<div vocab="http://schema.org/"><p property="name">Alice</span></div></i>"#)]
fn html5_compliant_backend(#[case] html: &str) {
    let extractor = Extractor::from_backend_name("html5-compliant").unwrap();
    let extraction = extractor.extract(html, "http://ex.com/").unwrap();

    assert_eq!(
        extraction.tuples,
        [
            Triple::new(
                iri("http://ex.com/"),
                rdfa::USES_VOCABULARY,
                iri("http://schema.org/"),
            ),
            Triple::new(iri("http://ex.com/"), "http://ex.com/name", literal("Alice")),
        ]
    );
}

#[test]
fn html5_compliant_backend_reads_a_top_level_base() {
    let extractor = Extractor::from_backend_name("html5-compliant").unwrap();
    let extraction = extractor
        .extract(
            r#"<head><base href="http://other.org/dir/"></head><a rel="next" href="x">x</a>"#,
            "http://example.com/page",
        )
        .unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(
            iri("http://other.org/dir/"),
            "http://other.org/dir/next",
            iri("http://other.org/dir/x"),
        )]
    );
}

#[test]
fn property_without_content_becomes_the_parent_object() {
    let extraction = extract(
        r##"<div about="#a"><div property="desc"><span property="name">N</span></div></div>"##,
        "http://ex.com/",
    )
    .unwrap();

    let tuples = &extraction.tuples;
    assert_eq!(tuples.len(), 2);
    assert_eq!(
        tuples[0],
        Triple::new(iri("http://ex.com/#a"), "http://ex.com/desc", literal("N"))
    );
    assert!(matches!(tuples[1].subject, Node::Blank(_)));
    assert_eq!(tuples[1].predicate, "http://ex.com/name");
    assert_eq!(tuples[1].object, literal("N"));
}

#[test]
fn property_with_href_chains_children_to_the_href() {
    let extraction = extract(
        r##"<div about="#a"><a property="link" href="/x"><span property="name">X</span></a></div>"##,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [
            Triple::new(iri("http://ex.com/#a"), "http://ex.com/link", literal("X")),
            Triple::new(iri("http://ex.com/x"), "http://ex.com/name", literal("X")),
        ]
    );
}

#[test]
fn vocab_is_kept_as_written() {
    let extraction = extract(r#"<div vocab="schema"></div>"#, "http://ex.com/").unwrap();

    assert_eq!(
        extraction.tuples,
        [Triple::new(iri("http://ex.com/"), rdfa::USES_VOCABULARY, iri("schema"))]
    );
}

#[rstest]
#[case::inlist_suppresses_rel(
    r##"<div about="#a"><a rel="next" inlist="" href="#b">b</a></div>"##,
    vec![],
)]
#[case::inlist_keeps_rev(
    r##"<div about="#a"><a rel="next" rev="prev" inlist="" href="#b">b</a></div>"##,
    vec![Triple::new(iri("http://ex.com/#b"), "http://ex.com/prev", iri("http://ex.com/#a"))],
)]
#[case::empty_vocab_is_ignored(
    r#"<div vocab=""><p property="name">Alice</p></div>"#,
    vec![Triple::new(iri("http://ex.com/"), "http://ex.com/name", literal("Alice"))],
)]
#[case::invalid_about_falls_through_to_resource(
    r##"<div about="not an iri" resource="#r" typeof="T"></div>"##,
    vec![Triple::new(iri("http://ex.com/#r"), rdf::TYPE, Term::Iri("T".into()))],
)]
#[case::invalid_href_falls_through_to_src(
    r#"<a rel="next" href="not an iri" src="/img">x</a>"#,
    vec![Triple::new(iri("http://ex.com/"), "http://ex.com/next", iri("http://ex.com/img"))],
)]
fn degraded_attributes(#[case] html: &str, #[case] expected: Vec<Triple>) {
    let extraction = extract(html, "http://ex.com/").unwrap();
    assert_eq!(extraction.tuples, expected);
}

#[test]
fn root_element_uses_the_base_as_subject() {
    let extraction = extract(
        r#"<html typeof="WebPage"><body><p property="name">N</p></body></html>"#,
        "http://ex.com/",
    )
    .unwrap();

    assert_eq!(
        extraction.tuples,
        [
            Triple::new(iri("http://ex.com/"), rdf::TYPE, Term::Iri("WebPage".into())),
            Triple::new(iri("http://ex.com/"), "http://ex.com/name", literal("N")),
        ]
    );
}
