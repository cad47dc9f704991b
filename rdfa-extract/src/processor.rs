use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use itertools::Itertools;
use oxiri::Iri;
use scraper::{ElementRef, Html};
use vec1::Vec1;

use crate::config::{Backend, ExtractorConfig};
use crate::context::{EvaluationContext, LocalValues};
use crate::element::Element;
use crate::triple::{BlankNodes, Extraction, Node, Term, Triple};
use crate::vocab::{rdf, rdfa};
use crate::Error;

/// Extracts RDFa triples from HTML documents.
///
/// An extractor holds only configuration, so one instance can be reused for
/// any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// An extractor with the default configuration and the named parsing backend.
    ///
    /// Fails with [`Error::UnknownBackend`] for anything other than
    /// `strict-html` or `html5-compliant`.
    pub fn from_backend_name(name: &str) -> Result<Self, Error> {
        let backend: Backend = name.parse()?;
        Ok(Self::new(ExtractorConfig {
            backend,
            ..ExtractorConfig::default()
        }))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parses `input` and returns every triple it contains, in document order.
    pub fn extract(&self, input: &str, base: &str) -> Result<Extraction, Error> {
        let base = Iri::parse(base.to_string()).map_err(|source| Error::IriParseError {
            source,
            iri: base.to_string(),
        })?;

        let doc = self.config.backend.parse_document(input)?;
        let base = document_base(&doc, base);
        let tuples = self.tuples(doc.root_element(), base).collect();
        Ok(Extraction { tuples })
    }

    /// Lazily walks the tree under `root`, yielding triples as they are found.
    ///
    /// An element's triples are yielded before those of its children.
    pub fn tuples<E: Element>(&self, root: E, base: Iri<String>) -> Tuples<'_, E> {
        let context = Rc::new(EvaluationContext::new(base, self.config.resolution));
        Tuples {
            processor: Processor {
                config: &self.config,
                blank_nodes: BlankNodes::default(),
                output: RefCell::new(VecDeque::new()),
            },
            stack: vec![Frame {
                element: root,
                context,
                depth: 0,
            }],
        }
    }
}

/// The base for a document: `<head><base href>` if present, resolved against
/// the document IRI. Fragment trees have no `<head>`, so a top-level `<base>`
/// counts too.
fn document_base(doc: &Html, base: Iri<String>) -> Iri<String> {
    let href = doc
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find_map(|el| match el.value().name() {
            "base" => Some(el),
            "head" => el
                .children()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "base"),
            _ => None,
        })
        .and_then(|el| el.value().attr("href"));

    let Some(href) = href.filter(|href| !href.is_empty()) else {
        return base;
    };

    match base.resolve(href) {
        Ok(resolved) => {
            tracing::debug!(base = %resolved, "using <base> element");
            resolved
        }
        Err(err) => {
            tracing::warn!(href, %err, "ignoring invalid <base> element");
            base
        }
    }
}

struct Frame<E> {
    element: E,
    context: Rc<EvaluationContext>,
    depth: usize,
}

/// The triples of one document, produced on demand.
///
/// See [`Extractor::tuples`].
pub struct Tuples<'c, E> {
    processor: Processor<'c>,
    stack: Vec<Frame<E>>,
}

impl<E: Element> Iterator for Tuples<'_, E> {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        loop {
            if let Some(triple) = self.processor.output.get_mut().pop_front() {
                return Some(triple);
            }

            let frame = self.stack.pop()?;
            self.step(frame);
        }
    }
}

impl<E: Element> Tuples<'_, E> {
    fn step(&mut self, frame: Frame<E>) {
        let Frame {
            element,
            context,
            depth,
        } = frame;

        let child_context = Rc::new(self.processor.process_element(element, &context, depth == 0));

        let mut children = element.child_elements().rev().peekable();
        if children.peek().is_none() {
            return;
        }

        if depth >= self.processor.config.max_depth {
            tracing::warn!(
                element = element.name(),
                max_depth = self.processor.config.max_depth,
                "nesting limit reached; skipping descendants"
            );
            return;
        }

        // pushed in reverse so that the first child is processed first
        for child in children {
            self.stack.push(Frame {
                element: child,
                context: child_context.clone(),
                depth: depth + 1,
            });
        }
    }
}

enum Attr<T> {
    Missing,
    Empty,
    Value(T),
}

impl<T> Attr<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Missing => Attr::Missing,
            Attr::Empty => Attr::Empty,
            Attr::Value(v) => Attr::Value(f(v)),
        }
    }

    fn value(&self) -> Option<&T> {
        match self {
            Attr::Value(v) => Some(v),
            Attr::Missing | Attr::Empty => None,
        }
    }
}

/// Reads an attribute; an empty or unresolvable value counts as [`Attr::Empty`].
fn attr<'e, E: Element, T>(
    el: &'e E,
    name: &str,
    proj: impl FnOnce(&'e str) -> Option<T>,
) -> Attr<T> {
    match el.attr(name) {
        None => Attr::Missing,
        Some("") => Attr::Empty,
        Some(v) => proj(v).map_or(Attr::Empty, Attr::Value),
    }
}

/// Reads a whitespace-separated list attribute.
fn tokens<'e, E: Element>(el: &'e E, name: &str) -> Attr<Vec1<&'e str>> {
    attr(el, name, |v| {
        Vec1::try_from_vec(v.split_ascii_whitespace().collect()).ok()
    })
}

/// Parses `@prefix` into `(prefix, IRI)` pairs. A trailing unpaired token is dropped.
fn prefix_declarations(value: &str) -> Vec<(&str, &str)> {
    value
        .split_ascii_whitespace()
        .tuples()
        .map(|(prefix, iri)| (prefix.trim_matches(':'), iri))
        .collect()
}

struct Processor<'c> {
    config: &'c ExtractorConfig,
    blank_nodes: BlankNodes,
    output: RefCell<VecDeque<Triple>>,
}

impl Processor<'_> {
    fn emit(&self, triple: Triple) {
        tracing::trace!(%triple, "emitting triple");
        self.output.borrow_mut().push_back(triple);
    }

    /// Applies the processing rules to one element and returns the context for its children.
    fn process_element<E: Element>(
        &self,
        element: E,
        eval_context: &EvaluationContext,
        is_root_element: bool,
    ) -> EvaluationContext {
        tracing::trace!(element = element.name(), "processing element");

        let mut local = LocalValues::new(eval_context, self.config.resolution, &self.blank_nodes);

        // Next the current element is examined for any change to the default vocabulary via @vocab.
        // The value is taken as written; it is concatenated with terms, not resolved.
        match attr(&element, "vocab", |v| Some(v.to_string())) {
            Attr::Missing => {}
            Attr::Empty => {
                // TODO: reset to the host language default vocabulary once one is defined
                tracing::trace!("@vocab is empty, default vocabulary unchanged");
            }
            Attr::Value(vocab) => {
                tracing::trace!(%vocab, "default vocabulary changed");
                self.emit(Triple::new(
                    Node::Iri(eval_context.base.as_str().to_string()),
                    rdfa::USES_VOCABULARY,
                    Term::Iri(vocab.clone()),
                ));
                local.default_vocab = Some(vocab);
            }
        }

        // Next, the current element is examined for IRI mappings.
        if let Some(prefix) = element.attr("prefix") {
            let declarations = prefix_declarations(prefix);
            if !declarations.is_empty() {
                let mut mappings = Rc::unwrap_or_clone(local.iri_mappings);
                for (prefix, iri) in declarations {
                    tracing::trace!(prefix, iri, "prefix declared");
                    if let Err(err) = mappings.add_prefix(prefix, iri) {
                        tracing::warn!(prefix, ?err, "ignoring invalid @prefix declaration");
                    }
                }
                local.iri_mappings = Rc::new(mappings);
            }
        }

        // The current element is also parsed for any language information.
        if let Some(lang) = element.attr("xml:lang").or_else(|| element.attr("lang")) {
            if lang.is_empty() {
                local.current_language = None;
            } else {
                match lang.parse::<icu::locale::LanguageIdentifier>() {
                    Ok(lang) => local.current_language = Some(Rc::new(lang)),
                    Err(err) => tracing::warn!(lang, ?err, "ignoring invalid language tag"),
                }
            }
        }

        let rel = tokens(&element, "rel");
        let rev = tokens(&element, "rev");
        let property = tokens(&element, "property");
        let type_of = tokens(&element, "typeof");
        let content = element.attr("content").filter(|v| !v.is_empty());
        let datatype = element.attr("datatype").filter(|v| !v.is_empty());

        let about = attr(&element, "about", |v| local.resolve_resource(v)).map(Rc::new);
        let resource = attr(&element, "resource", |v| local.resolve_resource(v)).map(Rc::new);
        let href = attr(&element, "href", |v| local.resolve_iri(v)).map(Rc::new);
        let src = attr(&element, "src", |v| local.resolve_iri(v)).map(Rc::new);

        // resource, then href, then src
        let resource_value: Option<Rc<Node>> = resource
            .value()
            .or(href.value())
            .or(src.value())
            .cloned();

        let has_type = type_of.value().is_some();
        let has_relations = rel.value().is_some() || rev.value().is_some();

        if !has_relations {
            // If the current element contains the @property attribute, but does
            // not contain either the @content or @datatype attributes, then
            if property.value().is_some() && content.is_none() && datatype.is_none() {
                // new subject is the first match of @about, the root element, the parent object
                if let Some(about) = about.value() {
                    tracing::trace!("using @about as new subject");
                    local.new_subject = Some(about.clone());
                } else if is_root_element {
                    local.new_subject = Some(eval_context.base_resource());
                } else if let Some(parent_object) = &eval_context.parent_object {
                    tracing::trace!(%parent_object, "using parent object as new subject");
                    local.new_subject = Some(parent_object.clone());
                }

                if has_type && about.value().is_some() {
                    local.typed_resource = about.value().cloned();
                } else if has_type && is_root_element {
                    local.typed_resource = Some(eval_context.base_resource());
                } else {
                    // resource, then href, then src, then a fresh blank node;
                    // children chain to it whether or not it is typed
                    let typed_resource = resource_value
                        .clone()
                        .unwrap_or_else(|| local.fresh_blank_node());
                    tracing::trace!(%typed_resource, "typed resource is also the object resource");
                    local.typed_resource = Some(typed_resource.clone());
                    local.current_object_resource = Some(typed_resource);
                }
            } else {
                if let Some(subject) = about.value().or(resource_value.as_ref()) {
                    tracing::trace!(%subject, "using @about/@resource/@href/@src as new subject");
                    local.new_subject = Some(subject.clone());
                } else if is_root_element {
                    local.new_subject = Some(eval_context.base_resource());
                } else if has_type {
                    local.new_subject = Some(local.fresh_blank_node());
                } else if let Some(parent_object) = &eval_context.parent_object {
                    local.new_subject = Some(parent_object.clone());
                    // the element only re-anchors the subject chain
                    if property.value().is_none() {
                        tracing::trace!("skip element set (no @property)");
                        local.skip_element = true;
                    }
                }

                if has_type {
                    local.typed_resource = local.new_subject.clone();
                }
            }
        } else {
            if let Some(about) = about.value() {
                local.new_subject = Some(about.clone());
                if has_type {
                    local.typed_resource = Some(about.clone());
                }
            } else if is_root_element {
                local.new_subject = Some(eval_context.base_resource());
            } else {
                local.new_subject = eval_context.parent_object.clone();
            }

            if let Some(object) = &resource_value {
                tracing::trace!(%object, "using @resource/@href/@src as current object resource");
                local.current_object_resource = Some(object.clone());
            } else if has_type && about.value().is_none() {
                local.current_object_resource = Some(local.fresh_blank_node());
            }

            if has_type && about.value().is_none() {
                local.typed_resource = local.current_object_resource.clone();
            }
        }

        // If a typed resource was set, it is now used to provide a subject for type values.
        if let (Some(typed_resource), Some(types)) = (&local.typed_resource, type_of.value()) {
            for token in types {
                if let Some(type_iri) = local.resolve_type(token) {
                    self.emit(Triple::new(
                        Node::clone(typed_resource),
                        rdf::TYPE,
                        type_iri,
                    ));
                }
            }
        }

        // If a current object resource was set, it is now used to generate triples.
        match (&local.current_object_resource, &local.new_subject) {
            (Some(object), Some(subject)) => {
                // @inlist lists are not built, so @rel is ignored alongside it
                if element.attr("inlist").is_none() {
                    for token in rel.value().into_iter().flatten() {
                        if let Some(predicate) = local.resolve_predicate(token) {
                            self.emit(Triple::new(
                                Node::clone(subject),
                                predicate,
                                Node::clone(object),
                            ));
                        }
                    }
                }

                for token in rev.value().into_iter().flatten() {
                    if let Some(predicate) = local.resolve_predicate(token) {
                        self.emit(Triple::new(
                            Node::clone(object),
                            predicate,
                            Node::clone(subject),
                        ));
                    }
                }
            }
            (None, _) if has_relations => {
                tracing::trace!("no current object resource; @rel/@rev left incomplete");
            }
            _ => {}
        }

        // The next step of the iteration is to establish any current property value.
        if let Some(properties) = property.value() {
            local.current_property_value =
                Some(content.map_or_else(|| element.text(), str::to_string));

            if !local.skip_element {
                if let (Some(subject), Some(value)) =
                    (&local.new_subject, &local.current_property_value)
                {
                    for token in properties {
                        if let Some(predicate) = local.resolve_predicate(token) {
                            self.emit(Triple::new(
                                Node::clone(subject),
                                predicate,
                                Term::Literal(value.clone()),
                            ));
                        }
                    }
                }
            }
        }

        // Next, all elements that are children of the current element are processed
        // using a new evaluation context.
        eval_context.for_children(local)
    }
}
