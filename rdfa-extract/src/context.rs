use std::rc::Rc;

use curie::PrefixMapping;
use icu::locale::LanguageIdentifier;
use indexmap::IndexMap;
use oxiri::Iri;

use crate::config::TokenResolution;
use crate::triple::{BlankNodes, Node};
use crate::vocab::{initial_context_prefixes, initial_context_terms};

// “During processing, each rule is applied using information provided by an evaluation context.
//
// A context is never changed once built: every element builds a fresh one for its
// children. The shared tables are behind `Rc` and are only replaced, never mutated.
#[derive(Clone)]
pub(crate) struct EvaluationContext {
    // “The base. [...] it establishes an IRI against which relative paths can be resolved.
    pub base: Iri<String>,

    // “The parent subject. The initial value will be the same as the initial value of base,
    //  but it will usually change during the course of processing.
    pub parent_subject: Rc<Node>,

    // “The parent object. In some situations the object of a statement becomes the subject
    //  of any nested statements, and this member is used to convey this value.
    pub parent_object: Option<Rc<Node>>,

    // “A list of current, in-scope IRI mappings.
    pub iri_mappings: Rc<PrefixMapping>,

    // “The term mappings, a list of terms and their associated IRIs.
    pub term_mappings: Rc<IndexMap<String, String>>,

    // “The default vocabulary, a value to use as the prefix IRI when a term unknown to the RDFa Processor
    //  is used.
    pub default_vocab: Option<String>,

    // “The language. Note that there is no default language.
    pub language: Option<Rc<LanguageIdentifier>>,
}

impl EvaluationContext {
    /// The initial context for a document.
    pub fn new(base: Iri<String>, resolution: TokenResolution) -> Self {
        let (iri_mappings, term_mappings) = match resolution {
            TokenResolution::Legacy => (PrefixMapping::default(), IndexMap::new()),
            TokenResolution::Curie => (
                initial_context_prefixes().clone(),
                initial_context_terms().clone(),
            ),
        };

        Self {
            parent_subject: Rc::new(Node::Iri(base.as_str().to_string())),
            base,
            parent_object: None,
            iri_mappings: Rc::new(iri_mappings),
            term_mappings: Rc::new(term_mappings),
            default_vocab: None,
            language: None,
        }
    }

    /// The base as a resource; this is what an empty `@about` denotes.
    pub fn base_resource(&self) -> Rc<Node> {
        Rc::new(Node::Iri(self.base.as_str().to_string()))
    }

    /// Builds the context passed to every child of the element that produced `local`.
    pub fn for_children(&self, local: LocalValues<'_>) -> Self {
        // “If the skip element flag is 'true' then the new evaluation context is a copy of the current
        //  context that was passed in to this level of processing, with the language and list of IRI
        //  mappings values replaced with the local values;
        if local.skip_element {
            return Self {
                iri_mappings: local.iri_mappings,
                term_mappings: local.term_mappings,
                default_vocab: local.default_vocab,
                language: local.current_language,
                ..self.clone()
            };
        }

        // “the parent object is set to value of current object resource, if non-null,
        //  or the value of new subject, if non-null, or the value of the parent subject
        //  of the current evaluation context;
        let parent_object = local
            .current_object_resource
            .as_ref()
            .or(local.new_subject.as_ref())
            .cloned()
            .unwrap_or_else(|| self.parent_subject.clone());

        Self {
            base: self.base.clone(),
            // “the parent subject is set to the value of new subject, if non-null,
            //  or the value of the parent subject of the current evaluation context;
            parent_subject: local
                .new_subject
                .unwrap_or_else(|| self.parent_subject.clone()),
            parent_object: Some(parent_object),
            iri_mappings: local.iri_mappings,
            term_mappings: local.term_mappings,
            default_vocab: local.default_vocab,
            language: local.current_language,
        }
    }
}

// “During the course of processing a number of locally scoped values are needed, as follows:
pub(crate) struct LocalValues<'a> {
    pub context: &'a EvaluationContext,
    pub resolution: TokenResolution,
    pub blank_nodes: &'a BlankNodes,
    // “A skip element flag, which indicates whether the current element can safely be ignored
    //  since it has no relevant RDFa attributes. Note that descendant elements will still be processed.
    pub skip_element: bool,
    // “A new subject value, which once calculated will set the parent subject in an evaluation context.
    pub new_subject: Option<Rc<Node>>,
    // “A value for the typed resource, the source for creating rdf:type relationships to types specified in @typeof.
    pub typed_resource: Option<Rc<Node>>,
    // “A value for the current object resource, the resource to use when creating triples that have a resource object.
    pub current_object_resource: Option<Rc<Node>>,
    pub current_property_value: Option<String>,
    pub iri_mappings: Rc<PrefixMapping>,
    pub term_mappings: Rc<IndexMap<String, String>>,
    pub default_vocab: Option<String>,
    pub current_language: Option<Rc<LanguageIdentifier>>,
}

impl<'a> LocalValues<'a> {
    pub fn new(
        context: &'a EvaluationContext,
        resolution: TokenResolution,
        blank_nodes: &'a BlankNodes,
    ) -> Self {
        Self {
            context,
            resolution,
            blank_nodes,
            skip_element: false,
            new_subject: None,
            typed_resource: None,
            current_object_resource: None,
            current_property_value: None,
            iri_mappings: context.iri_mappings.clone(),
            term_mappings: context.term_mappings.clone(),
            default_vocab: context.default_vocab.clone(),
            current_language: context.language.clone(),
        }
    }

    pub fn fresh_blank_node(&self) -> Rc<Node> {
        Rc::new(self.blank_nodes.fresh().into())
    }
}
