use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use crate::Error;

/// An anonymous resource, identified only by a handle issued during one
/// extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(u64);

impl BlankNode {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.0)
    }
}

/// Issues blank nodes for a single run.
///
/// Labelled blank nodes (`_:x` in CURIE position) map to the same handle
/// every time the label is seen within the run.
#[derive(Default)]
pub(crate) struct BlankNodes {
    next: Cell<u64>,
    labelled: RefCell<HashMap<String, BlankNode>>,
}

impl BlankNodes {
    pub fn fresh(&self) -> BlankNode {
        let id = self.next.get();
        self.next.set(id + 1);
        BlankNode(id)
    }

    pub fn labelled(&self, label: &str) -> BlankNode {
        if let Some(node) = self.labelled.borrow().get(label) {
            return *node;
        }

        let node = self.fresh();
        self.labelled.borrow_mut().insert(label.to_string(), node);
        node
    }
}

/// A subject, or an object that is a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(String),
    Blank(BlankNode),
}

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Blank(BlankNode),
    Literal(String),
}

impl From<Node> for Term {
    fn from(node: Node) -> Self {
        match node {
            Node::Iri(iri) => Term::Iri(iri),
            Node::Blank(b) => Term::Blank(b),
        }
    }
}

impl From<BlankNode> for Node {
    fn from(b: BlankNode) -> Self {
        Node::Blank(b)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{iri}>"),
            Node::Blank(b) => fmt::Display::fmt(b, f),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(b) => fmt::Display::fmt(b, f),
            Term::Literal(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Node,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Node, predicate: impl Into<String>, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// The result of extracting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Triples in document order.
    pub tuples: Vec<Triple>,
}

impl Extraction {
    /// Copies the triples into an [`oxrdf::Graph`].
    ///
    /// Fails if any IRI position holds something that is not an absolute IRI,
    /// which is expected for verbatim `@typeof` tokens under
    /// [`TokenResolution::Legacy`](crate::TokenResolution::Legacy).
    pub fn to_graph(&self) -> Result<oxrdf::Graph, Error> {
        let mut graph = oxrdf::Graph::new();
        for triple in &self.tuples {
            let subject: oxrdf::Subject = match &triple.subject {
                Node::Iri(iri) => named_node(iri)?.into(),
                Node::Blank(b) => graph_blank_node(*b).into(),
            };
            let predicate = named_node(&triple.predicate)?;
            let object: oxrdf::Term = match &triple.object {
                Term::Iri(iri) => named_node(iri)?.into(),
                Term::Blank(b) => graph_blank_node(*b).into(),
                Term::Literal(value) => oxrdf::Literal::new_simple_literal(value).into(),
            };
            graph.insert(&oxrdf::Triple::new(subject, predicate, object));
        }

        Ok(graph)
    }
}

fn named_node(iri: &str) -> Result<oxrdf::NamedNode, Error> {
    oxrdf::NamedNode::new(iri).map_err(|_| Error::InvalidIri {
        iri: iri.to_string(),
    })
}

fn graph_blank_node(b: BlankNode) -> oxrdf::BlankNode {
    oxrdf::BlankNode::new_unchecked(format!("b{}", b.0))
}
