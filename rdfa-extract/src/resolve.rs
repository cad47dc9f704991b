//! Turning attribute values into IRIs and blank nodes.
//!
//! Nothing here fails: a value that cannot be resolved is reported through
//! `tracing` and treated as absent by the caller.

use curie::{Curie, ExpansionError};
use oxiri::{Iri, IriParseError};

use crate::config::TokenResolution;
use crate::context::LocalValues;
use crate::triple::{Node, Term};

enum CurieError {
    EmptyCurie,
    InvalidIri(String),
    Expansion(ExpansionError),
}

struct NotCurie;
struct NotTerm;

impl LocalValues<'_> {
    /// Resolves a reference against the base of the current context.
    pub fn resolve_relative_iri(&self, value: &str) -> Result<String, IriParseError> {
        Ok(self.context.base.resolve(value)?.into_inner())
    }

    /// Like [`Self::resolve_relative_iri`], but an invalid reference is
    /// reported and dropped.
    pub fn resolve_reference(&self, value: &str) -> Option<String> {
        match self.resolve_relative_iri(value) {
            Ok(iri) => Some(iri),
            Err(err) => {
                report_invalid_iri(err, value);
                None
            }
        }
    }

    /// IRI-typed attributes (`@href`, `@src`).
    pub fn resolve_iri(&self, value: &str) -> Option<Node> {
        self.resolve_reference(value).map(Node::Iri)
    }

    /// Resource-typed attributes (`@about`, `@resource`).
    pub fn resolve_resource(&self, value: &str) -> Option<Node> {
        match self.resolution {
            TokenResolution::Legacy => self.resolve_iri(value),
            TokenResolution::Curie => self.safecurie_or_curie_or_iri(value),
        }
    }

    /// One token of `@property`, `@rel` or `@rev`.
    pub fn resolve_predicate(&self, token: &str) -> Option<String> {
        match self.resolution {
            TokenResolution::Legacy => self.resolve_reference(token),
            TokenResolution::Curie => match self.term_or_curie_or_absiri(token)? {
                Node::Iri(iri) => Some(iri),
                Node::Blank(b) => {
                    tracing::warn!(token, %b, "a predicate cannot be a blank node");
                    None
                }
            },
        }
    }

    /// One token of `@typeof`.
    pub fn resolve_type(&self, token: &str) -> Option<Term> {
        match self.resolution {
            TokenResolution::Legacy => Some(Term::Iri(token.to_string())),
            TokenResolution::Curie => self.term_or_curie_or_absiri(token).map(Term::from),
        }
    }

    // When resolving a term, the outcome might be that it _must_ be ignored.
    // This is indicated by returning [`None`].
    fn resolve_term(&self, term: &str) -> Result<Option<String>, NotTerm> {
        // [rdfa-core] 7.5.3
        // > term     ::=  NCNameStartChar termChar*
        // > termChar ::=  ( NameChar - ':' ) | '/'
        let is_term = !term.is_empty()
            && !term.starts_with('/')
            && term
                .split('/')
                .all(|s| rxml_validation::validate_ncname(s).is_ok());

        if !is_term {
            return Err(NotTerm);
        }

        // > If there is a local default vocabulary the IRI is obtained
        // > by concatenating that value and the term.
        if let Some(vocab) = &self.default_vocab {
            return Ok(Some(format!("{vocab}{term}")));
        }

        // > Otherwise, check if the term matches an item in the list of local term mappings.
        // > First compare against the list case-sensitively, and if there is no match then
        // > compare case-insensitively.
        let mapped = self.term_mappings.get(term).cloned().or_else(|| {
            self.term_mappings
                .iter()
                .find_map(|(key, iri)| key.eq_ignore_ascii_case(term).then(|| iri.clone()))
        });

        if mapped.is_none() {
            // > Otherwise, the term has no associated IRI and MUST be ignored.
            tracing::warn!(term, "unresolved term ignored");
        }

        Ok(mapped)
    }

    /// Resolves a (non-safe) CURIE to an IRI or blank node.
    fn resolve_curie(&self, value: &str) -> Result<Node, CurieError> {
        if value.is_empty() {
            return Err(CurieError::EmptyCurie);
        }

        let curie = match value.split_once(':') {
            Some(("_", label)) => return Ok(Node::Blank(self.blank_nodes.labelled(label))),
            Some((prefix, suffix)) => Curie::new(Some(prefix), suffix),
            None => Curie::new(None, value),
        };

        match self.iri_mappings.expand_curie(&curie) {
            // A prefix may itself be relative, so resolve the expansion against the base.
            Ok(iri) => match self.resolve_relative_iri(&iri) {
                Ok(absolute) => Ok(Node::Iri(absolute)),
                Err(_) => Err(CurieError::InvalidIri(iri)),
            },
            Err(err) => Err(CurieError::Expansion(err)),
        }
    }

    fn resolve_safecurie_or_curie(&self, value: &str) -> Result<Option<Node>, NotCurie> {
        let Some(safe) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) else {
            return self.resolve_curie(value).map(Some).map_err(|_| NotCurie);
        };

        match self.resolve_curie(safe) {
            Ok(node) => Ok(Some(node)),
            // a SafeCURIE that does not resolve MUST be ignored
            Err(CurieError::EmptyCurie | CurieError::Expansion(ExpansionError::MissingDefault)) => {
                Ok(None)
            }
            Err(CurieError::InvalidIri(iri)) => {
                tracing::warn!(value, %iri, "CURIE expanded to an invalid IRI");
                Ok(None)
            }
            Err(CurieError::Expansion(ExpansionError::Invalid)) => {
                tracing::warn!(value, "CURIE prefix is not defined");
                Ok(None)
            }
        }
    }

    fn safecurie_or_curie_or_iri(&self, value: &str) -> Option<Node> {
        match self.resolve_safecurie_or_curie(value) {
            Ok(node) => node,
            Err(NotCurie) => self.resolve_iri(value),
        }
    }

    fn curie_or_absiri(&self, value: &str) -> Option<Node> {
        match self.resolve_curie(value) {
            Ok(node) => Some(node),
            Err(_) => match Iri::parse(value.to_string()) {
                Ok(iri) => Some(Node::Iri(iri.into_inner())),
                Err(err) => {
                    report_invalid_iri(err, value);
                    None
                }
            },
        }
    }

    fn term_or_curie_or_absiri(&self, value: &str) -> Option<Node> {
        match self.resolve_term(value) {
            Ok(iri) => iri.map(Node::Iri),
            Err(NotTerm) => self.curie_or_absiri(value),
        }
    }
}

fn report_invalid_iri(err: IriParseError, value: &str) {
    tracing::warn!(value, %err, "invalid IRI ignored");
}
