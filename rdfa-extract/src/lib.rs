//! Extraction of RDFa triples from HTML.
//!
//! The document is walked in document order and every element is evaluated
//! against a context inherited from its parent, following the RDFa 1.1
//! processing sequence for subjects, `@typeof`, `@rel`/`@rev`, `@property`
//! and `@vocab`.
//!
//! ```
//! let extraction = rdfa_extract::extract(
//!     r##"<div typeof="Person" about="#me"><span property="name">Bob</span></div>"##,
//!     "http://ex.com/",
//! )?;
//! assert_eq!(extraction.tuples.len(), 2);
//! # Ok::<(), rdfa_extract::Error>(())
//! ```

mod config;
mod context;
mod element;
mod processor;
mod resolve;
mod triple;
pub mod vocab;

pub use config::{Backend, ExtractorConfig, TokenResolution};
pub use element::Element;
pub use processor::{Extractor, Tuples};
pub use triple::{BlankNode, Extraction, Node, Term, Triple};
pub use vocab::{initial_context_prefixes, initial_context_terms};

/// Extracts all triples from `input` using the default configuration.
pub fn extract(input: &str, base: &str) -> Result<Extraction, Error> {
    Extractor::default().extract(input, base)
}

#[derive(derive_more::Error, derive_more::Display, Debug)]
pub enum Error {
    #[display("unknown parsing backend `{_0}` (expected `strict-html` or `html5-compliant`)")]
    UnknownBackend(#[error(not(source))] String),

    #[display("IRI parse error: `{iri}`")]
    IriParseError {
        source: oxiri::IriParseError,
        iri: String,
    },

    #[display("document could not be parsed: {}", errors.join("; "))]
    UpstreamParse { errors: Vec<String> },

    #[display("not an absolute IRI: `{iri}`")]
    InvalidIri { iri: String },
}
