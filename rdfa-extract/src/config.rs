use std::fmt;
use std::str::FromStr;

use scraper::Html;

use crate::Error;

/// Selects how markup is turned into an element tree.
///
/// Both backends recover from malformed markup; recoverable errors are only
/// logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Full-document tree construction: `<html>`, `<head>` and `<body>` are
    /// implied where missing.
    #[default]
    StrictHtml,
    /// HTML5 fragment tree construction in a `<body>` context: nothing is
    /// implied, and document-level tags in the input are dropped.
    Html5Compliant,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::StrictHtml => "strict-html",
            Backend::Html5Compliant => "html5-compliant",
        }
    }

    /// Fails with [`Error::UpstreamParse`] only when no element tree came out.
    pub(crate) fn parse_document(self, input: &str) -> Result<Html, Error> {
        let doc = match self {
            Backend::StrictHtml => Html::parse_document(input),
            Backend::Html5Compliant => Html::parse_fragment(input),
        };

        for err in &doc.errors {
            tracing::debug!(backend = %self, %err, "recovered from HTML parse error");
        }

        if !doc.tree.root().children().any(|node| node.value().is_element()) {
            return Err(Error::UpstreamParse {
                errors: doc.errors.iter().map(|e| e.to_string()).collect(),
            });
        }

        Ok(doc)
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict-html" => Ok(Backend::StrictHtml),
            "html5-compliant" => Ok(Backend::Html5Compliant),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How `@property`, `@rel`, `@rev` and `@typeof` tokens become IRIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenResolution {
    /// Tokens are resolved against the base as relative references and
    /// `@typeof` tokens are emitted as written. `@prefix` declarations are
    /// recorded but not applied.
    #[default]
    Legacy,
    /// Tokens are expanded as terms, CURIEs or absolute IRIs using the
    /// default vocabulary, term mappings and in-scope prefix mappings
    /// (seeded with the RDFa initial context).
    Curie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub backend: Backend,
    pub resolution: TokenResolution,
    /// Elements nested deeper than this are not processed.
    pub max_depth: usize,
}

impl ExtractorConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 1024;
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            resolution: TokenResolution::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
