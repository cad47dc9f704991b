use itertools::Itertools;
use oxrdf::Graph;
use rdfa_extract::{Extraction, Extractor, ExtractorConfig, TokenResolution};

#[allow(unused)]
pub const BASE: &str = "http://example.org/";

#[allow(unused)]
pub fn curie_extractor() -> Extractor {
    Extractor::new(ExtractorConfig {
        resolution: TokenResolution::Curie,
        ..ExtractorConfig::default()
    })
}

/// One triple per line, in emission order.
#[allow(unused)]
pub fn render(extraction: &Extraction) -> String {
    extraction.tuples.iter().join("\n")
}

/// Sorted N-Triples lines with canonical blank node labels, so that graphs
/// can be compared as text.
pub fn canonical_lines(graph: &Graph) -> String {
    let idents = rdf_canon::issue_graph_with::<sha2::Sha256>(graph, &Default::default()).unwrap();
    let graph = rdf_canon::relabel_graph(graph, &idents).unwrap();
    graph.iter().map(|t| t.to_string()).sorted().join("\n")
}

/// Extracts `html` with CURIE resolution and compares the result with `ttl`,
/// ignoring blank node labels and triple order.
#[allow(unused)]
pub fn assert_graph(html: &str, ttl: &str) {
    let extraction = curie_extractor().extract(html, BASE).unwrap();
    let output_graph = extraction.to_graph().unwrap();

    let mut ttl_graph = Graph::new();
    {
        let ttl_rdf = oxttl::TurtleParser::new().for_slice(ttl.as_bytes());
        for triple in ttl_rdf {
            ttl_graph.insert(&triple.unwrap());
        }
    }

    pretty_assertions::assert_eq!(canonical_lines(&output_graph), canonical_lines(&ttl_graph));
}
