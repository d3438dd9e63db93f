//! Summary counts over a decoded graph.

use oxrdf::{Graph, SubjectRef, TermRef};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Triple, node and relation counts for one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub triples: usize,
    pub unique_nodes: usize,
    pub unique_relations: usize,
}

impl GraphStats {
    pub fn new(graph: &Graph) -> Self {
        let mut nodes = FxHashSet::default();
        let mut relations = FxHashSet::default();
        for triple in graph.iter() {
            nodes.insert(match triple.subject {
                SubjectRef::NamedNode(node) => node.as_str().to_owned(),
                SubjectRef::BlankNode(node) => node.to_string(),
            });
            nodes.insert(match triple.object {
                TermRef::NamedNode(node) => node.as_str().to_owned(),
                TermRef::BlankNode(node) => node.to_string(),
                TermRef::Literal(literal) => literal.to_string(),
            });
            relations.insert(triple.predicate.as_str().to_owned());
        }
        Self {
            triples: graph.len(),
            unique_nodes: nodes.len(),
            unique_relations: relations.len(),
        }
    }
}
