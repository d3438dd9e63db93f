//! Directed multigraph view of an RDF graph.

use oxrdf::{Graph, NamedNode, Subject, Term};
use rustc_hash::FxHashMap;

/// A node-keyed adjacency view of an [`oxrdf::Graph`].
///
/// The index is a snapshot built in one pass over the graph: out-edges and
/// in-edges of every node, in graph iteration order. It does not track
/// later mutations of the graph it was built from and must be rebuilt after
/// any, which is why the decoding pipeline freezes the graph before
/// building it.
///
/// Usage example:
/// ```
/// use oxnets::AdjacencyIndex;
/// use oxrdf::{Graph, NamedNodeRef, Term, TripleRef};
///
/// let ex = NamedNodeRef::new("http://example.com")?;
/// let mut graph = Graph::default();
/// graph.insert(TripleRef::new(ex, ex, ex));
///
/// let index = AdjacencyIndex::new(&graph);
/// assert_eq!(index.out_edges(&Term::from(ex.into_owned())).len(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    out: FxHashMap<Term, Vec<(NamedNode, Term)>>,
    incoming: FxHashMap<Term, Vec<(Subject, NamedNode)>>,
}

impl AdjacencyIndex {
    /// Builds the index from every triple of `graph`.
    pub fn new(graph: &Graph) -> Self {
        let mut out: FxHashMap<Term, Vec<(NamedNode, Term)>> = FxHashMap::default();
        let mut incoming: FxHashMap<Term, Vec<(Subject, NamedNode)>> = FxHashMap::default();
        for triple in graph.iter() {
            let subject = triple.subject.into_owned();
            let predicate = triple.predicate.into_owned();
            let object = triple.object.into_owned();
            out.entry(Term::from(subject.clone()))
                .or_default()
                .push((predicate.clone(), object.clone()));
            incoming.entry(object).or_default().push((subject, predicate));
        }
        Self { out, incoming }
    }

    /// The out-edges of `node` as `(predicate, object)` pairs.
    pub fn out_edges(&self, node: &Term) -> &[(NamedNode, Term)] {
        self.out.get(node).map_or(&[], Vec::as_slice)
    }

    /// The in-edges of `node` as `(subject, predicate)` pairs.
    pub fn in_edges(&self, node: &Term) -> &[(Subject, NamedNode)] {
        self.incoming.get(node).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, NamedNode, TripleRef};

    #[test]
    fn out_and_in_edges_are_indexed() {
        let s = NamedNode::new("http://example.com/s").unwrap();
        let p = NamedNode::new("http://example.com/p").unwrap();
        let b = BlankNode::default();

        let mut graph = Graph::new();
        graph.insert(TripleRef::new(s.as_ref(), p.as_ref(), b.as_ref()));
        graph.insert(TripleRef::new(b.as_ref(), p.as_ref(), s.as_ref()));

        let index = AdjacencyIndex::new(&graph);
        let s_term = Term::from(s.clone());
        let b_term = Term::from(b.clone());

        assert_eq!(index.out_edges(&s_term), &[(p.clone(), b_term.clone())]);
        assert_eq!(index.out_edges(&b_term), &[(p.clone(), s_term.clone())]);
        assert_eq!(index.in_edges(&b_term), &[(Subject::from(s.clone()), p.clone())]);
        assert_eq!(index.in_edges(&s_term), &[(Subject::from(b), p)]);
    }

    #[test]
    fn unknown_node_has_no_edges() {
        let s = NamedNode::new("http://example.com/s").unwrap();
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(s.as_ref(), s.as_ref(), s.as_ref()));

        let index = AdjacencyIndex::new(&graph);
        let other = Term::from(NamedNode::new("http://example.com/other").unwrap());
        assert!(index.out_edges(&other).is_empty());
        assert!(index.in_edges(&other).is_empty());
    }
}
