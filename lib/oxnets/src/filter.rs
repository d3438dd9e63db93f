//! Semantic cleanup passes: the pre/post semantic filter, disjoint-axiom
//! removal and the optional target-namespace sweep.

use crate::ledger::DecodingLedger;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, Subject, SubjectRef, TermRef, TripleRef};
use rustc_hash::FxHashSet;

/// Keeps only triples that state something about ontology entities rather
/// than OWL support machinery.
///
/// The type index is built once from the source graph, so applying the
/// same filter again to its own output changes nothing.
pub struct SemanticFilter {
    class_like: FxHashSet<String>,
    object_properties: FxHashSet<String>,
    annotation_properties: FxHashSet<String>,
}

impl SemanticFilter {
    pub fn new(graph: &Graph) -> Self {
        let mut class_like = FxHashSet::default();
        for kind in [owl::CLASS, owl::NAMED_INDIVIDUAL] {
            for subject in graph.subjects_for_predicate_object(rdf::TYPE, kind) {
                if let SubjectRef::NamedNode(node) = subject {
                    class_like.insert(node.as_str().to_owned());
                }
            }
        }
        let mut object_properties = FxHashSet::default();
        for subject in graph.subjects_for_predicate_object(rdf::TYPE, owl::OBJECT_PROPERTY) {
            if let SubjectRef::NamedNode(node) = subject {
                object_properties.insert(node.as_str().to_owned());
            }
        }
        let mut annotation_properties = FxHashSet::default();
        for subject in graph.subjects_for_predicate_object(rdf::TYPE, owl::ANNOTATION_PROPERTY) {
            if let SubjectRef::NamedNode(node) = subject {
                annotation_properties.insert(node.as_str().to_owned());
            }
        }
        Self { class_like, object_properties, annotation_properties }
    }

    /// Whether one triple survives the filter: subject and object must be
    /// fragment-free IRIs typed `owl:Class` or `owl:NamedIndividual`, and
    /// the predicate must be `rdfs:subClassOf`, `rdf:type`, or a
    /// non-annotation object property.
    pub fn keeps(&self, triple: TripleRef<'_>) -> bool {
        let subject = match triple.subject {
            SubjectRef::NamedNode(node) => node,
            SubjectRef::BlankNode(_) => return false,
        };
        let object = match triple.object {
            TermRef::NamedNode(node) => node,
            _ => return false,
        };
        if subject.as_str().contains('#') || object.as_str().contains('#') {
            return false;
        }
        if !self.class_like.contains(subject.as_str())
            || !self.class_like.contains(object.as_str())
        {
            return false;
        }
        if triple.predicate == rdfs::SUB_CLASS_OF || triple.predicate == rdf::TYPE {
            return true;
        }
        self.object_properties.contains(triple.predicate.as_str())
            && !self.annotation_properties.contains(triple.predicate.as_str())
    }

    /// Returns a new graph with every non-surviving triple dropped and
    /// recorded.
    pub fn filter(&self, graph: &Graph, ledger: &mut DecodingLedger) -> Graph {
        let mut kept = Graph::new();
        for triple in graph.iter() {
            if self.keeps(triple) {
                kept.insert(triple);
            } else {
                ledger.record_filtered(triple);
            }
        }
        kept
    }
}

/// Removes every triple whose subject asserts or annotates
/// `owl:disjointWith`, recording the removals.
pub(crate) fn remove_disjoint_axioms(graph: &Graph, ledger: &mut DecodingLedger) -> Graph {
    let mut disjoint_subjects: FxHashSet<Subject> = FxHashSet::default();
    for triple in graph.iter() {
        if triple.predicate == owl::DISJOINT_WITH
            || triple.object == TermRef::from(owl::DISJOINT_WITH)
        {
            disjoint_subjects.insert(triple.subject.into_owned());
        }
    }
    let mut kept = Graph::new();
    for triple in graph.iter() {
        if disjoint_subjects.contains(&triple.subject.into_owned()) {
            ledger.record_disjoint(triple);
        } else {
            kept.insert(triple);
        }
    }
    kept
}

/// Drops triples whose subject or object lies outside the target
/// namespace, keying the removals by subject.
pub(crate) fn remove_outside_namespace(
    graph: &Graph,
    namespace: &str,
    ledger: &mut DecodingLedger,
) -> Graph {
    let mut kept = Graph::new();
    for triple in graph.iter() {
        let inside = match (triple.subject, triple.object) {
            (SubjectRef::NamedNode(subject), TermRef::NamedNode(object)) => {
                subject.as_str().contains(namespace) && object.as_str().contains(namespace)
            }
            _ => false,
        };
        if inside {
            kept.insert(triple);
        } else {
            ledger.record_non_obo(&subject_key(triple), triple);
        }
    }
    kept
}

fn subject_key(triple: TripleRef<'_>) -> String {
    match triple.subject {
        SubjectRef::NamedNode(node) => node.as_str().to_owned(),
        SubjectRef::BlankNode(node) => node.to_string(),
    }
}
