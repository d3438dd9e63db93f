//! Instance-based construction support: remapping private instances back
//! onto their classes and approach-specific purification.

use crate::index::AdjacencyIndex;
use crate::ledger::DecodingLedger;
use crate::pipeline::{ConstructionApproach, OwlNetsConfig};
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedNode, Subject, SubjectRef, Term, TermRef, Triple};
use rustc_hash::FxHashMap;

const W3_NAMESPACE: &str = "http://www.w3.org/";

/// Rewrites every edge incident to a private `owl:NamedIndividual` onto
/// the class it is typed as, and drops the individual's own edges.
///
/// An individual with no discoverable class typing is surfaced in the
/// ledger and left untouched.
pub(crate) fn remap_instances(
    graph: &Graph,
    config: &OwlNetsConfig,
    ledger: &mut DecodingLedger,
) -> Graph {
    let index = AdjacencyIndex::new(graph);
    let mut classes: FxHashMap<String, NamedNode> = FxHashMap::default();
    for subject in graph.subjects_for_predicate_object(rdf::TYPE, owl::NAMED_INDIVIDUAL) {
        let SubjectRef::NamedNode(instance) = subject else {
            continue;
        };
        if !instance.as_str().contains(config.instance_marker.as_str()) {
            continue;
        }
        let class = index
            .out_edges(&Term::from(instance.into_owned()))
            .iter()
            .find_map(|(predicate, object)| match object {
                Term::NamedNode(class)
                    if predicate.as_ref() == rdf::TYPE
                        && !class.as_str().contains(config.instance_marker.as_str())
                        && !class.as_str().starts_with(W3_NAMESPACE) =>
                {
                    Some(class.clone())
                }
                _ => None,
            });
        match class {
            Some(class) => {
                classes.insert(instance.as_str().to_owned(), class);
            }
            // keyed by instance IRI, unlike the class-keyed decode records
            None => {
                ledger.record_misc(
                    instance.as_str(),
                    ["instance without class typing".to_owned()],
                );
            }
        }
    }

    let mut result = Graph::new();
    for triple in graph.iter() {
        let subject_class = match triple.subject {
            SubjectRef::NamedNode(node) => classes.get(node.as_str()),
            SubjectRef::BlankNode(_) => None,
        };
        let object_class = match triple.object {
            TermRef::NamedNode(node) => classes.get(node.as_str()),
            _ => None,
        };
        if subject_class.is_none() && object_class.is_none() {
            result.insert(triple);
            continue;
        }
        // Only target-namespace relations survive the rewrite; typing and
        // other support edges of the instance are dropped with it.
        if !predicate_in_namespace(triple.predicate.as_str(), config) {
            continue;
        }
        let subject: Subject = match subject_class {
            Some(class) => class.clone().into(),
            None => triple.subject.into_owned(),
        };
        let object: Term = match object_class {
            Some(class) => class.clone().into(),
            None => triple.object.into_owned(),
        };
        result.insert(Triple::new(subject, triple.predicate.into_owned(), object).as_ref());
    }
    result
}

fn predicate_in_namespace(predicate: &str, config: &OwlNetsConfig) -> bool {
    match config.target_namespace.as_deref() {
        Some(namespace) => predicate.contains(namespace),
        None => true,
    }
}

/// Prunes residual edges inconsistent with the chosen construction
/// approach. With [`ConstructionApproach::None`] this is the identity.
pub(crate) fn purify(
    graph: Graph,
    approach: ConstructionApproach,
    ledger: &mut DecodingLedger,
) -> Graph {
    let pruned_predicate = match approach {
        ConstructionApproach::None => return graph,
        // subclass builds carry no membership edges
        ConstructionApproach::SubclassBased => rdf::TYPE,
        // instance builds carry no hierarchy edges
        ConstructionApproach::InstanceBased => rdfs::SUB_CLASS_OF,
    };
    let mut kept = Graph::new();
    for triple in graph.iter() {
        if triple.predicate == pruned_predicate {
            ledger.record_purified(triple);
        } else {
            kept.insert(triple);
        }
    }
    kept
}
