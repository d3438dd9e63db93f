//! Per-anonymous-node axiom frames.
//!
//! OWL encodes a compound class definition as a subgraph of anonymous
//! helper nodes: restriction nodes, constructor heads and `rdf:first`/
//! `rdf:rest` list cells. This module expands that subgraph from a class
//! node and decodes every anonymous node into a closed frame shape exactly
//! once, so the decoders in [`crate::decode`] dispatch on structure instead
//! of probing for keys.

use crate::index::AdjacencyIndex;
use crate::vocab::{is_cardinality_facet, owl};
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNode, NamedNodeRef, Term, Triple};
use rustc_hash::{FxHashMap, FxHashSet};

/// The decoded shape of one anonymous node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AxiomFrame {
    /// An RDF list cell.
    ListCell { first: Term, rest: Term },
    /// An `owl:Restriction` node with a recognized filler facet.
    Restriction(RestrictionFrame),
    /// The head node of a boolean constructor; `head` points at the first
    /// list cell.
    Constructor { kind: ConstructorKind, head: Term },
    /// An `owl:complementOf` expression.
    Complement { operand: Term },
    /// Any other shape; `keys` holds the leftover predicate local names for
    /// the ledger.
    Unknown { keys: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstructorKind {
    UnionOf,
    IntersectionOf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RestrictionFrame {
    pub on_property: NamedNode,
    pub kind: RestrictionKind,
    pub filler: Term,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RestrictionKind {
    AllValuesFrom,
    SomeValuesFrom,
    HasSelf,
    HasValue,
    OnClass,
}

impl RestrictionKind {
    fn from_predicate(predicate: NamedNodeRef<'_>) -> Option<Self> {
        if predicate == owl::ALL_VALUES_FROM {
            Some(Self::AllValuesFrom)
        } else if predicate == owl::SOME_VALUES_FROM {
            Some(Self::SomeValuesFrom)
        } else if predicate == owl::HAS_SELF {
            Some(Self::HasSelf)
        } else if predicate == owl::HAS_VALUE {
            Some(Self::HasValue)
        } else if predicate == owl::ON_CLASS {
            Some(Self::OnClass)
        } else {
            None
        }
    }
}

/// The anonymous-node subgraph that encodes one class's definition.
///
/// Holds one [`AxiomFrame`] per reachable anonymous node, the nodes where a
/// cardinality facet was found, and a verbatim snapshot of the consumed
/// triples for the ledger.
#[derive(Debug, Default)]
pub(crate) struct EdgeDictionary {
    frames: FxHashMap<BlankNode, AxiomFrame>,
    roots: Vec<BlankNode>,
    cardinality: Vec<BlankNode>,
    original: Vec<Triple>,
}

impl EdgeDictionary {
    /// Builds the dictionary for one named class: gathers the class's
    /// anonymous out-edge objects, expands every anonymous node reachable
    /// from them and decodes each into a frame.
    pub(crate) fn for_class(class: NamedNodeRef<'_>, index: &AdjacencyIndex) -> Self {
        let class_term = Term::from(class.into_owned());
        let mut roots = Vec::new();
        let mut original = Vec::new();
        for (predicate, object) in index.out_edges(&class_term) {
            if let Term::BlankNode(root) = object {
                roots.push(root.clone());
                original.push(Triple::new(class.into_owned(), predicate.clone(), object.clone()));
            }
        }

        let mut frames = FxHashMap::default();
        let mut cardinality = Vec::new();
        for node in expand_anonymous(index, roots.clone()) {
            let edges = index.out_edges(&Term::from(node.clone()));
            if edges.is_empty() {
                continue;
            }
            for (predicate, object) in edges {
                original.push(Triple::new(node.clone(), predicate.clone(), object.clone()));
            }
            let (frame, has_cardinality) = classify(edges);
            if has_cardinality {
                cardinality.push(node.clone());
            }
            frames.insert(node, frame);
        }
        Self { frames, roots, cardinality, original }
    }

    pub(crate) fn frame(&self, node: &BlankNode) -> Option<&AxiomFrame> {
        self.frames.get(node)
    }

    /// The anonymous nodes attached directly to the class.
    pub(crate) fn roots(&self) -> &[BlankNode] {
        &self.roots
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Anonymous nodes that carried a cardinality facet.
    pub(crate) fn cardinality_nodes(&self) -> &[BlankNode] {
        &self.cardinality
    }

    /// The OWL-encoded triples this dictionary was built from.
    pub(crate) fn original_triples(&self) -> &[Triple] {
        &self.original
    }

    /// Whether any frame is an `owl:complementOf` expression.
    pub(crate) fn complement_nodes(&self) -> Vec<BlankNode> {
        self.frames
            .iter()
            .filter(|(_, frame)| matches!(frame, AxiomFrame::Complement { .. }))
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Restriction nodes whose `owl:onProperty` IRI contains one of the
    /// negation markers.
    pub(crate) fn negation_nodes(&self, markers: &[String]) -> Vec<BlankNode> {
        self.frames
            .iter()
            .filter(|(_, frame)| {
                matches!(frame, AxiomFrame::Restriction(restriction)
                    if markers.iter().any(|m| restriction.on_property.as_str().contains(m.as_str())))
            })
            .map(|(node, _)| node.clone())
            .collect()
    }
}

/// Collects every anonymous node transitively reachable from `roots`
/// through out-edges.
///
/// Iterative worklist with a visited set: cyclic anonymous structures
/// terminate, no node is expanded twice, and the result size is bounded by
/// the number of anonymous nodes in the graph.
pub(crate) fn expand_anonymous(index: &AdjacencyIndex, roots: Vec<BlankNode>) -> Vec<BlankNode> {
    let mut seen = FxHashSet::default();
    let mut stack = roots;
    let mut reachable = Vec::new();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.clone()) {
            continue;
        }
        for (_, object) in index.out_edges(&Term::from(node.clone())) {
            if let Term::BlankNode(next) = object {
                if !seen.contains(next) {
                    stack.push(next.clone());
                }
            }
        }
        reachable.push(node);
    }
    reachable
}

/// Decodes the out-edges of one anonymous node into a frame, flagging (and
/// excluding) any cardinality facet so that qualified-cardinality
/// restrictions still decode through `owl:onClass`.
fn classify(edges: &[(NamedNode, Term)]) -> (AxiomFrame, bool) {
    let mut saw_cardinality = false;
    let mut is_restriction = false;
    let mut on_property = None;
    let mut filler = None;
    let mut first = None;
    let mut rest = None;
    let mut constructor = None;
    let mut complement = None;

    for (predicate, object) in edges {
        let predicate = predicate.as_ref();
        if is_cardinality_facet(predicate) {
            saw_cardinality = true;
            continue;
        }
        if predicate == owl::COMPLEMENT_OF {
            complement = Some(object.clone());
        } else if predicate == owl::UNION_OF {
            constructor = Some((ConstructorKind::UnionOf, object.clone()));
        } else if predicate == owl::INTERSECTION_OF {
            constructor = Some((ConstructorKind::IntersectionOf, object.clone()));
        } else if predicate == owl::ON_PROPERTY {
            if let Term::NamedNode(property) = object {
                on_property = Some(property.clone());
            }
        } else if predicate == rdf::TYPE {
            if let Term::NamedNode(class) = object {
                if class.as_ref() == owl::RESTRICTION {
                    is_restriction = true;
                }
            }
        } else if predicate == rdf::FIRST {
            first = Some(object.clone());
        } else if predicate == rdf::REST {
            rest = Some(object.clone());
        } else if let Some(kind) = RestrictionKind::from_predicate(predicate) {
            filler = Some((kind, object.clone()));
        }
    }

    let frame = if let Some(operand) = complement {
        AxiomFrame::Complement { operand }
    } else if let Some((kind, head)) = constructor {
        AxiomFrame::Constructor { kind, head }
    } else if is_restriction {
        match (on_property, filler) {
            (Some(on_property), Some((kind, filler))) => {
                AxiomFrame::Restriction(RestrictionFrame { on_property, kind, filler })
            }
            // A restriction without a recognized filler, e.g. an
            // unqualified cardinality: nothing left to decode.
            _ => AxiomFrame::Unknown { keys: misc_keys(edges) },
        }
    } else if let (Some(first), Some(rest)) = (first, rest) {
        AxiomFrame::ListCell { first, rest }
    } else {
        AxiomFrame::Unknown { keys: misc_keys(edges) }
    };
    (frame, saw_cardinality)
}

/// Predicate local names of a frame that could not be decoded, minus the
/// structural ones, for the `miscIgnored` ledger record.
fn misc_keys(edges: &[(NamedNode, Term)]) -> Vec<String> {
    edges
        .iter()
        .filter(|(predicate, _)| {
            let predicate = predicate.as_ref();
            predicate != rdf::TYPE
                && predicate != rdf::FIRST
                && predicate != rdf::REST
                && predicate != owl::ON_PROPERTY
        })
        .map(|(predicate, _)| local_name(predicate.as_str()))
        .collect()
}

fn local_name(iri: &str) -> String {
    match iri.rsplit_once('#') {
        Some((_, local)) => local.to_owned(),
        None => match iri.rsplit_once('/') {
            Some((_, local)) => local.to_owned(),
            None => iri.to_owned(),
        },
    }
}
