//! Per-class decoding: ignorable-construct detection, constructor and
//! restriction decoders, and the relation-defaulting policy.

use crate::frame::{AxiomFrame, EdgeDictionary, RestrictionFrame, RestrictionKind};
use crate::index::AdjacencyIndex;
use crate::ledger::{DecodingLedger, TripleRecord};
use crate::pipeline::OwlNetsConfig;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{BlankNode, Graph, NamedNode, NamedNodeRef, Term, Triple};
use rustc_hash::FxHashSet;

/// Outcome of the ignorable-construct check for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstructVerdict {
    Proceed,
    /// A cardinality facet was recorded; decoding still runs, minus the
    /// facet.
    CardinalityFlagged,
    /// `owl:complementOf` cannot be flattened to a positive edge.
    ComplementOf,
    /// A negation property (e.g. `lacks_part`) would invert the meaning
    /// of a flat edge.
    Negation,
}

/// Classifies a class's edge dictionary before any decoding is attempted.
///
/// Checks run in a fixed order and the first fatal construct wins:
/// cardinality (non-fatal, flagged), then complement, then negation.
pub(crate) fn detect_ignorable(
    class: NamedNodeRef<'_>,
    dict: &EdgeDictionary,
    graph: &Graph,
    config: &OwlNetsConfig,
    ledger: &mut DecodingLedger,
) -> ConstructVerdict {
    let mut verdict = ConstructVerdict::Proceed;
    if !dict.cardinality_nodes().is_empty() {
        ledger.record_cardinality(class.as_str(), node_snapshots(graph, dict.cardinality_nodes()));
        verdict = ConstructVerdict::CardinalityFlagged;
    }
    let complements = dict.complement_nodes();
    if !complements.is_empty() {
        ledger.record_complement_of(class.as_str(), node_snapshots(graph, &complements));
        return ConstructVerdict::ComplementOf;
    }
    let negations = dict.negation_nodes(&config.negation_markers);
    if !negations.is_empty() {
        ledger.record_negation(class.as_str(), node_snapshots(graph, &negations));
        return ConstructVerdict::Negation;
    }
    verdict
}

fn node_snapshots(graph: &Graph, nodes: &[BlankNode]) -> Vec<TripleRecord> {
    nodes
        .iter()
        .flat_map(|node| graph.triples_for_subject(node.as_ref()).map(TripleRecord::from))
        .collect()
}

/// Picks the relation for one decoded constructor member.
///
/// Domain heuristic carried over from the phenotype/quality ontologies
/// this decoder was built for: a member edge pointing at a quality term
/// from a non-quality term gets the configured quality relation,
/// otherwise the relation of the enclosing restriction wins, otherwise
/// `rdfs:subClassOf`. Restriction fillers bypass this policy and use
/// `owl:onProperty` as-is.
pub(crate) fn choose_relation(
    config: &OwlNetsConfig,
    subject: &str,
    object: &str,
    explicit: Option<&NamedNode>,
) -> NamedNode {
    if object.contains(config.quality_marker.as_str())
        && !subject.contains(config.quality_marker.as_str())
    {
        config.quality_relation.clone()
    } else {
        match explicit {
            Some(property) => property.clone(),
            None => rdfs::SUB_CLASS_OF.into_owned(),
        }
    }
}

/// The decoded result for one class: canonical triples plus the ledger
/// fragment produced along the way.
#[derive(Debug, Default)]
pub(crate) struct ClassOutcome {
    pub triples: Vec<Triple>,
    pub ledger: DecodingLedger,
}

/// Runs the full decode state machine for one named class.
pub(crate) fn decode_class(
    graph: &Graph,
    index: &AdjacencyIndex,
    config: &OwlNetsConfig,
    class: NamedNodeRef<'_>,
) -> ClassOutcome {
    let dict = EdgeDictionary::for_class(class, index);
    if dict.is_empty() {
        // No anonymous definition: the class was never OWL-encoded.
        return ClassOutcome::default();
    }
    let mut outcome = ClassOutcome::default();
    match detect_ignorable(class, &dict, graph, config, &mut outcome.ledger) {
        ConstructVerdict::ComplementOf | ConstructVerdict::Negation => return outcome,
        ConstructVerdict::Proceed | ConstructVerdict::CardinalityFlagged => {}
    }

    let mut decoder = ClassDecoder {
        class,
        dict: &dict,
        config,
        visited: FxHashSet::default(),
        triples: FxHashSet::default(),
        ledger: outcome.ledger,
    };
    for root in dict.roots() {
        decoder.decode_node(root, None);
    }
    // Every class that reached decoding is accounted for, even when all of
    // its frames turned out to contribute nothing.
    decoder.ledger.record_decoded_class(class.as_str(), dict.original_triples());
    outcome.ledger = decoder.ledger;
    outcome.triples = decoder.triples.into_iter().collect();
    outcome
}

/// Walks the anonymous subgraph of one class, emitting canonical triples.
///
/// One visited set is shared by every walk so that shared or cyclic
/// structure is decoded at most once and traversal always terminates.
struct ClassDecoder<'a> {
    class: NamedNodeRef<'a>,
    dict: &'a EdgeDictionary,
    config: &'a OwlNetsConfig,
    visited: FxHashSet<BlankNode>,
    triples: FxHashSet<Triple>,
    ledger: DecodingLedger,
}

impl ClassDecoder<'_> {
    fn decode_node(&mut self, node: &BlankNode, relation: Option<&NamedNode>) {
        // Bare list cells go through the chain walk, which tracks visited
        // state per cell itself.
        if let Some(AxiomFrame::ListCell { .. }) = self.dict.frame(node) {
            self.decode_chain(Term::from(node.clone()), relation);
            return;
        }
        if !self.visited.insert(node.clone()) {
            return;
        }
        match self.dict.frame(node).cloned() {
            Some(AxiomFrame::Constructor { head, .. }) => self.decode_chain(head, relation),
            Some(AxiomFrame::Restriction(frame)) => self.decode_restriction(frame),
            Some(AxiomFrame::Unknown { keys }) => {
                self.ledger.record_misc(self.class.as_str(), keys);
            }
            // Complements are vetoed class-wide by the detector.
            _ => {}
        }
    }

    /// Walks a `rdf:first`/`rdf:rest` chain, decoding each member onto the
    /// class.
    fn decode_chain(&mut self, mut cell: Term, relation: Option<&NamedNode>) {
        loop {
            let node = match cell {
                Term::NamedNode(ref end) if end.as_ref() == rdf::NIL => return,
                Term::BlankNode(node) => node,
                _ => return,
            };
            if !self.visited.insert(node.clone()) {
                return;
            }
            match self.dict.frame(&node).cloned() {
                Some(AxiomFrame::ListCell { first, rest }) => {
                    self.decode_member(first, relation);
                    cell = rest;
                }
                Some(AxiomFrame::Restriction(frame)) => {
                    self.decode_restriction(frame);
                    return;
                }
                Some(AxiomFrame::Constructor { head, .. }) => {
                    self.decode_chain(head, relation);
                    return;
                }
                Some(AxiomFrame::Unknown { keys }) => {
                    self.ledger.record_misc(self.class.as_str(), keys);
                    return;
                }
                Some(AxiomFrame::Complement { .. }) | None => return,
            }
        }
    }

    fn decode_member(&mut self, first: Term, relation: Option<&NamedNode>) {
        match first {
            Term::NamedNode(member) => {
                let predicate = choose_relation(
                    self.config,
                    self.class.as_str(),
                    member.as_str(),
                    relation,
                );
                self.emit(predicate, member);
            }
            Term::BlankNode(nested) => self.decode_node(&nested, relation),
            Term::Literal(_) => {
                self.ledger.record_misc(self.class.as_str(), ["first".to_owned()]);
            }
        }
    }

    fn decode_restriction(&mut self, frame: RestrictionFrame) {
        if frame.kind == RestrictionKind::HasSelf {
            self.emit(frame.on_property, self.class.into_owned());
            return;
        }
        match frame.filler {
            // a concrete filler takes the restriction's property as-is
            Term::NamedNode(filler) => self.emit(frame.on_property, filler),
            Term::BlankNode(nested) => self.decode_node(&nested, Some(&frame.on_property)),
            // e.g. hasValue over a literal: nothing expressible as an edge
            Term::Literal(_) => {
                self.ledger.record_misc(self.class.as_str(), [frame.kind.key().to_owned()]);
            }
        }
    }

    fn emit(&mut self, predicate: NamedNode, object: NamedNode) {
        self.triples.insert(Triple::new(self.class.into_owned(), predicate, object));
    }
}

impl RestrictionKind {
    fn key(self) -> &'static str {
        match self {
            Self::AllValuesFrom => "allValuesFrom",
            Self::SomeValuesFrom => "someValuesFrom",
            Self::HasSelf => "hasSelf",
            Self::HasValue => "hasValue",
            Self::OnClass => "onClass",
        }
    }
}
