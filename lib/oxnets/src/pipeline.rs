//! The OWL-NETS run itself: configuration, class worklist and the staged
//! pipeline from raw ontology graph to decoded output.

use crate::decode::{decode_class, ClassOutcome};
use crate::error::OwlNetsError;
use crate::filter::{remove_disjoint_axioms, remove_outside_namespace, SemanticFilter};
use crate::index::AdjacencyIndex;
use crate::ledger::DecodingLedger;
use crate::remap::{purify, remap_instances};
use crate::stats::GraphStats;
use crate::vocab::{obo, owl};
use oxrdf::vocab::rdf;
use oxrdf::{Graph, NamedNode, SubjectRef};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rustc_hash::FxHashSet;
use std::str::FromStr;

/// How the knowledge graph was originally built. Governs instance
/// remapping and purification only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstructionApproach {
    #[default]
    None,
    SubclassBased,
    InstanceBased,
}

impl FromStr for ConstructionApproach {
    type Err = OwlNetsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "subclass" => Ok(Self::SubclassBased),
            "instance" => Ok(Self::InstanceBased),
            _ => Err(OwlNetsError::UnknownApproach(value.to_owned())),
        }
    }
}

/// Tuning knobs for one decode run.
///
/// The defaults match the OBO Foundry ontologies this decoder was built
/// for: the OBO target namespace, the PATO quality heuristic and the
/// PheKnowLator `pkt` instance marker.
#[derive(Debug, Clone)]
pub struct OwlNetsConfig {
    pub(crate) approach: ConstructionApproach,
    pub(crate) target_namespace: Option<String>,
    pub(crate) quality_marker: String,
    pub(crate) quality_relation: NamedNode,
    pub(crate) negation_markers: Vec<String>,
    pub(crate) instance_marker: String,
}

impl Default for OwlNetsConfig {
    fn default() -> Self {
        Self {
            approach: ConstructionApproach::None,
            target_namespace: Some(obo::NAMESPACE.to_owned()),
            quality_marker: "PATO".to_owned(),
            quality_relation: obo::HAS_QUALITY.into_owned(),
            negation_markers: vec!["lacks_part".to_owned()],
            instance_marker: "pkt".to_owned(),
        }
    }
}

impl OwlNetsConfig {
    pub fn with_approach(mut self, approach: ConstructionApproach) -> Self {
        self.approach = approach;
        self
    }

    /// The namespace the final sweep restricts subjects and objects to.
    /// `None` disables the sweep.
    pub fn with_target_namespace(mut self, namespace: Option<String>) -> Self {
        self.target_namespace = namespace;
        self
    }

    /// The IRI substring that marks quality terms, and the relation used
    /// for edges pointing at them.
    pub fn with_quality_relation(mut self, marker: String, relation: NamedNode) -> Self {
        self.quality_marker = marker;
        self.quality_relation = relation;
        self
    }

    /// IRI substrings of `owl:onProperty` values that denote negation.
    pub fn with_negation_markers(mut self, markers: Vec<String>) -> Self {
        self.negation_markers = markers;
        self
    }

    /// The IRI substring that marks private instance individuals.
    pub fn with_instance_marker(mut self, marker: String) -> Self {
        self.instance_marker = marker;
        self
    }
}

/// One OWL-NETS decode run over an in-memory ontology graph.
pub struct OwlNets {
    graph: Graph,
    classes: Vec<NamedNode>,
    config: OwlNetsConfig,
}

/// The decoded graph, the full audit ledger and summary statistics.
pub struct OwlNetsOutput {
    pub graph: Graph,
    pub ledger: DecodingLedger,
    pub stats: GraphStats,
}

impl OwlNets {
    pub fn new(graph: Graph) -> Result<Self, OwlNetsError> {
        Self::with_config(graph, OwlNetsConfig::default())
    }

    pub fn with_config(graph: Graph, config: OwlNetsConfig) -> Result<Self, OwlNetsError> {
        if graph.is_empty() {
            return Err(OwlNetsError::EmptyGraph);
        }
        let classes = ontology_classes(&graph);
        Ok(Self { graph, classes, config })
    }

    /// The deduplicated worklist of named ontology classes.
    pub fn classes(&self) -> &[NamedNode] {
        &self.classes
    }

    /// Runs the full pipeline. Each stage consumes its input graph and
    /// produces a new one; the ledger is threaded through as the sole
    /// accumulator.
    pub fn run(self) -> OwlNetsOutput {
        let mut ledger = DecodingLedger::default();
        let graph = remove_disjoint_axioms(&self.graph, &mut ledger);
        let graph = match self.config.approach {
            ConstructionApproach::InstanceBased => {
                remap_instances(&graph, &self.config, &mut ledger)
            }
            _ => graph,
        };

        // The filter's type index comes from the pre-decode graph, so the
        // same filter instance serves both passes.
        let filter = SemanticFilter::new(&graph);
        let mut combined = filter.filter(&graph, &mut ledger);

        let index = AdjacencyIndex::new(&graph);
        let outcomes: Vec<ClassOutcome> = self
            .classes
            .par_iter()
            .map(|class| decode_class(&graph, &index, &self.config, class.as_ref()))
            .collect();
        let mut decoded = Graph::new();
        for outcome in outcomes {
            for triple in &outcome.triples {
                decoded.insert(triple);
            }
            ledger.merge(outcome.ledger);
        }
        let decoded = filter.filter(&decoded, &mut ledger);
        for triple in decoded.iter() {
            combined.insert(triple);
        }

        let combined = match self.config.target_namespace.as_deref() {
            Some(namespace) => remove_outside_namespace(&combined, namespace, &mut ledger),
            None => combined,
        };
        let graph = purify(combined, self.config.approach, &mut ledger);
        let stats = GraphStats::new(&graph);
        OwlNetsOutput { graph, ledger, stats }
    }
}

/// Named subjects of `rdf:type owl:Class`, deduplicated and ordered.
fn ontology_classes(graph: &Graph) -> Vec<NamedNode> {
    let mut seen = FxHashSet::default();
    let mut classes = Vec::new();
    for subject in graph.subjects_for_predicate_object(rdf::TYPE, owl::CLASS) {
        if let SubjectRef::NamedNode(class) = subject {
            if seen.insert(class.as_str().to_owned()) {
                classes.push(class.into_owned());
            }
        }
    }
    classes.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
    classes
}
