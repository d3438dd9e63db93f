//! OWL-NETS decoding for in-memory [`oxrdf`] graphs.
//!
//! OWL encodes compound class definitions (restrictions, unions,
//! intersections, complements) as subgraphs of anonymous nodes. This
//! crate flattens those encodings into plain subject-predicate-object
//! statements, recording every decode, skip and removal decision in an
//! auditable [`DecodingLedger`]. The flattening is intentionally lossy:
//! what cannot be expressed as a single positive edge (complements,
//! negations) is dropped and ledgered instead.
//!
//! Usage example:
//!
//! ```
//! use oxnets::vocab::owl;
//! use oxnets::OwlNets;
//! use oxrdf::vocab::{rdf, rdfs};
//! use oxrdf::{BlankNode, Graph, NamedNode, TripleRef};
//!
//! let class = NamedNode::new("http://purl.obolibrary.org/obo/GO_0000785")?;
//! let property = NamedNode::new("http://purl.obolibrary.org/obo/BFO_0000050")?;
//! let filler = NamedNode::new("http://purl.obolibrary.org/obo/GO_0005694")?;
//! let restriction = BlankNode::default();
//!
//! let mut graph = Graph::new();
//! graph.insert(TripleRef::new(class.as_ref(), rdf::TYPE, owl::CLASS));
//! graph.insert(TripleRef::new(filler.as_ref(), rdf::TYPE, owl::CLASS));
//! graph.insert(TripleRef::new(property.as_ref(), rdf::TYPE, owl::OBJECT_PROPERTY));
//! graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, restriction.as_ref()));
//! graph.insert(TripleRef::new(restriction.as_ref(), rdf::TYPE, owl::RESTRICTION));
//! graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_PROPERTY, property.as_ref()));
//! graph.insert(TripleRef::new(restriction.as_ref(), owl::SOME_VALUES_FROM, filler.as_ref()));
//!
//! let output = OwlNets::new(graph)?.run();
//! assert!(output
//!     .graph
//!     .contains(TripleRef::new(class.as_ref(), property.as_ref(), filler.as_ref())));
//! assert_eq!(output.stats.triples, 1);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
mod decode;
mod error;
mod filter;
mod frame;
mod index;
pub mod io;
mod ledger;
mod pipeline;
mod remap;
mod stats;
pub mod vocab;

pub use crate::error::OwlNetsError;
pub use crate::filter::SemanticFilter;
pub use crate::index::AdjacencyIndex;
pub use crate::ledger::{DecodingLedger, LedgerSummary, TripleRecord};
pub use crate::pipeline::{ConstructionApproach, OwlNets, OwlNetsConfig, OwlNetsOutput};
pub use crate::stats::GraphStats;
