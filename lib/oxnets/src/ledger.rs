//! Audit record of every decoding decision.
//!
//! The ledger accumulates monotonically across one run and is never
//! consulted by the decoding algorithm itself. `BTreeMap`/`BTreeSet`
//! storage keeps the serialized output stable across runs.

use oxrdf::{Triple, TripleRef};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A plain-string snapshot of one triple, safe to persist after the
/// source graph (and its blank node identifiers) is gone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TripleRecord {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl From<TripleRef<'_>> for TripleRecord {
    fn from(triple: TripleRef<'_>) -> Self {
        Self {
            subject: subject_string(triple.subject),
            predicate: triple.predicate.as_str().to_owned(),
            object: term_string(triple.object),
        }
    }
}

impl From<&Triple> for TripleRecord {
    fn from(triple: &Triple) -> Self {
        Self::from(triple.as_ref())
    }
}

fn subject_string(subject: oxrdf::SubjectRef<'_>) -> String {
    match subject {
        oxrdf::SubjectRef::NamedNode(node) => node.as_str().to_owned(),
        oxrdf::SubjectRef::BlankNode(node) => node.to_string(),
    }
}

fn term_string(term: oxrdf::TermRef<'_>) -> String {
    match term {
        oxrdf::TermRef::NamedNode(node) => node.as_str().to_owned(),
        oxrdf::TermRef::BlankNode(node) => node.to_string(),
        oxrdf::TermRef::Literal(literal) => literal.value().to_owned(),
    }
}

/// Accumulated decode/skip/removal decisions for one run.
///
/// Keyed categories are keyed by class IRI (or, for non-target-namespace
/// removals, by subject IRI).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodingLedger {
    decoded_classes: BTreeMap<String, Vec<TripleRecord>>,
    cardinality_ignored: BTreeMap<String, Vec<TripleRecord>>,
    complement_of_removed: BTreeMap<String, Vec<TripleRecord>>,
    negation_removed: BTreeMap<String, Vec<TripleRecord>>,
    misc_ignored: BTreeMap<String, Vec<String>>,
    disjoint_with_removed: BTreeSet<TripleRecord>,
    filtered_semantic_triples: BTreeSet<TripleRecord>,
    non_obo_removed: BTreeMap<String, Vec<TripleRecord>>,
    purification_removed: BTreeSet<TripleRecord>,
}

/// Per-category entry counts, the end-of-run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub decoded_classes: usize,
    pub cardinality_ignored: usize,
    pub complement_of_removed: usize,
    pub negation_removed: usize,
    pub misc_ignored: usize,
    pub disjoint_with_removed: usize,
    pub filtered_semantic_triples: usize,
    pub non_obo_removed: usize,
    pub purification_removed: usize,
}

impl DecodingLedger {
    pub(crate) fn record_decoded_class(&mut self, class: &str, original: &[Triple]) {
        self.decoded_classes
            .entry(class.to_owned())
            .or_default()
            .extend(original.iter().map(TripleRecord::from));
    }

    pub(crate) fn record_cardinality(
        &mut self,
        class: &str,
        triples: impl IntoIterator<Item = TripleRecord>,
    ) {
        self.cardinality_ignored.entry(class.to_owned()).or_default().extend(triples);
    }

    pub(crate) fn record_complement_of(
        &mut self,
        class: &str,
        triples: impl IntoIterator<Item = TripleRecord>,
    ) {
        self.complement_of_removed.entry(class.to_owned()).or_default().extend(triples);
    }

    pub(crate) fn record_negation(
        &mut self,
        class: &str,
        triples: impl IntoIterator<Item = TripleRecord>,
    ) {
        self.negation_removed.entry(class.to_owned()).or_default().extend(triples);
    }

    pub(crate) fn record_misc(&mut self, node: &str, keys: impl IntoIterator<Item = String>) {
        self.misc_ignored.entry(node.to_owned()).or_default().extend(keys);
    }

    pub(crate) fn record_disjoint(&mut self, triple: TripleRef<'_>) {
        self.disjoint_with_removed.insert(triple.into());
    }

    pub(crate) fn record_filtered(&mut self, triple: TripleRef<'_>) {
        self.filtered_semantic_triples.insert(triple.into());
    }

    pub(crate) fn record_non_obo(&mut self, subject: &str, triple: TripleRef<'_>) {
        self.non_obo_removed.entry(subject.to_owned()).or_default().push(triple.into());
    }

    pub(crate) fn record_purified(&mut self, triple: TripleRef<'_>) {
        self.purification_removed.insert(triple.into());
    }

    /// Folds another ledger fragment into this one. Per-class decoding
    /// runs in parallel, so each worker fills a private fragment that is
    /// merged afterwards.
    pub(crate) fn merge(&mut self, other: Self) {
        for (class, records) in other.decoded_classes {
            self.decoded_classes.entry(class).or_default().extend(records);
        }
        for (class, records) in other.cardinality_ignored {
            self.cardinality_ignored.entry(class).or_default().extend(records);
        }
        for (class, records) in other.complement_of_removed {
            self.complement_of_removed.entry(class).or_default().extend(records);
        }
        for (class, records) in other.negation_removed {
            self.negation_removed.entry(class).or_default().extend(records);
        }
        for (node, keys) in other.misc_ignored {
            self.misc_ignored.entry(node).or_default().extend(keys);
        }
        self.disjoint_with_removed.extend(other.disjoint_with_removed);
        self.filtered_semantic_triples.extend(other.filtered_semantic_triples);
        for (subject, records) in other.non_obo_removed {
            self.non_obo_removed.entry(subject).or_default().extend(records);
        }
        self.purification_removed.extend(other.purification_removed);
    }

    pub fn decoded_classes(&self) -> &BTreeMap<String, Vec<TripleRecord>> {
        &self.decoded_classes
    }

    pub fn cardinality_ignored(&self) -> &BTreeMap<String, Vec<TripleRecord>> {
        &self.cardinality_ignored
    }

    pub fn complement_of_removed(&self) -> &BTreeMap<String, Vec<TripleRecord>> {
        &self.complement_of_removed
    }

    pub fn negation_removed(&self) -> &BTreeMap<String, Vec<TripleRecord>> {
        &self.negation_removed
    }

    pub fn misc_ignored(&self) -> &BTreeMap<String, Vec<String>> {
        &self.misc_ignored
    }

    pub fn disjoint_with_removed(&self) -> &BTreeSet<TripleRecord> {
        &self.disjoint_with_removed
    }

    pub fn filtered_semantic_triples(&self) -> &BTreeSet<TripleRecord> {
        &self.filtered_semantic_triples
    }

    pub fn non_obo_removed(&self) -> &BTreeMap<String, Vec<TripleRecord>> {
        &self.non_obo_removed
    }

    pub fn purification_removed(&self) -> &BTreeSet<TripleRecord> {
        &self.purification_removed
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            decoded_classes: self.decoded_classes.len(),
            cardinality_ignored: self.cardinality_ignored.len(),
            complement_of_removed: self.complement_of_removed.len(),
            negation_removed: self.negation_removed.len(),
            misc_ignored: self.misc_ignored.len(),
            disjoint_with_removed: self.disjoint_with_removed.len(),
            filtered_semantic_triples: self.filtered_semantic_triples.len(),
            non_obo_removed: self.non_obo_removed.len(),
            purification_removed: self.purification_removed.len(),
        }
    }
}
