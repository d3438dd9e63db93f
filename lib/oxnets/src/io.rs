//! Output writers for the decoded graph and the ledger.

use crate::error::OwlNetsError;
use crate::ledger::DecodingLedger;
use oxrdf::Graph;
use std::io::Write;

/// Writes the graph as N-Triples, one statement per line.
pub fn write_ntriples(graph: &Graph, writer: &mut impl Write) -> Result<(), OwlNetsError> {
    for triple in graph.iter() {
        writeln!(writer, "{triple} .")?;
    }
    Ok(())
}

/// Writes the ledger as pretty-printed JSON.
pub fn write_ledger_json(
    ledger: &DecodingLedger,
    writer: &mut impl Write,
) -> Result<(), OwlNetsError> {
    serde_json::to_writer_pretty(writer, ledger)?;
    Ok(())
}
