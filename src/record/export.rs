//! Record Export
//!
//! JSON encodings of a match record for downstream consumers.

use std::io::Write;
use serde::Serialize;

use crate::error::SimResult;
use crate::record::match_record::{MatchRecord, RoundRecord};

/// One JSON-lines row: a round tagged with its match.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundLine<'a> {
    match_id: &'a str,
    source: &'a str,
    seed: u32,
    tick_rate: u32,
    #[serde(flatten)]
    round: &'a RoundRecord,
}

/// Compact JSON document.
pub fn to_json(record: &MatchRecord) -> SimResult<String> {
    Ok(serde_json::to_string(record)?)
}

/// Indented JSON document.
pub fn to_json_pretty(record: &MatchRecord) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// One line per round, each carrying the match id and source.
pub fn to_json_lines(record: &MatchRecord) -> SimResult<String> {
    let mut out = String::new();
    for round in &record.rounds {
        let line = RoundLine {
            match_id: &record.match_id,
            source: &record.source,
            seed: record.seed,
            tick_rate: record.tick_rate,
            round,
        };
        out.push_str(&serde_json::to_string(&line)?);
        out.push('\n');
    }
    Ok(out)
}

/// Stream the compact document to a writer.
pub fn write_json<W: Write>(record: &MatchRecord, writer: W) -> SimResult<()> {
    serde_json::to_writer(writer, record)?;
    Ok(())
}

/// Parse a document produced by [`to_json`] or [`to_json_pretty`].
pub fn from_json(input: &str) -> SimResult<MatchRecord> {
    Ok(serde_json::from_str(input)?)
}
