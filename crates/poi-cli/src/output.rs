//! Output formatting for CLI results.
//!
//! Every command writes through these helpers so `--format` is honoured
//! uniformly. Text output is a fixed-width table; JSON output mirrors the
//! HTTP service bodies (`{"results": [...]}` for lists, the bare record
//! otherwise).

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use poi_lib::{Poi, PoiId};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
struct ResultList<'a> {
    results: &'a [Poi],
}

#[derive(Serialize)]
struct Deleted {
    deleted_id: PoiId,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:>6}  {:<24} {:>12} {:>12}", "ID", "Name", "X", "Y")
}

fn write_row<W: Write>(out: &mut W, poi: &Poi) -> io::Result<()> {
    writeln!(
        out,
        "{:>6}  {:<24} {:>12.2} {:>12.2}",
        poi.id, poi.name, poi.x, poi.y
    )
}

/// Write a list of POIs under `title`.
pub fn write_pois<W: Write>(
    out: &mut W,
    title: &str,
    pois: &[Poi],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &ResultList { results: pois }),
        OutputFormat::Text => {
            if pois.is_empty() {
                return writeln!(out, "No points of interest found.");
            }
            writeln!(out, "{} ({}):", title, pois.len())?;
            write_header(out)?;
            for poi in pois {
                write_row(out, poi)?;
            }
            Ok(())
        }
    }
}

/// Write a single POI, prefixed in text mode by `action` (e.g. "Created").
pub fn write_poi<W: Write>(
    out: &mut W,
    action: &str,
    poi: &Poi,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, poi),
        OutputFormat::Text => writeln!(
            out,
            "{} POI {}: {} at ({}, {})",
            action, poi.id, poi.name, poi.x, poi.y
        ),
    }
}

/// Write the confirmation for a deleted POI.
pub fn write_deleted<W: Write>(out: &mut W, id: PoiId, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &Deleted { deleted_id: id }),
        OutputFormat::Text => writeln!(out, "Deleted POI {}", id),
    }
}
