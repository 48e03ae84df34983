// Console run report
//
// The stdout surface of the CLI: banner, candidate count, one line per
// document and the final tally.

use crate::services::BatchReport;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn write_banner<W: Write>(out: &mut W, dry_run: bool) -> io::Result<()> {
    rule(out)?;
    if dry_run {
        writeln!(out, "Documentation Disclaimer Insertion (dry run)")?;
    } else {
        writeln!(out, "Documentation Disclaimer Insertion")?;
    }
    rule(out)?;
    writeln!(out)
}

pub fn write_report<W: Write>(out: &mut W, report: &BatchReport) -> io::Result<()> {
    writeln!(out, "Found {} markdown files", report.candidates)?;
    writeln!(out)?;

    for doc in &report.documents {
        writeln!(
            out,
            "{} {} - {}",
            doc.outcome.kind().tag(),
            doc.display_name(),
            doc.outcome
        )?;
    }

    let s = &report.summary;
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "  [OK] Updated: {}", s.updated)?;
    if s.would_update > 0 {
        writeln!(out, "  [DRY-RUN] Would update: {}", s.would_update)?;
    }
    writeln!(out, "  [SKIP] Skipped: {}", s.skipped())?;
    writeln!(out, "  [ERROR] Errors: {}", s.failed)?;
    if s.cancelled > 0 {
        writeln!(out, "  [CANCELLED] Not started: {}", s.cancelled)?;
    }
    rule(out)
}
