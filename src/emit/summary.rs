use std::io::{self, Write};

use crate::db::Database;
use crate::emit::{Emitter, Provenance};

/// Entry count per mapping, one per line.
pub struct SummaryEmitter;

impl Emitter for SummaryEmitter {
    fn emit_to(
        &self,
        db: &Database,
        provenance: &Provenance,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let counts = db.counts();
        writeln!(out, "{} (sha256 {})", provenance.input, provenance.sha256)?;
        for (label, count) in [
            ("classes", counts.classes),
            ("subclasses", counts.subclasses),
            ("programming interfaces", counts.programming_interfaces),
            ("vendors", counts.vendors),
            ("products", counts.products),
            ("subsystems", counts.subsystems),
        ] {
            writeln!(out, "  {label:<24}{count:>8}")?;
        }
        writeln!(out, "  {:<24}{:>8}", "total", counts.total())
    }
}
