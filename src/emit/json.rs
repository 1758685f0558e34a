use std::collections::BTreeMap;
use std::fmt::LowerHex;
use std::io::{self, Write};

use serde::Serialize;

use crate::db::{Counts, Database, Subsystem};
use crate::emit::{Emitter, Provenance};

pub struct JsonEmitter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: Metadata<'a>,
    classes: BTreeMap<String, &'a str>,
    subclasses: BTreeMap<String, &'a str>,
    programming_interfaces: BTreeMap<String, &'a str>,
    vendors: BTreeMap<String, &'a str>,
    products: BTreeMap<String, &'a str>,
    subsystems: BTreeMap<String, JsonSubsystem<'a>>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    input: &'a str,
    sha256: &'a str,
    counts: Counts,
}

#[derive(Serialize)]
struct JsonSubsystem<'a> {
    vendor: String,
    name: &'a str,
}

impl<'a> JsonSubsystem<'a> {
    fn new(subsystem: &'a Subsystem) -> Self {
        Self {
            vendor: format!("{:04x}", subsystem.vendor),
            name: &subsystem.name,
        }
    }
}

/// Zero-padded hex keys keep the map's lexical order equal to numeric order.
fn hex_keyed<K: LowerHex>(map: &BTreeMap<K, String>, width: usize) -> BTreeMap<String, &str> {
    map.iter()
        .map(|(k, v)| (format!("{k:0width$x}"), v.as_str()))
        .collect()
}

impl Emitter for JsonEmitter {
    fn emit_to(
        &self,
        db: &Database,
        provenance: &Provenance,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let output = JsonOutput {
            metadata: Metadata {
                input: &provenance.input,
                sha256: &provenance.sha256,
                counts: db.counts(),
            },
            classes: hex_keyed(&db.classes, 2),
            subclasses: hex_keyed(&db.subclasses, 4),
            programming_interfaces: hex_keyed(&db.programming_interfaces, 6),
            vendors: hex_keyed(&db.vendors, 4),
            products: hex_keyed(&db.products, 8),
            subsystems: db
                .subsystems
                .iter()
                .map(|(k, s)| (format!("{k:012x}"), JsonSubsystem::new(s)))
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)
    }
}
