use std::collections::BTreeMap;
use std::fmt::LowerHex;
use std::io::{self, Write};

use crate::db::Database;
use crate::emit::{Emitter, Provenance, Visibility};

/// Emits a Rust module with one `match`-based lookup function per mapping.
pub struct RustEmitter {
    visibility: Visibility,
}

impl RustEmitter {
    pub fn new(visibility: Visibility) -> Self {
        Self { visibility }
    }

    /// Private items the consumer never calls would otherwise warn.
    fn item_attrs(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.visibility == Visibility::Private {
            writeln!(out, "#[allow(dead_code)]")?;
        }
        Ok(())
    }

    fn lookup_fn<K: LowerHex>(
        &self,
        out: &mut dyn Write,
        name: &str,
        key_type: &str,
        hex_width: usize,
        entries: &BTreeMap<K, String>,
    ) -> io::Result<()> {
        let vis = self.visibility.prefix();
        writeln!(out)?;
        self.item_attrs(out)?;
        if entries.is_empty() {
            writeln!(
                out,
                "{vis}fn {name}(_key: {key_type}) -> Option<&'static str> {{"
            )?;
            writeln!(out, "    None")?;
            return writeln!(out, "}}");
        }
        writeln!(out, "{vis}fn {name}(key: {key_type}) -> Option<&'static str> {{")?;
        writeln!(out, "    match key {{")?;
        for (key, value) in entries {
            writeln!(out, "        0x{key:0hex_width$x} => Some({value:?}),")?;
        }
        writeln!(out, "        _ => None,")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")
    }

    fn subsystem_fn(&self, out: &mut dyn Write, db: &Database) -> io::Result<()> {
        let vis = self.visibility.prefix();
        writeln!(out)?;
        self.item_attrs(out)?;
        if db.subsystems.is_empty() {
            writeln!(
                out,
                "{vis}fn lookup_subsystem(_key: u64) -> Option<SubsystemInfo> {{"
            )?;
            writeln!(out, "    None")?;
            return writeln!(out, "}}");
        }
        writeln!(out, "{vis}fn lookup_subsystem(key: u64) -> Option<SubsystemInfo> {{")?;
        writeln!(out, "    match key {{")?;
        for (key, subsystem) in &db.subsystems {
            writeln!(
                out,
                "        0x{key:012x} => Some(SubsystemInfo {{ vendor: 0x{:04x}, name: {:?} }}),",
                subsystem.vendor, subsystem.name
            )?;
        }
        writeln!(out, "        _ => None,")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")
    }
}

impl Emitter for RustEmitter {
    fn emit_to(
        &self,
        db: &Database,
        provenance: &Provenance,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let vis = self.visibility.prefix();

        writeln!(
            out,
            "// Code generated by pcidb from {}; DO NOT EDIT.",
            provenance.input
        )?;
        writeln!(out, "// Source SHA-256: {}", provenance.sha256)?;
        writeln!(out)?;
        writeln!(out, "/// A PCI subsystem: its own vendor id and name.")?;
        writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
        self.item_attrs(out)?;
        writeln!(out, "{vis}struct SubsystemInfo {{")?;
        writeln!(out, "    {vis}vendor: u16,")?;
        writeln!(out, "    {vis}name: &'static str,")?;
        writeln!(out, "}}")?;

        self.lookup_fn(out, "lookup_class", "u8", 2, &db.classes)?;
        self.lookup_fn(out, "lookup_subclass", "u16", 4, &db.subclasses)?;
        self.lookup_fn(
            out,
            "lookup_programming_interface",
            "u32",
            6,
            &db.programming_interfaces,
        )?;
        self.lookup_fn(out, "lookup_vendor", "u16", 4, &db.vendors)?;
        self.lookup_fn(out, "lookup_product", "u32", 8, &db.products)?;
        self.subsystem_fn(out, db)
    }
}
