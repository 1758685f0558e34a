pub mod json;
pub mod rust;
pub mod summary;

use std::io::{self, Write};

use crate::db::Database;
use crate::parse::source::SourceFile;

pub const FORMATS: &[&str] = &["rust", "json", "summary"];

/// Where the emitted tables came from, for generated-file headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Input file name, without directories, so output does not depend on
    /// where the generator ran.
    pub input: String,
    pub sha256: String,
}

impl Provenance {
    pub fn from_source(source: &SourceFile) -> Self {
        let input = source
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.path_str().to_string());
        Self {
            input,
            sha256: source.sha256().to_string(),
        }
    }
}

/// Visibility of generated Rust items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Private,
}

impl Visibility {
    pub fn from_str(s: &str) -> Option<Visibility> {
        match s {
            "pub" => Some(Visibility::Public),
            "pub(crate)" => Some(Visibility::Crate),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    /// Item prefix, including the trailing space when non-empty.
    pub fn prefix(&self) -> &'static str {
        match self {
            Visibility::Public => "pub ",
            Visibility::Crate => "pub(crate) ",
            Visibility::Private => "",
        }
    }
}

/// Renders a finished database. Mappings are read in ascending key order.
pub trait Emitter {
    fn emit_to(
        &self,
        db: &Database,
        provenance: &Provenance,
        out: &mut dyn Write,
    ) -> io::Result<()>;

    fn render(&self, db: &Database, provenance: &Provenance) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.emit_to(db, provenance, &mut buf)?;
        Ok(buf)
    }
}

pub fn create_emitter(format: &str, visibility: Visibility) -> Box<dyn Emitter> {
    match format {
        "json" => Box::new(json::JsonEmitter),
        "summary" => Box::new(summary::SummaryEmitter),
        // "rust" and any unknown value
        _ => Box::new(rust::RustEmitter::new(visibility)),
    }
}
