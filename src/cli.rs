use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pcidb",
    version,
    about = "Generate PCI id lookup tables from a pci.ids database"
)]
pub struct Args {
    /// Path to the pci.ids database [default: pci.ids]
    pub input: Option<PathBuf>,

    /// Path to configuration file [default: ./pcidb.yml if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: rust]
    #[arg(short, long, value_parser = ["rust", "json", "summary"])]
    pub format: Option<String>,

    /// Visibility of generated Rust items [default: pub]
    #[arg(long, value_parser = ["pub", "pub(crate)", "private"])]
    pub visibility: Option<String>,

    /// Exit 1 if the output file is not what would be generated; write nothing
    #[arg(long)]
    pub check: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}
