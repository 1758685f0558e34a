use std::path::PathBuf;

use crate::db::Database;
use crate::parse::parse_str;
use crate::parse::source::SourceFile;

/// A small database covering every line shape, comments and blank lines.
pub const SAMPLE_DB: &str = concat!(
    "#\n",
    "#\tList of PCI ID's\n",
    "#\n",
    "\n",
    "0e11  Compaq Computer Corporation\n",
    "\t1000  Triflex/Pentium Bridge, Model 1000\n",
    "\tb178  Smart Array 5i/532\n",
    "\t\t0e11 4080  Smart Array 5i\n",
    "\t\t0e11 4082  Smart Array 532\n",
    "\tb060  Smart Array 5300 Controller\n",
    "8086  Intel Corporation\n",
    "\t1229  82557/8/9/0/1 Ethernet Pro 100\n",
    "\t\t0e11 b01e  NC3120 Fast Ethernet NIC\n",
    "ffff  Illegal Vendor ID\n",
    "\n",
    "# List of known device classes, subclasses and programming interfaces\n",
    "\n",
    "C 02  Network controller\n",
    "\t00  Ethernet controller\n",
    "\t80  Network controller\n",
    "C 0c  Serial bus controller\n",
    "\t03  USB controller\n",
    "\t\t00  UHCI\n",
    "\t\t10  OHCI\n",
    "\t\t30  XHCI\n",
);

pub fn sample_db() -> Database {
    parse_str(SAMPLE_DB).expect("sample database parses")
}

pub fn sample_source() -> SourceFile {
    SourceFile::from_string(PathBuf::from("pci.ids"), SAMPLE_DB.to_string())
}
