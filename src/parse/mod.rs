//! `pci.ids` parsing: one forward pass, one line at a time.
//!
//! The format has no block delimiters. Indentation depth says how far down a
//! hierarchy a line sits, and the most recent header says which hierarchy
//! (classes or vendors) that is. [`Context`] carries both across lines and
//! [`step`] advances it by one line.

pub mod line;
pub mod source;

use crate::columns::{Shape, extract};
use crate::db::{Database, Record, Subsystem};
use crate::error::Result;
use crate::key::{
    ClassId, ProductKey, SubclassKey, VendorId, product_key, programming_interface_key,
    subclass_key, subsystem_key,
};

use line::{LineKind, classify};
use source::{SourceFile, numbered_lines};

/// Which hierarchy indented lines belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hierarchy {
    /// vendor → product → subsystem
    #[default]
    Vendor,
    /// class → subclass → programming interface
    Class,
}

/// Parse state between two lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub hierarchy: Hierarchy,
    pub class: ClassId,
    pub subclass: SubclassKey,
    pub vendor: VendorId,
    pub product: ProductKey,
}

impl Context {
    fn enter_class(self, class: ClassId) -> Self {
        Context {
            hierarchy: Hierarchy::Class,
            class,
            vendor: 0,
            product: 0,
            ..self
        }
    }

    fn enter_vendor(self, vendor: VendorId) -> Self {
        Context {
            hierarchy: Hierarchy::Vendor,
            vendor,
            class: 0,
            subclass: 0,
            ..self
        }
    }
}

/// Advance `ctx` by one line.
///
/// Returns the next context and the mapping update the line produces, if any.
/// `line_no` is 1-indexed and only used in errors.
pub fn step(ctx: Context, line_no: usize, line: &str) -> Result<(Context, Option<Record>)> {
    let shape = match (classify(line), ctx.hierarchy) {
        (LineKind::Skip, _) => return Ok((ctx, None)),
        (LineKind::ClassHeader, _) => Shape::Class,
        (LineKind::VendorHeader, _) => Shape::Vendor,
        (LineKind::SingleIndent, Hierarchy::Class) => Shape::Subclass,
        (LineKind::SingleIndent, Hierarchy::Vendor) => Shape::Product,
        (LineKind::DoubleIndent, Hierarchy::Class) => Shape::ProgrammingInterface,
        (LineKind::DoubleIndent, Hierarchy::Vendor) => Shape::Subsystem,
    };

    let fields = extract(shape, line_no, line)?;
    let name = fields.name.to_string();

    let (next, record) = match shape {
        Shape::Class => {
            let class = fields.byte(0);
            tracing::trace!(line_no, class, "class header");
            (ctx.enter_class(class), Record::Class(class, name))
        }
        Shape::Vendor => {
            let vendor = fields.wide(0);
            tracing::trace!(line_no, vendor, "vendor header");
            (ctx.enter_vendor(vendor), Record::Vendor(vendor, name))
        }
        Shape::Subclass => {
            let key = subclass_key(ctx.class, fields.byte(0));
            (
                Context {
                    subclass: key,
                    ..ctx
                },
                Record::Subclass(key, name),
            )
        }
        Shape::Product => {
            let key = product_key(ctx.vendor, fields.wide(0));
            (
                Context {
                    product: key,
                    ..ctx
                },
                Record::Product(key, name),
            )
        }
        Shape::ProgrammingInterface => {
            let key = programming_interface_key(ctx.subclass, fields.byte(0));
            (ctx, Record::ProgrammingInterface(key, name))
        }
        Shape::Subsystem => {
            // The owning vendor comes from the line itself, not from ctx.vendor.
            let key = subsystem_key(ctx.product, fields.wide(1));
            let subsystem = Subsystem {
                vendor: fields.wide(0),
                name,
            };
            (ctx, Record::Subsystem(key, subsystem))
        }
    };

    Ok((next, Some(record)))
}

/// Parse a whole database held in memory.
pub fn parse_str(text: &str) -> Result<Database> {
    parse_lines(numbered_lines(text))
}

/// Parse a loaded source file.
pub fn parse_source(source: &SourceFile) -> Result<Database> {
    let db = parse_lines(source.lines())?;
    let counts = db.counts();
    tracing::debug!(
        path = source.path_str(),
        classes = counts.classes,
        subclasses = counts.subclasses,
        programming_interfaces = counts.programming_interfaces,
        vendors = counts.vendors,
        products = counts.products,
        subsystems = counts.subsystems,
        "parsed database"
    );
    Ok(db)
}

fn parse_lines<'a>(lines: impl Iterator<Item = (usize, &'a str)>) -> Result<Database> {
    let mut db = Database::new();
    let mut ctx = Context::default();
    for (line_no, line) in lines {
        let (next, record) = step(ctx, line_no, line)?;
        ctx = next;
        if let Some(record) = record {
            db.insert(record);
        }
    }
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::testutil::SAMPLE_DB;

    fn step_ok(ctx: Context, line: &str) -> (Context, Option<Record>) {
        step(ctx, 1, line).unwrap()
    }

    #[test]
    fn initial_context_is_vendor_mode_zeroed() {
        let ctx = Context::default();
        assert_eq!(ctx.hierarchy, Hierarchy::Vendor);
        assert_eq!((ctx.class, ctx.subclass, ctx.vendor, ctx.product), (0, 0, 0, 0));
    }

    #[test]
    fn skip_lines_leave_context_untouched() {
        let ctx = Context {
            hierarchy: Hierarchy::Class,
            class: 3,
            subclass: 0x0301,
            vendor: 0,
            product: 0,
        };
        assert_eq!(step_ok(ctx, ""), (ctx, None));
        assert_eq!(step_ok(ctx, "# comment"), (ctx, None));
    }

    #[test]
    fn class_header_enters_class_mode() {
        let (ctx, record) = step_ok(Context::default(), "C 02  Network controller");
        assert_eq!(ctx.hierarchy, Hierarchy::Class);
        assert_eq!(ctx.class, 0x02);
        assert_eq!(
            record,
            Some(Record::Class(0x02, "Network controller".to_string()))
        );
    }

    #[test]
    fn single_indent_depends_on_mode() {
        let (class_ctx, _) = step_ok(Context::default(), "C 0c  Serial bus controller");
        let (ctx, record) = step_ok(class_ctx, "\t03  USB controller");
        assert_eq!(ctx.subclass, 0x0c03);
        assert_eq!(
            record,
            Some(Record::Subclass(0x0c03, "USB controller".to_string()))
        );

        let (vendor_ctx, _) = step_ok(Context::default(), "8086  Intel Corporation");
        let (ctx, record) = step_ok(vendor_ctx, "\t1229  82557/8/9/0/1 Ethernet Pro 100");
        assert_eq!(ctx.product, 0x8086_1229);
        assert_eq!(
            record,
            Some(Record::Product(
                0x8086_1229,
                "82557/8/9/0/1 Ethernet Pro 100".to_string()
            ))
        );
    }

    #[test]
    fn double_indent_in_class_mode_is_programming_interface() {
        let ctx = Context {
            hierarchy: Hierarchy::Class,
            class: 0x0c,
            subclass: 0x0c03,
            vendor: 0,
            product: 0,
        };
        let (next, record) = step_ok(ctx, "\t\t30  XHCI");
        assert_eq!(next, ctx);
        assert_eq!(
            record,
            Some(Record::ProgrammingInterface(0x0c0330, "XHCI".to_string()))
        );
    }

    #[test]
    fn subsystem_vendor_comes_from_line_not_context() {
        let ctx = Context {
            hierarchy: Hierarchy::Vendor,
            class: 0,
            subclass: 0,
            vendor: 0x8086,
            product: 0x8086_1229,
        };
        let (next, record) = step_ok(ctx, "\t\t0e11 b01e  NC3120 Fast Ethernet NIC");
        assert_eq!(next, ctx);
        assert_eq!(
            record,
            Some(Record::Subsystem(
                0x8086_1229_b01e,
                Subsystem {
                    vendor: 0x0e11,
                    name: "NC3120 Fast Ethernet NIC".to_string(),
                }
            ))
        );
    }

    #[test]
    fn switching_hierarchy_resets_the_other_registers() {
        let (ctx, _) = step_ok(Context::default(), "8086  Intel Corporation");
        let (ctx, _) = step_ok(ctx, "\t1229  Ethernet Pro 100");
        let (ctx, _) = step_ok(ctx, "C 0c  Serial bus controller");
        assert_eq!((ctx.vendor, ctx.product), (0, 0));
        let (ctx, _) = step_ok(ctx, "\t03  USB controller");
        let (ctx, _) = step_ok(ctx, "1234  Other");
        assert_eq!(ctx.hierarchy, Hierarchy::Vendor);
        assert_eq!((ctx.class, ctx.subclass), (0, 0));
        assert_eq!(ctx.vendor, 0x1234);
    }

    #[test]
    fn vendor_header_drops_subclass_for_later_programming_interface() {
        let db = parse_str(concat!(
            "C 01  Mass storage controller\n",
            "\t02  Floppy disk controller\n",
            "0a89  BREA Technologies Inc\n",
            "C 0c  Serial bus controller\n",
            "\t\t30  XHCI\n",
        ))
        .unwrap();
        assert_eq!(db.lookup_programming_interface(0x00_0030), Some("XHCI"));
        assert_eq!(db.lookup_programming_interface(0x01_0230), None);
    }

    #[test]
    fn class_header_keeps_previous_subclass_in_same_hierarchy() {
        let db = parse_str(concat!(
            "C 01  Mass storage controller\n",
            "\t02  Floppy disk controller\n",
            "C 03  Display controller\n",
            "\t\t00  VGA controller\n",
        ))
        .unwrap();
        assert_eq!(
            db.programming_interfaces.keys().copied().collect::<Vec<_>>(),
            vec![0x01_0200]
        );
    }

    #[test]
    fn network_controller_scenario() {
        let db = parse_str("C 02  Network controller\n\t00  Ethernet controller\n").unwrap();
        assert_eq!(db.classes.len(), 1);
        assert_eq!(db.lookup_class(0x02), Some("Network controller"));
        assert_eq!(db.subclasses.len(), 1);
        assert_eq!(db.lookup_subclass(0x0200), Some("Ethernet controller"));
        assert!(db.vendors.is_empty());
    }

    #[test]
    fn brea_scenario() {
        let db = parse_str(
            "0a89  BREA Technologies Inc\n\t0002  PCI to MCA Bridge\n\t\t0a89 0001  Widget\n",
        )
        .unwrap();
        assert_eq!(db.lookup_vendor(0x0a89), Some("BREA Technologies Inc"));
        assert_eq!(db.lookup_product(0x0a89_0002), Some("PCI to MCA Bridge"));
        assert_eq!(
            db.lookup_subsystem(0x0a89_0002_0001),
            Some(&Subsystem {
                vendor: 0x0a89,
                name: "Widget".to_string(),
            })
        );
        assert_eq!(db.counts().total(), 3);
    }

    #[test]
    fn malformed_class_header_aborts_with_line() {
        let err = parse_str("# header\n\nC ZZ  Bad\n").unwrap_err();
        assert_eq!(err.line_no(), Some(3));
        match err {
            ParseError::MalformedHexField { line, text, .. } => {
                assert_eq!(line, "C ZZ  Bad");
                assert_eq!(text, "ZZ");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_line_after_good_lines_still_aborts() {
        let err = parse_str("8086  Intel Corporation\n\t12x9  Broken\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedHexField { line_no: 2, field: "product id", .. }
        ));
    }

    #[test]
    fn truncated_lines_abort() {
        assert!(matches!(
            parse_str("C 02\n"),
            Err(ParseError::TruncatedLine { line_no: 1, shape: Shape::Class, .. })
        ));
        assert!(matches!(
            parse_str("8086  Intel\n\t"),
            Err(ParseError::TruncatedLine { line_no: 2, shape: Shape::Subsystem, .. })
        ));
    }

    #[test]
    fn duplicate_header_last_write_wins() {
        let db = parse_str("1234  First name\n1234  Second name\n").unwrap();
        assert_eq!(db.lookup_vendor(0x1234), Some("Second name"));
        assert_eq!(db.vendors.len(), 1);

        let db = parse_str("C 05  Memory\nC 05  Memory controller\n").unwrap();
        assert_eq!(db.lookup_class(0x05), Some("Memory controller"));
    }

    #[test]
    fn interleaved_blocks_toggle_mode() {
        let input = "\
C 01  Mass storage controller
\t06  SATA controller
1000  Broadcom / LSI
\t0001  53c810
C 03  Display controller
\t00  VGA compatible controller
1002  Advanced Micro Devices, Inc. [AMD/ATI]
\t4c59  Rage Mobility P/M
";
        let db = parse_str(input).unwrap();
        assert_eq!(db.lookup_subclass(0x0106), Some("SATA controller"));
        assert_eq!(db.lookup_subclass(0x0300), Some("VGA compatible controller"));
        assert_eq!(db.lookup_product(0x1000_0001), Some("53c810"));
        assert_eq!(db.lookup_product(0x1002_4c59), Some("Rage Mobility P/M"));
        assert_eq!(db.subclasses.len(), 2);
        assert_eq!(db.products.len(), 2);
    }

    #[test]
    fn crlf_input_matches_lf_input() {
        let lf = parse_str(SAMPLE_DB).unwrap();
        let crlf = parse_str(&SAMPLE_DB.replace('\n', "\r\n")).unwrap();
        assert_eq!(lf, crlf);
    }

    #[test]
    fn sample_database_parses() {
        let db = parse_str(SAMPLE_DB).unwrap();
        let counts = db.counts();
        assert_eq!(counts.vendors, 3);
        assert_eq!(counts.products, 4);
        assert_eq!(counts.subsystems, 3);
        assert_eq!(counts.classes, 2);
        assert_eq!(counts.subclasses, 3);
        assert_eq!(counts.programming_interfaces, 3);
        assert_eq!(db.lookup_programming_interface(0x0c0330), Some("XHCI"));
        assert_eq!(
            db.lookup_subsystem(0x0e11_b178_4080).map(|s| s.name.as_str()),
            Some("Smart Array 5i")
        );
    }

    #[test]
    fn empty_input_is_empty_database() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("\n# only comments\n\n").unwrap().is_empty());
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn name_strategy() -> impl Strategy<Value = String> {
            "[A-Za-z0-9][A-Za-z0-9 /.,()-]{0,30}"
        }

        proptest! {
            #[test]
            fn class_header_roundtrips(id in any::<u8>(), name in name_strategy()) {
                let db = parse_str(&format!("C {id:02x}  {name}\n")).unwrap();
                prop_assert_eq!(db.lookup_class(id), Some(name.as_str()));
                prop_assert_eq!(db.classes.len(), 1);
            }

            #[test]
            fn subclass_key_packs_class_and_subclass(
                blocks in prop::collection::vec((any::<u8>(), any::<u8>(), any::<u16>()), 1..8),
            ) {
                let mut input = String::new();
                for (class, subclass, vendor) in &blocks {
                    input.push_str(&format!("C {class:02x}  Class\n\t{subclass:02x}  Sub\n"));
                    input.push_str(&format!("{vendor:04x}  Vendor\n\t0001  Product\n"));
                }
                let db = parse_str(&input).unwrap();
                for (class, subclass, vendor) in &blocks {
                    let key = (u16::from(*class) << 8) | u16::from(*subclass);
                    prop_assert!(db.subclasses.contains_key(&key));
                    prop_assert!(db.products.contains_key(&((u32::from(*vendor) << 16) | 1)));
                }
            }

            #[test]
            fn subsystem_owner_vendor_is_from_line(
                vendor in any::<u16>(),
                owner in any::<u16>(),
                product in any::<u16>(),
                subsystem in any::<u16>(),
            ) {
                let input = format!(
                    "{vendor:04x}  V\n\t{product:04x}  P\n\t\t{owner:04x} {subsystem:04x}  S\n"
                );
                let db = parse_str(&input).unwrap();
                let key = (u64::from(vendor) << 32) | (u64::from(product) << 16) | u64::from(subsystem);
                let entry = db.lookup_subsystem(key).unwrap();
                prop_assert_eq!(entry.vendor, owner);
            }

            #[test]
            fn parse_is_idempotent(extra_vendor in any::<u16>()) {
                let input = format!("{SAMPLE_DB}{extra_vendor:04x}  Extra\n");
                prop_assert_eq!(parse_str(&input).unwrap(), parse_str(&input).unwrap());
            }

            #[test]
            fn arbitrary_input_never_panics(input in "[C0-9a-fA-F\\t #\\n]{0,200}") {
                let _ = parse_str(&input);
            }
        }
    }
}
