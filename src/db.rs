use std::collections::BTreeMap;

use serde::Serialize;

use crate::key::{
    ClassId, ProductKey, ProgrammingInterfaceKey, SubclassKey, SubsystemKey, VendorId,
};

/// A subsystem entry. `vendor` is the subsystem's own vendor as written on
/// its line, which may differ from the vendor of the product it sits under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsystem {
    pub vendor: VendorId,
    pub name: String,
}

/// One mapping update produced by a classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Class(ClassId, String),
    Subclass(SubclassKey, String),
    ProgrammingInterface(ProgrammingInterfaceKey, String),
    Vendor(VendorId, String),
    Product(ProductKey, String),
    Subsystem(SubsystemKey, Subsystem),
}

/// The six id mappings built from one parse pass.
///
/// Maps are ordered so that iteration yields ascending keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    pub classes: BTreeMap<ClassId, String>,
    pub subclasses: BTreeMap<SubclassKey, String>,
    pub programming_interfaces: BTreeMap<ProgrammingInterfaceKey, String>,
    pub vendors: BTreeMap<VendorId, String>,
    pub products: BTreeMap<ProductKey, String>,
    pub subsystems: BTreeMap<SubsystemKey, Subsystem>,
}

/// Entry count of each mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub classes: usize,
    pub subclasses: usize,
    pub programming_interfaces: usize,
    pub vendors: usize,
    pub products: usize,
    pub subsystems: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.classes
            + self.subclasses
            + self.programming_interfaces
            + self.vendors
            + self.products
            + self.subsystems
    }
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update. An existing entry under the same key is replaced.
    pub fn insert(&mut self, record: Record) {
        match record {
            Record::Class(key, name) => {
                self.classes.insert(key, name);
            }
            Record::Subclass(key, name) => {
                self.subclasses.insert(key, name);
            }
            Record::ProgrammingInterface(key, name) => {
                self.programming_interfaces.insert(key, name);
            }
            Record::Vendor(key, name) => {
                self.vendors.insert(key, name);
            }
            Record::Product(key, name) => {
                self.products.insert(key, name);
            }
            Record::Subsystem(key, subsystem) => {
                self.subsystems.insert(key, subsystem);
            }
        }
    }

    pub fn lookup_class(&self, key: ClassId) -> Option<&str> {
        self.classes.get(&key).map(String::as_str)
    }

    pub fn lookup_subclass(&self, key: SubclassKey) -> Option<&str> {
        self.subclasses.get(&key).map(String::as_str)
    }

    pub fn lookup_programming_interface(&self, key: ProgrammingInterfaceKey) -> Option<&str> {
        self.programming_interfaces.get(&key).map(String::as_str)
    }

    pub fn lookup_vendor(&self, key: VendorId) -> Option<&str> {
        self.vendors.get(&key).map(String::as_str)
    }

    pub fn lookup_product(&self, key: ProductKey) -> Option<&str> {
        self.products.get(&key).map(String::as_str)
    }

    pub fn lookup_subsystem(&self, key: SubsystemKey) -> Option<&Subsystem> {
        self.subsystems.get(&key)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            classes: self.classes.len(),
            subclasses: self.subclasses.len(),
            programming_interfaces: self.programming_interfaces.len(),
            vendors: self.vendors.len(),
            products: self.products.len(),
            subsystems: self.subsystems.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }
}
