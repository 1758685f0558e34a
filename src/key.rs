//! Composite lookup keys.
//!
//! A child key is its parent key shifted left by the child id's width, OR the
//! child id. Keys are therefore unique per hierarchy path and ordered by
//! parent first, then child.

pub type ClassId = u8;
/// Class (high 8) + subclass (low 8).
pub type SubclassKey = u16;
/// Subclass key (bits 8..24) + programming interface (low 8).
pub type ProgrammingInterfaceKey = u32;
pub type VendorId = u16;
/// Vendor (high 16) + product (low 16).
pub type ProductKey = u32;
/// Product key (bits 16..48) + subsystem (low 16).
pub type SubsystemKey = u64;

pub const fn subclass_key(class: ClassId, subclass: u8) -> SubclassKey {
    (class as u16) << 8 | subclass as u16
}

pub const fn programming_interface_key(
    subclass: SubclassKey,
    prog_if: u8,
) -> ProgrammingInterfaceKey {
    (subclass as u32) << 8 | prog_if as u32
}

pub const fn product_key(vendor: VendorId, product: u16) -> ProductKey {
    (vendor as u32) << 16 | product as u32
}

pub const fn subsystem_key(product: ProductKey, subsystem: u16) -> SubsystemKey {
    (product as u64) << 16 | subsystem as u64
}

/// Inverse of [`subclass_key`]: `(class, subclass)`.
pub const fn split_subclass_key(key: SubclassKey) -> (ClassId, u8) {
    ((key >> 8) as u8, key as u8)
}

/// Inverse of [`programming_interface_key`]: `(subclass key, prog if)`.
pub const fn split_programming_interface_key(key: ProgrammingInterfaceKey) -> (SubclassKey, u8) {
    ((key >> 8) as u16, key as u8)
}

/// Inverse of [`product_key`]: `(vendor, product)`.
pub const fn split_product_key(key: ProductKey) -> (VendorId, u16) {
    ((key >> 16) as u16, key as u16)
}

/// Inverse of [`subsystem_key`]: `(product key, subsystem)`.
pub const fn split_subsystem_key(key: SubsystemKey) -> (ProductKey, u16) {
    ((key >> 16) as u32, key as u16)
}
