//! Error types for pool construction, state initialization and serialization.

use thiserror::Error;

/// Errors produced when inserting into or querying an [crate::pool::ObjectPool].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// An object with this identifier is already in the pool.
    #[error("object id {0} is already in use")]
    DuplicateObjectId(u16),
    /// No object with this identifier exists.
    #[error("object id {0} not found")]
    UnknownObjectId(u16),
    /// The identifier resolves to an object that is not a device element.
    #[error("object id {0} is not a device element")]
    NotAnElement(u16),
    /// An element lists a child that is not in the pool.
    #[error("element {element} references missing child {child}")]
    DanglingChild { element: u16, child: u16 },
    /// An element names a parent that is not in the pool.
    #[error("element {element} references missing parent {parent}")]
    DanglingParent { element: u16, parent: u16 },
}

/// Errors produced by [crate::builder::PoolBuilder::build].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The booms together declare more sections than the identifier bands can hold.
    #[error("{0} sections requested, at most {max} supported", max = crate::ids::MAX_SECTIONS)]
    TooManySections(usize),
    /// More booms than the additional boom band can hold.
    #[error("{0} booms requested, at most {max} supported", max = crate::ids::MAX_BOOMS)]
    TooManyBooms(usize),
    /// A boom is wider than a signed 32-bit millimeter offset can describe.
    #[error("boom width of {0} mm exceeds {max} mm", max = crate::builder::MAX_BOOM_WIDTH_MM)]
    BoomTooWide(u32),
    /// The rate DDI pair overflows or collides with a DDI the dispatcher serves itself.
    #[error("ddi {0} cannot carry an application rate")]
    InvalidRateDdi(u16),
    /// A designator is longer than the pool version allows.
    #[error("object {object_id}: designator of {len} bytes exceeds {max}")]
    DesignatorTooLong { object_id: u16, len: usize, max: usize },
    /// Inserting an object failed; indicates overlapping identifier bands.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Errors produced when sizing a [crate::state::SectionControlState] from a pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The pool contains no section elements.
    #[error("object pool contains no section elements")]
    NoSections,
    /// The pool contains more section elements than can be addressed.
    #[error("object pool contains {0} sections, at most {max} supported", max = crate::ids::MAX_SECTIONS)]
    TooManySections(usize),
}

/// Errors produced when configuring a [crate::dispatch::Dispatcher].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The rate DDI pair overflows or collides with a fixed handler.
    #[error("ddi {0} cannot carry an application rate")]
    InvalidRateDdi(u16),
}

/// Errors produced when writing a pool to its binary form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A designator or string attribute is longer than the format allows.
    #[error("object {object_id}: string of {len} bytes exceeds {max}")]
    StringTooLong { object_id: u16, len: usize, max: usize },
    /// An element has more children than a u16 count can express.
    #[error("object {0}: too many child references")]
    TooManyChildren(u16),
}
