//! Mask storage and file I/O.

pub mod io;
pub mod mask;

pub use self::mask::BinaryMask;
