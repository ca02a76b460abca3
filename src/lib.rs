//! A persistent, off-heap growable pointer array.
//!
//! This crate implements a variable-length sequence of fixed-width database
//! pointers whose entire state — header, capacity counters, and element
//! slots — lives inside a paged database file managed by an external
//! allocator (see [`Database`]). There is no in-process object representing
//! an array instance; each array is identified solely by its byte address
//! inside the database, and every operation is a function of
//! `(database, address)`.
//!
//! Small arrays store their first few elements inline in the header,
//! avoiding any allocation at all. Once that inline region is exhausted,
//! the array grows a single block geometrically (doubling up to the
//! database's page-fit limit). Past that limit it promotes to a two-level
//! **metablock**: a block of child-block pointers, each child a full-sized
//! single block. Shrinking mirrors growth in reverse, with hysteresis
//! thresholds to avoid oscillating at exact power-of-two boundaries.
//!
//! # Example
//!
//! ```
//! use parray::{Database, PersistentArray};
//!
//! # fn run<D: Database<Error = std::convert::Infallible>>(db: &mut D, at: u32) {
//! let array = PersistentArray::new(/* inline_size = */ 4);
//!
//! let i = array.add(db, at, 0xC0FFEE).unwrap();
//! assert_eq!(array.get(db, at, i).unwrap(), 0xC0FFEE);
//! assert_eq!(array.size(db, at), 1);
//! # }
//! ```

mod addr;
mod array;
mod db;
mod error;
mod growth;
mod layout;
mod shrink;
mod size;


pub use array::PersistentArray;
pub use db::{Addr, Database, PTR_SIZE};
pub use error::Error;
pub use layout::GROWABLE_BLOCK_HEADER_BYTES;
