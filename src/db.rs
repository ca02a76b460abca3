/// A database address. `0` is never a valid allocation and is used as the
/// null/tombstone marker throughout this crate.
pub type Addr = u32;

/// The external page/chunk allocator this crate is built on top of.
///
/// Everything in this crate is a pure function of `(database, address)` —
/// no part of [`crate::PersistentArray`] owns memory itself. An implementor
/// is expected to back this with a real paged database file; this crate's
/// own test module provides a minimal in-memory stand-in for its tests.
///
/// `PTR_SIZE` is fixed at 4 bytes across every implementation (a compressed
/// database pointer); `CHUNK_SIZE` and `BLOCK_HEADER_SIZE` are supplied by
/// the implementor because they depend on the page geometry of the
/// concrete database.
pub trait Database {
	/// The error an allocation can fail with. Propagated unchanged.
	type Error;

	/// Size, in bytes, of the largest contiguous chunk this database can
	/// hand back from a single `malloc`.
	const CHUNK_SIZE: usize;

	/// Bytes of bookkeeping the database itself reserves at the front of
	/// every chunk, before the growable-block header defined by this crate.
	const BLOCK_HEADER_SIZE: usize;

	/// Reads the 4-byte compressed pointer stored at `addr`.
	fn get_rec_ptr(&self, addr: Addr) -> Addr;

	/// Writes a 4-byte compressed pointer at `addr`.
	fn put_rec_ptr(&mut self, addr: Addr, value: Addr);

	/// Reads the 4-byte integer stored at `addr`.
	fn get_int(&self, addr: Addr) -> i32;

	/// Writes a 4-byte integer at `addr`.
	fn put_int(&mut self, addr: Addr, value: i32);

	/// Allocates a zero-initialized region of `bytes` bytes.
	fn malloc(&mut self, bytes: usize) -> Result<Addr, Self::Error>;

	/// Frees a region previously returned by `malloc`.
	fn free(&mut self, addr: Addr);

	/// Copies `bytes` bytes from `src` to `dest`. Regions must not overlap.
	fn memcpy(&mut self, dest: Addr, src: Addr, bytes: usize);
}

/// Size, in bytes, of one element slot or child pointer. Fixed across every
/// [`Database`] implementation.
pub const PTR_SIZE: usize = 4;
