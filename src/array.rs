use crate::addr::fetch_slot;
use crate::db::{Addr, Database};
use crate::error::Error;
use crate::growth::ensure_capacity as ensure_capacity_impl;
use crate::layout::{array_header_bytes, max_block};
use crate::shrink::repack_if_necessary;
use crate::size::{capacity as capacity_impl, is_empty as is_empty_impl, size as size_impl};

/// A handle to a persistent, off-heap growable pointer array.
///
/// This is a value type, not a reference to any in-process state: the array
/// it names lives entirely inside an external [`Database`], identified by
/// its byte address. Every method takes the database and address explicitly
/// and is a pure function of `(database, address)` plus the handle's own
/// `inline_size`, which must stay the same for a given address across its
/// entire lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistentArray {
	inline_size: u32,
}

impl PersistentArray {
	/// Creates a handle for an array with `inline_size` element slots
	/// embedded directly in its header.
	pub const fn new(inline_size: u32) -> Self {
		Self { inline_size }
	}

	/// The number of element slots embedded in this array's header.
	pub const fn inline_size(&self) -> u32 {
		self.inline_size
	}

	/// Byte size of the header this array occupies at its address, used by
	/// the enclosing schema to lay out the containing record.
	pub const fn record_size(&self) -> usize {
		array_header_bytes(self.inline_size)
	}

	/// The largest number of element slots a single growable block can hold
	/// for this database's chunk geometry, before this array promotes to a
	/// metablock.
	pub fn max_growable_block_size<D: Database>(&self) -> u32 {
		max_block::<D>()
	}

	/// The current number of elements stored in the array at `a`.
	pub fn size<D: Database>(&self, db: &D, a: Addr) -> u32 {
		size_impl(self.inline_size, db, a)
	}

	/// Whether the array at `a` currently holds zero elements.
	pub fn is_empty<D: Database>(&self, db: &D, a: Addr) -> bool {
		is_empty_impl(self.inline_size, db, a)
	}

	/// The total number of element slots available at `a` without growing.
	pub fn capacity<D: Database>(&self, db: &D, a: Addr) -> u32 {
		capacity_impl(self.inline_size, db, a)
	}

	/// Reads the element at logical index `i`. `i` may equal the current
	/// size (reads as `0`, used internally during migrations) but not
	/// exceed it.
	pub fn get<D: Database>(&self, db: &D, a: Addr, i: u32) -> Result<Addr, Error<D::Error>> {
		let slot = fetch_slot(self.inline_size, db, a, i)?;
		Ok(db.get_rec_ptr(slot))
	}

	/// Appends `value` and returns its index. Rejects the reserved
	/// tombstone value `0`.
	pub fn add<D: Database>(&self, db: &mut D, a: Addr, value: Addr) -> Result<u32, Error<D::Error>> {
		if value == 0 {
			return Err(Error::InvalidArgument);
		}

		let i = size_impl(self.inline_size, db, a);
		self.ensure_capacity(db, a, i + 1)?;

		let slot = fetch_slot(self.inline_size, db, a, i)?;
		db.put_rec_ptr(slot, value);

		let g = db.get_rec_ptr(a);
		if g != 0 {
			db.put_int(g, (i + 1) as i32);
		}

		Ok(i)
	}

	/// Removes the element at logical index `i` using swap-with-last:
	/// element ordering is not preserved. Returns the value that used to sit
	/// at the last index, if that value was moved into `i` (`0` if `i` was
	/// already the last index, meaning nothing moved).
	pub fn remove<D: Database>(&self, db: &mut D, a: Addr, i: u32) -> Result<Addr, Error<D::Error>> {
		let old_size = size_impl(self.inline_size, db, a);
		if i >= old_size {
			return Err(Error::IndexError);
		}

		let last = old_size - 1;
		let last_slot = fetch_slot(self.inline_size, db, a, last)?;
		let moved_value = db.get_rec_ptr(last_slot);

		let swapped = if i == last {
			db.put_rec_ptr(last_slot, 0);
			0
		} else {
			let target_slot = fetch_slot(self.inline_size, db, a, i)?;
			db.put_rec_ptr(target_slot, moved_value);
			db.put_rec_ptr(last_slot, 0);
			moved_value
		};

		let g = db.get_rec_ptr(a);
		if g != 0 {
			db.put_int(g, (old_size - 1) as i32);
		}

		repack_if_necessary(self.inline_size, db, a, old_size)?;
		Ok(swapped)
	}

	/// Grows the array at `a` so that it can hold at least `desired`
	/// elements without further allocation. A no-op if it already can.
	pub fn ensure_capacity<D: Database>(
		&self,
		db: &mut D,
		a: Addr,
		desired: u32,
	) -> Result<(), Error<D::Error>> {
		ensure_capacity_impl(self.inline_size, db, a, desired)
	}

	/// Frees every growable block and child block owned by the array at
	/// `a`, leaving it in the `InlineOnly` state. Does not touch the inline
	/// slots or free `a` itself — the header is owned by the enclosing
	/// record.
	pub fn destruct<D: Database>(&self, db: &mut D, a: Addr) -> Result<(), Error<D::Error>> {
		repack_if_necessary(self.inline_size, db, a, 0)
	}
}
