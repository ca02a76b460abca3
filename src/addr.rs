use crate::db::{Addr, Database, PTR_SIZE};
use crate::error::Error;
use crate::layout::{max_block, GROWABLE_BLOCK_HEADER_BYTES};
use crate::size::{allocated_size, size};

/// Resolves the physical slot address for logical index `i` in the array at
/// `a`. `i` may equal the current size (the next append slot) but not
/// exceed it.
pub(crate) fn fetch_slot<D: Database>(
	inline_size: u32,
	db: &D,
	a: Addr,
	i: u32,
) -> Result<Addr, Error<D::Error>> {
	let current_size = size(inline_size, db, a);
	if i > current_size {
		return Err(Error::IndexError);
	}
	Ok(raw_slot_addr::<D>(inline_size, db, a, i))
}

/// The slot-address arithmetic without the bounds check, for callers that
/// have already established `i <= size`.
fn raw_slot_addr<D: Database>(inline_size: u32, db: &D, a: Addr, i: u32) -> Addr {
	if i < inline_size {
		return a + PTR_SIZE as Addr + i * PTR_SIZE as Addr;
	}

	let j = i - inline_size;
	let g = db.get_rec_ptr(a);
	if g == 0 {
		// Inline region exactly full (or `inline_size == 0`) and no growable
		// block exists yet: `i` can only be the append slot at `i == size`,
		// which must read as the tombstone value. Address 0 is never a real
		// allocation and always reads back as 0, so it doubles as that
		// sentinel without touching database state that doesn't exist yet.
		return 0;
	}
	let block_slots = max_block::<D>();

	if allocated_size(db, g) <= block_slots {
		g + GROWABLE_BLOCK_HEADER_BYTES as Addr + j * PTR_SIZE as Addr
	} else {
		let block = j / block_slots;
		let offset = j % block_slots;
		let child = db.get_rec_ptr(g + GROWABLE_BLOCK_HEADER_BYTES as Addr + block * PTR_SIZE as Addr);
		child + GROWABLE_BLOCK_HEADER_BYTES as Addr + offset * PTR_SIZE as Addr
	}
}
