use crate::db::{Addr, Database, PTR_SIZE};
use crate::error::Error;
use crate::growth::{growable_region_size_for, resize_block};
use crate::layout::{max_block, GROWABLE_BLOCK_HEADER_BYTES};
use crate::size::{allocated_size, stored_array_size};

/// Shrinks the array's growable storage if it has become oversized for its
/// new element count. `old_size` is the array's size *before* the mutation
/// that triggered this call — for `remove` that is the pre-decrement size,
/// for `destruct` it is `0`. This function is a pure function of
/// `old_size`: it never re-reads the block's live `arraySize` to decide
/// whether or how far to shrink, which is what lets `destruct`
/// unconditionally tear the array down to `InlineOnly` regardless of how
/// many live elements remain.
pub fn repack_if_necessary<D: Database>(
	inline_size: u32,
	db: &mut D,
	a: Addr,
	old_size: u32,
) -> Result<(), Error<D::Error>> {
	let block_slots = max_block::<D>();
	let g = db.get_rec_ptr(a);
	if g == 0 {
		return Ok(());
	}

	let current = allocated_size(db, g);
	let new_size = old_size.saturating_sub(1);
	let new_target = growable_region_size_for(new_size, inline_size, block_slots);
	if new_target >= current {
		return Ok(());
	}

	if current > block_slots {
		shrink_metablock(inline_size, db, a, g, new_size, new_target, block_slots)
	} else {
		shrink_single_block(inline_size, db, a, g, new_size, new_target)
	}
}

fn shrink_metablock<D: Database>(
	inline_size: u32,
	db: &mut D,
	a: Addr,
	g: Addr,
	new_size: u32,
	new_target: u32,
	block_slots: u32,
) -> Result<(), Error<D::Error>> {
	let current = allocated_size(db, g);
	let current_blocks = current / block_slots;
	// Child 0 always survives the free loop below: it is read as the sole
	// remaining child by the demotion branch that may follow.
	let desired_blocks = new_target.div_ceil(block_slots).max(1);

	let idle_trailing = current_blocks.saturating_sub(desired_blocks);
	let shrink_allowed = idle_trailing > 1 || new_target <= block_slots / 2 + 1;
	if !shrink_allowed {
		return Ok(());
	}

	for k in (desired_blocks..current_blocks).rev() {
		let child_slot = g + GROWABLE_BLOCK_HEADER_BYTES as Addr + k * PTR_SIZE as Addr;
		let child = db.get_rec_ptr(child_slot);
		db.free(child);
		db.put_rec_ptr(child_slot, 0);
	}

	if new_target > block_slots {
		db.put_int(g + 4, new_target as i32);
		return Ok(());
	}

	// Demote: the sole remaining child becomes the single growable block.
	let c0 = db.get_rec_ptr(g + GROWABLE_BLOCK_HEADER_BYTES as Addr);
	let m_size = stored_array_size(db, g);
	db.free(g);
	db.put_int(c0, m_size as i32);
	db.put_int(c0 + 4, block_slots as i32);
	db.put_rec_ptr(a, c0);

	shrink_single_block(inline_size, db, a, c0, new_size, new_target)
}

fn shrink_single_block<D: Database>(
	inline_size: u32,
	db: &mut D,
	a: Addr,
	g: Addr,
	new_size: u32,
	new_target: u32,
) -> Result<(), Error<D::Error>> {
	let current = allocated_size(db, g);
	let desired_growable = new_size.saturating_sub(inline_size);
	if desired_growable > current / 4 + 1 {
		return Ok(());
	}

	if new_target == 0 {
		db.free(g);
		db.put_rec_ptr(a, 0);
		return Ok(());
	}

	let new_block = resize_block(inline_size, db, a, g, new_target)?;
	db.put_rec_ptr(a, new_block);
	Ok(())
}
