use crate::db::{Addr, Database, PTR_SIZE};
use crate::error::Error;
use crate::layout::{block_bytes, max_block, GROWABLE_BLOCK_HEADER_BYTES};
use crate::size::{allocated_size, size};

/// The geometric target size for the growable region (in elements,
/// excluding the inline slots) once the array needs to hold `desired`
/// elements in total.
pub(crate) fn growable_region_size_for(desired: u32, inline_size: u32, max_block: u32) -> u32 {
	if desired <= inline_size {
		return 0;
	}
	let need = desired - inline_size;

	let p = next_power_of_two(need.max(inline_size));
	if p <= max_block {
		return p;
	}
	if need <= max_block {
		return max_block;
	}
	round_up(need, max_block)
}

fn next_power_of_two(n: u32) -> u32 {
	if n == 0 { 0 } else { n.next_power_of_two() }
}

fn round_up(n: u32, m: u32) -> u32 {
	n.div_ceil(m) * m
}

/// Grows the array at `a` so that it can hold at least `desired` elements.
/// A no-op if the current allocation already covers `desired`.
pub fn ensure_capacity<D: Database>(
	inline_size: u32,
	db: &mut D,
	a: Addr,
	desired: u32,
) -> Result<(), Error<D::Error>> {
	let block_slots = max_block::<D>();
	let g = db.get_rec_ptr(a);
	let current = if g == 0 { 0 } else { allocated_size(db, g) };
	let need = desired.saturating_sub(inline_size);
	if need <= current {
		return Ok(());
	}

	let target = growable_region_size_for(desired, inline_size, block_slots);

	if target <= block_slots {
		let new_block = resize_block(inline_size, db, a, g, target)?;
		db.put_rec_ptr(a, new_block);
		return Ok(());
	}

	debug_assert_eq!(target % block_slots, 0, "metablock target must be a multiple of max_block");

	let m = if current <= block_slots {
		promote_to_metablock(inline_size, db, a, g, block_slots)?
	} else {
		g
	};

	let current_blocks = allocated_size(db, m) / block_slots;
	let target_blocks = target / block_slots;

	for k in current_blocks..target_blocks {
		let child = db.malloc(block_bytes(block_slots)).map_err(Error::Database)?;
		db.put_int(child, 0);
		db.put_int(child + 4, block_slots as i32);
		let slot = m + GROWABLE_BLOCK_HEADER_BYTES as Addr + k * PTR_SIZE as Addr;
		db.put_rec_ptr(slot, child);
	}

	db.put_int(m + 4, target as i32);
	Ok(())
}

/// Promotes a single growable block (or an empty array) into a metablock
/// with one child carrying the existing elements. Returns the metablock's
/// address; the caller still owns writing it into the header.
fn promote_to_metablock<D: Database>(
	inline_size: u32,
	db: &mut D,
	a: Addr,
	g: Addr,
	block_slots: u32,
) -> Result<Addr, Error<D::Error>> {
	let current_size = size(inline_size, db, a);
	let c0 = resize_block(inline_size, db, a, g, block_slots)?;

	let m = db.malloc(block_bytes(block_slots)).map_err(Error::Database)?;
	db.put_int(m, current_size as i32);
	db.put_int(m + 4, block_slots as i32);
	db.put_rec_ptr(m + GROWABLE_BLOCK_HEADER_BYTES as Addr, c0);
	db.put_rec_ptr(a, m);

	Ok(m)
}

/// Resizes the growable block at `g` (or allocates a fresh one if
/// `g == 0`) to `new_size` elements, carrying over the live element slots.
/// Copies element bytes only; the header fields of the new block are
/// written explicitly rather than carried over by the copy.
pub(crate) fn resize_block<D: Database>(
	inline_size: u32,
	db: &mut D,
	a: Addr,
	g: Addr,
	new_size: u32,
) -> Result<Addr, Error<D::Error>> {
	if g != 0 && allocated_size(db, g) == new_size {
		return Ok(g);
	}

	let current_size = size(inline_size, db, a);
	let new_block = db.malloc(block_bytes(new_size)).map_err(Error::Database)?;

	if g != 0 {
		let old_allocated = allocated_size(db, g);
		let live_elements = current_size
			.saturating_sub(inline_size)
			.min(old_allocated)
			.min(new_size);
		if live_elements > 0 {
			db.memcpy(
				new_block + GROWABLE_BLOCK_HEADER_BYTES as Addr,
				g + GROWABLE_BLOCK_HEADER_BYTES as Addr,
				live_elements as usize * PTR_SIZE,
			);
		}
		db.free(g);
	}

	db.put_int(new_block, current_size as i32);
	db.put_int(new_block + 4, new_size as i32);
	Ok(new_block)
}
