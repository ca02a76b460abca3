use crate::db::{Database, PTR_SIZE};

/// Size, in bytes, of the header shared by every growable block and
/// metablock: a 4-byte `arraySize` followed by a 4-byte `allocatedSize`.
pub const GROWABLE_BLOCK_HEADER_BYTES: usize = 2 * 4;

/// Byte size of the array header for a given `inlineSize`: one pointer slot
/// for `growableBlockAddress`, followed by `inlineSize` element slots.
pub const fn array_header_bytes(inline_size: u32) -> usize {
	PTR_SIZE + inline_size as usize * PTR_SIZE
}

/// Largest number of element slots that fit in one database chunk once the
/// database's own block header and this crate's growable-block header are
/// accounted for.
pub fn max_block<D: Database>() -> u32 {
	let available = D::CHUNK_SIZE
		.saturating_sub(D::BLOCK_HEADER_SIZE)
		.saturating_sub(GROWABLE_BLOCK_HEADER_BYTES);
	(available / PTR_SIZE) as u32
}

/// Byte size of a single growable block (or metablock) sized to hold
/// `slots` elements (or child pointers).
pub const fn block_bytes(slots: u32) -> usize {
	GROWABLE_BLOCK_HEADER_BYTES + slots as usize * PTR_SIZE
}
