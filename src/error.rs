use core::fmt::{self, Debug, Display, Formatter};

/// Errors raised by the operations on [`crate::PersistentArray`].
///
/// The first two variants are programmer errors: they are reported to the
/// caller and never mutate the underlying database. The third variant is a
/// passthrough of whatever the external [`Database`](crate::Database) reports
/// for a failed `malloc` — this crate does not interpret or retry it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
	/// `add` was called with the reserved tombstone value `0`.
	InvalidArgument,
	/// An index was out of bounds for the array's current size.
	IndexError,
	/// The external database failed to satisfy a `malloc` request.
	Database(E),
}

impl<E: Debug> Debug for Error<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Error::InvalidArgument => f.write_str("InvalidArgument"),
			Error::IndexError => f.write_str("IndexError"),
			Error::Database(e) => f.debug_tuple("Database").field(e).finish(),
		}
	}
}

impl<E: Display> Display for Error<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Error::InvalidArgument => f.write_str("value 0 is a reserved tombstone and cannot be added"),
			Error::IndexError => f.write_str("index out of bounds"),
			Error::Database(e) => write!(f, "database allocation failed: {e}"),
		}
	}
}

impl<E: Debug + Display> core::error::Error for Error<E> {}
