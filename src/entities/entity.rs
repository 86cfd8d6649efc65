use std::sync::atomic::{AtomicU64, Ordering};
use std::fmt;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A handle to an entity living in an [EntityManager](crate::manager::EntityManager).
///
/// Ids are drawn from a process-wide counter and are never reused, so a handle to a removed
/// entity can never alias a newer one, even when the underlying record has been recycled.
/// The handle also remembers which manager issued it.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Entity {
	id: u64,
	manager: u32,
}

impl Entity {
	pub(crate) fn new(manager: u32) -> Self {
		Self {
			id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
			manager,
		}
	}

	/// The unique id of the entity.
	#[inline(always)]
	pub const fn id(&self) -> u64 {
		self.id
	}

	/// The id of the [EntityManager](crate::manager::EntityManager) that created the entity.
	#[inline(always)]
	pub const fn manager_id(&self) -> u32 {
		self.manager
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.id)
	}
}
