#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction options of an [EntityManager](crate::manager::EntityManager).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ManagerOptions {
	/// Lowercase the first character of a component's name when naming its attached instance.
	/// `Position` is then reachable as `position`. Defaults to `true`.
	pub camel_case: bool,
}

impl ManagerOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_camel_case(mut self, camel_case: bool) -> Self {
		self.camel_case = camel_case;
		self
	}
}

impl Default for ManagerOptions {
	fn default() -> Self {
		Self { camel_case: true }
	}
}
