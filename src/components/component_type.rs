use crate::error::{EcsError, EcsResult};
use crate::components::naming;
use std::hash::{Hash, Hasher};
use std::any::{Any, TypeId};
use std::fmt;

/// A piece of data or behaviour that can be attached to an [entity](crate::entities::Entity).
///
/// Usually implemented through #\[derive([`Component`](entity_index_derive::Component))],
/// which emits [`Component::name`] from the type's identifier or from `#[component(name = "...")]`.
pub trait Component: Any {
	/// The stable name of the component type.
	///
	/// It names the attached instance on its entity and takes part in group keys,
	/// so it must not be empty. Defaults to the unqualified Rust type name.
	fn name() -> &'static str {
		naming::short_type_name(std::any::type_name::<Self>())
	}
}

/// A runtime representation of a type implementing the [`Component`] trait.
#[derive(Clone, Copy)]
pub struct ComponentType {
	id: TypeId,
	type_name: &'static str,
	name: fn() -> &'static str,
}

impl ComponentType {
	/// Returns the [`ComponentType`] of T.
	pub fn of<T: Component>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			type_name: std::any::type_name::<T>(),
			name: T::name,
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	/// The fully qualified Rust type name, for diagnostics.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// The derived component name.
	/// Fails with [`EcsError::UnnamedComponent`] when the derived name is empty.
	pub fn name(&self) -> EcsResult<&'static str> {
		let name = (self.name)();
		if name.is_empty() {
			return Err(EcsError::UnnamedComponent {
				type_name: self.type_name,
			});
		}

		Ok(name)
	}
}

impl Eq for ComponentType {}

impl PartialEq<Self> for ComponentType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Hash for ComponentType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}

impl fmt::Debug for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ComponentType").field(&self.type_name).finish()
	}
}

impl fmt::Display for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str((self.name)())
	}
}
