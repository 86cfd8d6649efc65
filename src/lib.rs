//! An in-memory entity-component index.
//!
//! An [EntityManager](manager::EntityManager) tracks a dynamic population of
//! [entities](entities::Entity), lets [component](components::Component) types be attached and
//! detached at runtime, and keeps two indexes up to date with every change:
//! entities by tag, and entities by combination of component types.

extern crate self as entity_index;

pub mod error;
pub mod manager;
pub mod entities;
pub mod components;
pub mod data_structures;

pub mod prelude {
	pub use crate::error::{EcsError, EcsResult};
	pub use crate::manager::{EntityManager, ManagerOptions};
	pub use crate::components::{Component, ComponentSet, ComponentType};
	pub use crate::entities::{
		Entity, EntityEvent, EntityEventKind, EntityMut, EntityRef, SubscriptionId,
	};
}

#[cfg(test)]
mod tests;
