//! Errors raised by the [EntityManager](crate::manager::EntityManager).
//!
//! Membership operations that find nothing to do (adding a tag twice, removing an
//! absent component, ...) are not errors; they report `false` instead.

use crate::entities::Entity;
use thiserror::Error;

/// Errors that can occur while mutating or querying an [EntityManager](crate::manager::EntityManager).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	/// The entity was never created by this manager or has already been removed.
	#[error("entity {0} is not alive in this manager")]
	EntityNotFound(Entity),

	/// The entity handle was issued by a different manager.
	#[error("entity {entity} belongs to manager {owner}, not manager {manager}")]
	ForeignEntity {
		/// The offending handle.
		entity: Entity,
		/// The manager that issued the handle.
		owner: u32,
		/// The manager the handle was passed to.
		manager: u32,
	},

	/// The component type derived an empty name.
	#[error("component type `{type_name}` derived an empty name")]
	UnnamedComponent {
		/// The Rust type name of the component.
		type_name: &'static str,
	},
}

/// Result type for [EntityManager](crate::manager::EntityManager) operations.
pub type EcsResult<T> = Result<T, EcsError>;
