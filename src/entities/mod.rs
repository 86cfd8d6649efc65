//! [Entities](Entity) represent the individual "things" tracked by an
//! [EntityManager](crate::manager::EntityManager).
//!
//! An [Entity] is only a handle. Its components, tags and subscribers live in a pooled record
//! owned by the manager, and can be reached through the [EntityRef] and [EntityMut] facades.

mod entity;
mod events;
mod entity_ref;
mod entity_record;

pub use entity::*;
pub use events::*;
pub use entity_ref::*;

pub(crate) use entity_record::*;
