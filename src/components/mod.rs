//! [Components](Component) are the units of data and behaviour attached to
//! [entities](crate::entities::Entity) at runtime.
//!
//! Every component type derives a stable name, used both to name the attached instance
//! and to build the keys of cached component groups.

mod naming;
mod component_set;
mod component_type;

pub use naming::*;
pub use component_set::*;
pub use component_type::*;
pub use entity_index_derive::Component;
