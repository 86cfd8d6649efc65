//! The [EntityManager] owns every live [entity](crate::entities::Entity) and keeps the
//! tag index and the component [group](EntityManager::query_components) cache consistent
//! with every structural change.

mod group;
mod options;
mod entity_manager;

pub use options::*;
pub use entity_manager::*;

pub(crate) use group::*;
