use crate::components::ComponentType;
use crate::manager::EntityManager;
use crate::entities::Entity;

/// The kinds of [events](EntityEvent) an entity broadcasts to its subscribers.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum EntityEventKind {
	ComponentAdded,
	ComponentRemoved,
}

/// A structural change on a single entity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntityEvent {
	/// Emitted after the component has been attached and all groups have been updated.
	ComponentAdded { entity: Entity, component: ComponentType },
	/// Emitted before the component is detached, while it can still be read.
	ComponentRemoved { entity: Entity, component: ComponentType },
}

impl EntityEvent {
	pub fn kind(&self) -> EntityEventKind {
		match self {
			EntityEvent::ComponentAdded { .. } => EntityEventKind::ComponentAdded,
			EntityEvent::ComponentRemoved { .. } => EntityEventKind::ComponentRemoved,
		}
	}

	pub fn entity(&self) -> Entity {
		match self {
			EntityEvent::ComponentAdded { entity, .. } | EntityEvent::ComponentRemoved { entity, .. } => *entity,
		}
	}

	pub fn component(&self) -> ComponentType {
		match self {
			EntityEvent::ComponentAdded { component, .. } | EntityEvent::ComponentRemoved { component, .. } => {
				*component
			},
		}
	}
}

/// Identifies a subscription so it can later be removed.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct SubscriptionId(pub(crate) u64);

/// A callback invoked for every matching [EntityEvent].
///
/// Observers get read access to the manager, so they can inspect the entity's components
/// while the event is being delivered.
pub type Observer = Box<dyn FnMut(&EntityManager, &EntityEvent)>;

pub(crate) struct Subscriber {
	pub id: SubscriptionId,
	pub kind: EntityEventKind,
	pub observer: Observer,
}
