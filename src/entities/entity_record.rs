use crate::components::{Component, ComponentType};
use crate::entities::{Entity, Subscriber};
use crate::error::{EcsError, EcsResult};
use crate::data_structures::Recycle;
use std::hash::BuildHasherDefault;
use indexmap::{IndexMap, IndexSet};
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::{Any, TypeId};

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// A live component instance together with the name it is attached under.
pub(crate) struct Attachment {
	pub ty: ComponentType,
	pub name: String,
	pub value: Box<dyn Any>,
}

/// The per-entity state: attached components, tags and subscribers.
///
/// Components and tags keep their insertion order.
/// Records are pooled by the manager and recycled when their entity is removed.
#[derive(Default)]
pub(crate) struct EntityRecord {
	pub components: IndexMap<TypeId, Attachment>,
	pub tags: IndexSet<String>,
	pub subscribers: Vec<Subscriber>,
}

impl EntityRecord {
	#[inline(always)]
	pub fn has_component(&self, id: TypeId) -> bool {
		self.components.contains_key(&id)
	}

	pub fn has_all_components(&self, types: &[ComponentType]) -> bool {
		types.iter().all(|ty| self.has_component(ty.id()))
	}

	#[inline(always)]
	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags.contains(tag)
	}

	pub fn component_types(&self) -> impl Iterator<Item = ComponentType> + '_ {
		self.components.values().map(|attachment| attachment.ty)
	}

	pub fn get<T: Component>(&self) -> Option<&T> {
		self.components.get(&TypeId::of::<T>())?.value.downcast_ref()
	}

	pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
		self.components.get_mut(&TypeId::of::<T>())?.value.downcast_mut()
	}

	/// Among components sharing `name`, the earliest attached one wins.
	pub fn get_by_name(&self, name: &str) -> Option<&dyn Any> {
		self.components.values().find(|attachment| attachment.name == name).map(|attachment| &*attachment.value)
	}

	pub fn attach(&mut self, attachment: Attachment) {
		self.components.insert(attachment.ty.id(), attachment);
	}

	pub fn detach(&mut self, id: TypeId) -> Option<Attachment> {
		self.components.shift_remove(&id)
	}
}

impl Recycle for EntityRecord {
	fn recycle(&mut self) {
		self.components.clear();
		self.tags.clear();
		self.subscribers.clear();
	}
}

/// The records of every live entity of a single manager, keyed by entity id.
pub(crate) struct RecordStore {
	manager: u32,
	records: HashMap<u64, EntityRecord, Hasher>,
}

impl RecordStore {
	pub fn new(manager: u32) -> Self {
		Self {
			manager,
			records: HashMap::default(),
		}
	}

	/// Fails if `entity` was issued by another manager or is no longer alive.
	pub fn check(&self, entity: Entity) -> EcsResult<()> {
		if entity.manager_id() != self.manager {
			return Err(EcsError::ForeignEntity {
				entity,
				owner: entity.manager_id(),
				manager: self.manager,
			});
		}

		match self.records.contains_key(&entity.id()) {
			true => Ok(()),
			false => Err(EcsError::EntityNotFound(entity)),
		}
	}

	pub fn contains(&self, entity: Entity) -> bool {
		entity.manager_id() == self.manager && self.records.contains_key(&entity.id())
	}

	pub fn get(&self, entity: Entity) -> EcsResult<&EntityRecord> {
		self.check(entity)?;
		self.records.get(&entity.id()).ok_or(EcsError::EntityNotFound(entity))
	}

	pub fn get_mut(&mut self, entity: Entity) -> EcsResult<&mut EntityRecord> {
		self.check(entity)?;
		self.records.get_mut(&entity.id()).ok_or(EcsError::EntityNotFound(entity))
	}

	pub fn insert(&mut self, entity: Entity, record: EntityRecord) {
		debug_assert_eq!(entity.manager_id(), self.manager);
		self.records.insert(entity.id(), record);
	}

	pub fn remove(&mut self, entity: Entity) -> EcsResult<EntityRecord> {
		self.check(entity)?;
		self.records.remove(&entity.id()).ok_or(EcsError::EntityNotFound(entity))
	}
}
