use crate::components::{group_key, ComponentSet, ComponentType};
use crate::entities::{Entity, EntityRecord};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use crate::error::EcsResult;
use std::any::TypeId;
use std::rc::Rc;

/// A cached query result: the entities holding every component of a defining set.
pub(crate) struct Group {
	components: Vec<ComponentType>,
	entities: Vec<Entity>,
}

impl Group {
	pub fn new(types: Vec<ComponentType>, entities: Vec<Entity>) -> Self {
		let mut components = Vec::with_capacity(types.len());
		for ty in types {
			if !components.contains(&ty) {
				components.push(ty);
			}
		}

		Self { components, entities }
	}

	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	#[inline(always)]
	fn requires(&self, id: TypeId) -> bool {
		self.components.iter().any(|ty| ty.id() == id)
	}
}

/// All [groups](Group) of a manager, keyed by their canonical [group key](group_key).
///
/// Groups are created on first query and from then on updated incrementally by
/// every attach and detach.
#[derive(Default)]
pub(crate) struct GroupStore {
	groups: HashMap<Rc<str>, Group>,
	set_keys: HashMap<TypeId, Rc<str>>,
}

impl GroupStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn key_of(types: &[ComponentType]) -> EcsResult<Rc<str>> {
		Ok(Rc::from(group_key(types)?))
	}

	/// The key of a static [ComponentSet], computed once per set type.
	pub fn key_of_set<S: ComponentSet>(&mut self) -> EcsResult<Rc<str>> {
		let id = TypeId::of::<S>();
		if let Some(key) = self.set_keys.get(&id) {
			return Ok(key.clone());
		}

		let key = Self::key_of(&S::component_types())?;
		self.set_keys.insert(id, key.clone());
		Ok(key)
	}

	pub fn get(&self, key: &str) -> Option<&Group> {
		self.groups.get(key)
	}

	pub fn get_or_insert_with(&mut self, key: Rc<str>, create: impl FnOnce() -> Group) -> &Group {
		match self.groups.entry(key) {
			Entry::Occupied(entry) => entry.into_mut(),
			Entry::Vacant(entry) => {
				let group = create();
				tracing::debug!(
					key = &**entry.key(),
					entities = group.entities.len(),
					"created component group"
				);
				entry.insert(group)
			},
		}
	}

	/// Indexes `entity` in every group requiring `ty` that it now fully satisfies.
	/// `record` must already contain `ty`.
	pub fn on_component_added(&mut self, entity: Entity, ty: &ComponentType, record: &EntityRecord) {
		for group in self.groups.values_mut().filter(|g| g.requires(ty.id())) {
			if record.has_all_components(&group.components) && !group.entities.contains(&entity) {
				group.entities.push(entity);
			}
		}
	}

	/// Unindexes `entity` from every group requiring `ty` that it satisfied.
	/// `record` must still contain `ty`.
	pub fn on_component_removed(&mut self, entity: Entity, ty: &ComponentType, record: &EntityRecord) {
		for group in self.groups.values_mut().filter(|g| g.requires(ty.id())) {
			if record.has_all_components(&group.components) {
				if let Some(index) = group.entities.iter().position(|e| *e == entity) {
					group.entities.remove(index);
				}
			}
		}
	}

	// A group with an empty defining set matches every live entity.
	pub fn on_entity_created(&mut self, entity: Entity) {
		for group in self.groups.values_mut().filter(|g| g.components.is_empty()) {
			group.entities.push(entity);
		}
	}

	pub fn on_entity_removed(&mut self, entity: Entity) {
		for group in self.groups.values_mut().filter(|g| g.components.is_empty()) {
			group.entities.retain(|e| *e != entity);
		}
	}
}
