use crate::entities::{Entity, EntityEvent, EntityEventKind, EntityRecord, SubscriptionId};
use crate::components::{Component, ComponentSet, ComponentType};
use crate::manager::EntityManager;
use crate::error::EcsResult;
use std::any::{Any, TypeId};

/// Read-only view of a live [entity](Entity).
///
/// All checks are answered from the entity's own record, without consulting the manager's indexes.
pub struct EntityRef<'m> {
	entity: Entity,
	record: &'m EntityRecord,
}

/// Mutable facade over a live [entity](Entity).
///
/// Every structural change is forwarded to the owning [EntityManager], so going through the
/// facade is equivalent to calling the manager directly.
/// If the entity is removed through [`EntityMut::destroy`] the facade is consumed.
pub struct EntityMut<'m> {
	entity: Entity,
	manager: &'m mut EntityManager,
}

impl<'m> EntityRef<'m> {
	pub(crate) fn new(entity: Entity, record: &'m EntityRecord) -> Self {
		Self { entity, record }
	}

	pub fn entity(&self) -> Entity {
		self.entity
	}

	pub fn has_tag(&self, tag: &str) -> bool {
		self.record.has_tag(tag)
	}

	pub fn has_component<T: Component>(&self) -> bool {
		self.record.has_component(TypeId::of::<T>())
	}

	pub fn has_component_type(&self, ty: &ComponentType) -> bool {
		self.record.has_component(ty.id())
	}

	/// Returns `true` if every type in `types` is attached. An empty slice is always satisfied.
	pub fn has_all_components(&self, types: &[ComponentType]) -> bool {
		self.record.has_all_components(types)
	}

	pub fn has_all<S: ComponentSet>(&self) -> bool {
		self.record.has_all_components(&S::component_types())
	}

	/// The entity's tags, in the order they were added.
	pub fn tags(&self) -> impl Iterator<Item = &'m str> + 'm {
		self.record.tags.iter().map(String::as_str)
	}

	/// The attached component types, in the order they were added.
	pub fn component_types(&self) -> impl Iterator<Item = ComponentType> + 'm {
		self.record.component_types()
	}

	pub fn get<T: Component>(&self) -> Option<&'m T> {
		self.record.get::<T>()
	}

	/// Looks a component up by its attachment name (see [`ManagerOptions`](crate::manager::ManagerOptions)).
	pub fn get_by_name(&self, name: &str) -> Option<&'m dyn Any> {
		self.record.get_by_name(name)
	}
}

impl<'m> EntityMut<'m> {
	pub(crate) fn new(entity: Entity, manager: &'m mut EntityManager) -> Self {
		Self { entity, manager }
	}

	pub fn entity(&self) -> Entity {
		self.entity
	}

	/// A read-only view of the same entity.
	/// Fails only if the entity is no longer alive, which cannot happen while the facade exists.
	pub fn view(&self) -> EcsResult<EntityRef<'_>> {
		self.manager.entity(self.entity)
	}

	pub fn has_tag(&self, tag: &str) -> bool {
		self.view().map_or(false, |e| e.has_tag(tag))
	}

	pub fn has_component<T: Component>(&self) -> bool {
		self.view().map_or(false, |e| e.has_component::<T>())
	}

	pub fn has_component_type(&self, ty: &ComponentType) -> bool {
		self.view().map_or(false, |e| e.has_component_type(ty))
	}

	pub fn has_all_components(&self, types: &[ComponentType]) -> bool {
		self.view().map_or(false, |e| e.has_all_components(types))
	}

	pub fn has_all<S: ComponentSet>(&self) -> bool {
		self.view().map_or(false, |e| e.has_all::<S>())
	}

	pub fn get<T: Component>(&self) -> Option<&T> {
		self.manager.get_component::<T>(self.entity)
	}

	pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
		self.manager.get_component_mut::<T>(self.entity)
	}

	pub fn add_tag(&mut self, tag: &str) -> EcsResult<bool> {
		self.manager.entity_add_tag(self.entity, tag)
	}

	pub fn remove_tag(&mut self, tag: &str) -> EcsResult<bool> {
		self.manager.entity_remove_tag(self.entity, tag)
	}

	pub fn add_component<T: Component>(&mut self, value: T) -> EcsResult<bool> {
		self.manager.entity_add_component(self.entity, value)
	}

	pub fn add_component_with<T: Component>(&mut self, ctor: impl FnOnce(Entity) -> T) -> EcsResult<bool> {
		self.manager.entity_add_component_with(self.entity, ctor)
	}

	pub fn remove_component<T: Component>(&mut self) -> EcsResult<bool> {
		self.manager.entity_remove_component::<T>(self.entity)
	}

	pub fn remove_all_components(&mut self) -> EcsResult<usize> {
		self.manager.entity_remove_all_components(self.entity)
	}

	pub fn subscribe(
		&mut self, kind: EntityEventKind, observer: impl FnMut(&EntityManager, &EntityEvent) + 'static,
	) -> EcsResult<SubscriptionId> {
		self.manager.subscribe(self.entity, kind, observer)
	}

	pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> EcsResult<bool> {
		self.manager.unsubscribe(self.entity, subscription)
	}

	/// Removes the entity from its manager.
	pub fn destroy(self) -> EcsResult<()> {
		self.manager.remove_entity(self.entity)
	}
}
