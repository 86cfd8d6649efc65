use crate::entities::{
	Attachment, Entity, EntityEvent, EntityEventKind, EntityMut, EntityRecord, EntityRef, RecordStore, Subscriber,
	SubscriptionId,
};
use crate::components::{attachment_name, Component, ComponentSet, ComponentType};
use crate::manager::{Group, GroupStore, ManagerOptions};
use std::sync::atomic::{AtomicU32, Ordering};
use crate::data_structures::Pool;
use std::collections::HashMap;
use crate::error::EcsResult;
use std::any::Any;
use std::rc::Rc;

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// A container for [entities](Entity), their [components](Component) and their tags.
///
/// Every structural change goes through the manager, which keeps two indexes in sync with it:
/// - the tag index, answering [`query_tag`](EntityManager::query_tag),
/// - the component groups, answering [`query_components`](EntityManager::query_components).
///
/// Groups are built the first time a combination of component types is queried and are then
/// updated incrementally, so repeated queries never rescan the entity population.
///
/// # Live lists
/// Both queries return the manager's backing list itself rather than a copy.
/// The slice reflects the state at the time of the call; a later structural change mutates the
/// same list in place, so it must be queried again (the borrow checker enforces this).
pub struct EntityManager {
	id: u32,
	options: ManagerOptions,

	entities: Vec<Entity>,
	records: RecordStore,
	tags: HashMap<String, Vec<Entity>>,
	groups: GroupStore,

	record_pool: Pool<EntityRecord>,
	entity_vec_pool: Pool<Vec<Entity>>,
	type_vec_pool: Pool<Vec<ComponentType>>,
	next_subscription: u64,
}

impl EntityManager {
	pub fn new() -> Self {
		Self::with_options(ManagerOptions::default())
	}

	pub fn with_options(options: ManagerOptions) -> Self {
		let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
		Self {
			id,
			options,

			entities: Vec::new(),
			records: RecordStore::new(id),
			tags: HashMap::new(),
			groups: GroupStore::new(),

			record_pool: Pool::new(),
			entity_vec_pool: Pool::new(),
			type_vec_pool: Pool::new(),
			next_subscription: 1,
		}
	}

	/// The unique id of this manager, as recorded in every [entity](Entity) it creates.
	pub fn id(&self) -> u32 {
		self.id
	}

	pub fn options(&self) -> &ManagerOptions {
		&self.options
	}

	/// The number of live [entities](Entity).
	#[inline(always)]
	pub fn count(&self) -> usize {
		self.entities.len()
	}

	/// All live [entities](Entity), in creation order.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.records.contains(entity)
	}

	/// The number of component groups created so far.
	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	/// Creates an [entity](Entity) with no components or tags.
	/// Its record is taken from the pool when one is available.
	pub fn create_entity(&mut self) -> Entity {
		let entity = Entity::new(self.id);
		let record = self.record_pool.acquire();

		self.records.insert(entity, record);
		self.entities.push(entity);
		self.groups.on_entity_created(entity);

		tracing::trace!(%entity, "created entity");
		entity
	}

	/// Creates an [entity](Entity) and returns a facade to it.
	pub fn spawn(&mut self) -> EntityMut<'_> {
		let entity = self.create_entity();
		EntityMut::new(entity, self)
	}

	pub fn entity(&self, entity: Entity) -> EcsResult<EntityRef<'_>> {
		let record = self.records.get(entity)?;
		Ok(EntityRef::new(entity, record))
	}

	pub fn entity_mut(&mut self, entity: Entity) -> EcsResult<EntityMut<'_>> {
		self.records.check(entity)?;
		Ok(EntityMut::new(entity, self))
	}

	/// Removes an [entity](Entity) and returns its record to the pool.
	///
	/// Every component is detached first, with the usual notifications and group updates.
	/// The entity is then dropped from the tag index and its subscribers are discarded.
	/// Fails if the entity is not alive in this manager, including when it was already removed.
	pub fn remove_entity(&mut self, entity: Entity) -> EcsResult<()> {
		self.records.check(entity)?;
		self.entity_remove_all_components(entity)?;

		// Bulk removals run back-to-front.
		if let Some(index) = self.entities.iter().rposition(|e| *e == entity) {
			self.entities.remove(index);
		}

		let record = self.records.remove(entity)?;
		for tag in record.tags.iter() {
			if let Some(tagged) = self.tags.get_mut(tag) {
				tagged.retain(|e| *e != entity);
			}
		}

		self.groups.on_entity_removed(entity);
		self.record_pool.release(record);

		tracing::trace!(%entity, "removed entity");
		Ok(())
	}

	/// Removes every [entity](Entity) holding `tag`. Returns how many were removed.
	pub fn remove_entities_by_tag(&mut self, tag: &str) -> EcsResult<usize> {
		let _span = tracing::trace_span!("remove_entities_by_tag", tag).entered();

		let mut snapshot = self.entity_vec_pool.take_one();
		if let Some(tagged) = self.tags.get(tag) {
			snapshot.extend_from_slice(tagged);
		}

		for entity in snapshot.iter().rev() {
			self.remove_entity(*entity)?;
		}

		Ok(snapshot.len())
	}

	/// Removes every live [entity](Entity). Returns how many were removed.
	pub fn remove_all_entities(&mut self) -> EcsResult<usize> {
		let _span = tracing::trace_span!("remove_all_entities", count = self.entities.len()).entered();

		let mut snapshot = self.entity_vec_pool.take_one();
		snapshot.extend_from_slice(&self.entities);

		for entity in snapshot.iter().rev() {
			self.remove_entity(*entity)?;
		}

		Ok(snapshot.len())
	}

	/// Adds `tag` to the entity.
	/// Returns `false` if the entity already held the tag.
	pub fn entity_add_tag(&mut self, entity: Entity, tag: &str) -> EcsResult<bool> {
		let record = self.records.get_mut(entity)?;
		if record.has_tag(tag) {
			return Ok(false);
		}

		record.tags.insert(tag.to_owned());
		match self.tags.get_mut(tag) {
			Some(tagged) => tagged.push(entity),
			None => {
				self.tags.insert(tag.to_owned(), vec![entity]);
			},
		}

		Ok(true)
	}

	/// Removes `tag` from the entity.
	/// Returns `false` if the entity did not hold the tag.
	pub fn entity_remove_tag(&mut self, entity: Entity, tag: &str) -> EcsResult<bool> {
		let record = self.records.get_mut(entity)?;
		if !record.tags.shift_remove(tag) {
			return Ok(false);
		}

		if let Some(tagged) = self.tags.get_mut(tag) {
			if let Some(index) = tagged.iter().position(|e| *e == entity) {
				tagged.remove(index);
			}
		}

		Ok(true)
	}

	/// Attaches `value` to the entity.
	/// Returns `false`, dropping `value`, if a component of the same type is already attached.
	pub fn entity_add_component<T: Component>(&mut self, entity: Entity, value: T) -> EcsResult<bool> {
		self.entity_add_component_with(entity, move |_| value)
	}

	/// Constructs a component for the entity and attaches it.
	///
	/// `ctor` receives the owning entity and only runs if no component of type `T` is attached yet;
	/// otherwise this is a no-op returning `false`.
	/// Once attached, the entity joins every existing group it now satisfies,
	/// then [`EntityEvent::ComponentAdded`] is emitted.
	pub fn entity_add_component_with<T: Component>(
		&mut self, entity: Entity, ctor: impl FnOnce(Entity) -> T,
	) -> EcsResult<bool> {
		let ty = ComponentType::of::<T>();
		if self.records.get(entity)?.has_component(ty.id()) {
			return Ok(false);
		}

		let name = attachment_name(&ty, self.options.camel_case)?;
		let value: Box<dyn Any> = Box::new(ctor(entity));

		let record = self.records.get_mut(entity)?;
		record.attach(Attachment { ty, name, value });
		self.groups.on_component_added(entity, &ty, record);

		tracing::trace!(%entity, component = %ty, "attached component");
		self.emit(entity, EntityEvent::ComponentAdded { entity, component: ty });
		Ok(true)
	}

	/// Detaches the component of type `T` from the entity.
	/// Returns `false` if no such component was attached.
	pub fn entity_remove_component<T: Component>(&mut self, entity: Entity) -> EcsResult<bool> {
		self.entity_remove_component_type(entity, &ComponentType::of::<T>())
	}

	/// Detaches the component of type `ty` from the entity.
	///
	/// [`EntityEvent::ComponentRemoved`] is emitted first, while observers can still read the component.
	/// The entity then leaves every group requiring `ty` before the component is dropped.
	pub fn entity_remove_component_type(&mut self, entity: Entity, ty: &ComponentType) -> EcsResult<bool> {
		if !self.records.get(entity)?.has_component(ty.id()) {
			return Ok(false);
		}

		self.emit(entity, EntityEvent::ComponentRemoved { entity, component: *ty });

		let record = self.records.get_mut(entity)?;
		self.groups.on_component_removed(entity, ty, record);
		record.detach(ty.id());

		tracing::trace!(%entity, component = %ty, "detached component");
		Ok(true)
	}

	/// Detaches every component of the entity, newest first, through
	/// [`entity_remove_component_type`](EntityManager::entity_remove_component_type).
	/// Returns how many components were detached.
	pub fn entity_remove_all_components(&mut self, entity: Entity) -> EcsResult<usize> {
		let mut snapshot = self.type_vec_pool.take_one();
		snapshot.extend(self.records.get(entity)?.component_types());

		for ty in snapshot.iter().rev() {
			self.entity_remove_component_type(entity, ty)?;
		}

		Ok(snapshot.len())
	}

	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.records.get(entity).ok()?.get::<T>()
	}

	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		self.records.get_mut(entity).ok()?.get_mut::<T>()
	}

	/// Looks a component up by its attachment name, see [`ManagerOptions::camel_case`].
	/// If distinct types share the name, the earliest attached one is returned
	/// and the collision is reported through [`is_colliding_token`](crate::components::is_colliding_token).
	pub fn get_component_by_name(&self, entity: Entity, name: &str) -> Option<&dyn Any> {
		self.records.get(entity).ok()?.get_by_name(name)
	}

	/// The tags of the entity, in the order they were added.
	pub fn tags_of(&self, entity: Entity) -> EcsResult<impl Iterator<Item = &str> + '_> {
		Ok(self.records.get(entity)?.tags.iter().map(String::as_str))
	}

	/// The component types attached to the entity, in the order they were attached.
	pub fn component_types_of(&self, entity: Entity) -> EcsResult<impl Iterator<Item = ComponentType> + '_> {
		Ok(self.records.get(entity)?.component_types())
	}

	/// Returns every live [entity](Entity) holding all of `types`.
	///
	/// The order of `types` is irrelevant: any permutation of the same set resolves to the same group.
	/// The group is created and filled on first use, then kept up to date by every attach and detach.
	/// The returned slice is the group's live backing list, not a snapshot.
	pub fn query_components(&mut self, types: &[ComponentType]) -> EcsResult<&[Entity]> {
		let key = GroupStore::key_of(types)?;
		Ok(self.group_entities(key, || types.to_vec()))
	}

	/// Typed form of [`query_components`](EntityManager::query_components).
	/// The group key of `S` is computed once and reused on later calls.
	pub fn query<S: ComponentSet>(&mut self) -> EcsResult<&[Entity]> {
		let key = self.groups.key_of_set::<S>()?;
		Ok(self.group_entities(key, S::component_types))
	}

	/// Like [`query_components`](EntityManager::query_components), but never creates a group.
	/// Returns `None` if the combination has not been queried yet.
	pub fn cached_query(&self, types: &[ComponentType]) -> EcsResult<Option<&[Entity]>> {
		let key = GroupStore::key_of(types)?;
		Ok(self.groups.get(&key).map(Group::entities))
	}

	/// Returns every live [entity](Entity) holding `tag`, in tagging order.
	///
	/// The first query for a tag creates an empty entry which is kept from then on.
	/// The returned slice is the live backing list, not a snapshot.
	pub fn query_tag(&mut self, tag: &str) -> &[Entity] {
		if !self.tags.contains_key(tag) {
			self.tags.insert(tag.to_owned(), Vec::new());
		}

		self.tags.get(tag).map(Vec::as_slice).unwrap_or_default()
	}

	/// Registers `observer` for events of the given kind emitted by the entity.
	pub fn subscribe(
		&mut self, entity: Entity, kind: EntityEventKind, observer: impl FnMut(&EntityManager, &EntityEvent) + 'static,
	) -> EcsResult<SubscriptionId> {
		let id = SubscriptionId(self.next_subscription);
		self.records.get_mut(entity)?.subscribers.push(Subscriber {
			id,
			kind,
			observer: Box::new(observer),
		});

		self.next_subscription += 1;
		Ok(id)
	}

	/// Returns `false` if the subscription did not exist.
	pub fn unsubscribe(&mut self, entity: Entity, subscription: SubscriptionId) -> EcsResult<bool> {
		let subscribers = &mut self.records.get_mut(entity)?.subscribers;
		match subscribers.iter().position(|s| s.id == subscription) {
			Some(index) => {
				subscribers.remove(index);
				Ok(true)
			},
			None => Ok(false),
		}
	}

	/// Drops every subscriber of the entity. Returns how many were dropped.
	pub fn unsubscribe_all(&mut self, entity: Entity) -> EcsResult<usize> {
		let subscribers = &mut self.records.get_mut(entity)?.subscribers;
		let count = subscribers.len();
		subscribers.clear();
		Ok(count)
	}

	fn group_entities(&mut self, key: Rc<str>, types: impl FnOnce() -> Vec<ComponentType>) -> &[Entity] {
		let entities = &self.entities;
		let records = &self.records;

		let group = self.groups.get_or_insert_with(key, || {
			let types = types();
			let matching = entities
				.iter()
				.copied()
				.filter(|e| records.get(*e).map_or(false, |r| r.has_all_components(&types)))
				.collect();
			Group::new(types, matching)
		});

		group.entities()
	}

	fn emit(&mut self, entity: Entity, event: EntityEvent) {
		let mut subscribers = match self.records.get_mut(entity) {
			Ok(record) if !record.subscribers.is_empty() => std::mem::take(&mut record.subscribers),
			_ => return,
		};

		let kind = event.kind();
		for subscriber in subscribers.iter_mut().filter(|s| s.kind == kind) {
			(subscriber.observer)(&*self, &event);
		}

		// Observers only get shared access, so the list cannot have changed meanwhile.
		if let Ok(record) = self.records.get_mut(entity) {
			record.subscribers = subscribers;
		}
	}
}

impl Default for EntityManager {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EntityManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EntityManager")
			.field("id", &self.id)
			.field("options", &self.options)
			.field("entities", &self.entities.len())
			.field("tags", &self.tags.len())
			.field("groups", &self.groups.len())
			.finish()
	}
}
