use crate::entities::{Entity, EntityEvent, EntityEventKind};
use crate::manager::{EntityManager, ManagerOptions};
use crate::tests::{Hp, Lifetime, Position, Velocity};
use crate::components::ComponentType;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<EntityEvent>>>;

fn record_events(manager: &mut EntityManager, entity: Entity) -> Log {
	let log = Log::default();
	for kind in [EntityEventKind::ComponentAdded, EntityEventKind::ComponentRemoved] {
		let sink = log.clone();
		manager.subscribe(entity, kind, move |_, event| sink.borrow_mut().push(*event)).unwrap();
	}
	log
}

#[test]
pub fn facade_forwards_to_manager() {
	let mut manager = EntityManager::new();

	let mut entity = manager.spawn();
	assert_eq!(entity.add_tag("player"), Ok(true));
	assert_eq!(entity.add_tag("player"), Ok(false));
	assert_eq!(entity.add_component(Position { x: 1.0, y: 1.0 }), Ok(true));
	assert_eq!(entity.add_component(Velocity::default()), Ok(true));
	assert!(entity.has_tag("player"));
	assert!(entity.has_component::<Position>());
	assert!(entity.has_all::<(Velocity, Position)>());
	assert!(!entity.has_all::<(Velocity, Hp)>());
	assert_eq!(entity.get::<Position>(), Some(&Position { x: 1.0, y: 1.0 }));

	if let Some(velocity) = entity.get_mut::<Velocity>() {
		velocity.x = 4.0;
	}

	let handle = entity.entity();
	assert_eq!(manager.query_tag("player"), [handle]);
	assert_eq!(manager.query::<(Position, Velocity)>().unwrap(), [handle]);
	assert_eq!(manager.get_component::<Velocity>(handle), Some(&Velocity { x: 4.0, y: 0.0 }));

	let mut entity = manager.entity_mut(handle).unwrap();
	assert_eq!(entity.remove_tag("player"), Ok(true));
	assert_eq!(entity.remove_component::<Velocity>(), Ok(true));
	assert_eq!(entity.remove_all_components(), Ok(1));
	assert!(!entity.has_component_type(&ComponentType::of::<Position>()));
	assert!(manager.query_tag("player").is_empty());
	assert!(manager.query::<(Position,)>().unwrap().is_empty());
}

#[test]
pub fn local_checks() {
	let mut manager = EntityManager::new();
	let handle = {
		let mut entity = manager.spawn();
		entity.add_component(Hp(7)).unwrap();
		entity.add_tag("a").unwrap();
		entity.add_tag("b").unwrap();
		entity.entity()
	};

	let entity = manager.entity(handle).unwrap();
	assert!(entity.has_all_components(&[]), "An empty requirement is always satisfied");
	assert!(entity.has_all_components(&[ComponentType::of::<Hp>()]));
	assert!(!entity.has_all_components(&[ComponentType::of::<Hp>(), ComponentType::of::<Position>()]));
	assert!(entity.has_tag("a") && entity.has_tag("b") && !entity.has_tag("c"));
	assert_eq!(entity.tags().collect::<Vec<_>>(), ["a", "b"]);
	assert_eq!(entity.component_types().collect::<Vec<_>>(), [ComponentType::of::<Hp>()]);
	assert_eq!(entity.get::<Hp>(), Some(&Hp(7)));
}

#[test]
pub fn components_are_reachable_by_attachment_name() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	manager.entity_add_component(entity, Position { x: 3.0, y: 0.0 }).unwrap();
	manager.entity_add_component(entity, Hp(2)).unwrap();
	manager.entity_add_component(entity, Lifetime(0.5f32)).unwrap();

	let position = manager.get_component_by_name(entity, "position").and_then(|c| c.downcast_ref::<Position>());
	assert_eq!(position, Some(&Position { x: 3.0, y: 0.0 }));
	assert!(manager.get_component_by_name(entity, "Position").is_none());
	assert!(manager.get_component_by_name(entity, "health").is_some());
	assert!(manager.get_component_by_name(entity, "lifetime").is_some());

	let mut manager = EntityManager::with_options(ManagerOptions::new().with_camel_case(false));
	let entity = manager.create_entity();
	manager.entity_add_component(entity, Position::default()).unwrap();

	assert!(!manager.options().camel_case);
	assert!(manager.get_component_by_name(entity, "Position").is_some());
	assert!(manager.get_component_by_name(entity, "position").is_none());
	assert!(manager.entity(entity).unwrap().get_by_name("Position").is_some());
}

#[test]
pub fn constructors_receive_their_entity() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();

	#[derive(crate::components::Component)]
	struct Owner(Entity);

	assert_eq!(manager.entity_add_component_with(entity, Owner), Ok(true));
	assert_eq!(manager.get_component::<Owner>(entity).map(|o| o.0), Some(entity));

	let mut called = false;
	let added = manager.entity_add_component_with(entity, |e| {
		called = true;
		Owner(e)
	});
	assert_eq!(added, Ok(false));
	assert!(!called, "The constructor must not run for an attached type");
}

#[test]
pub fn added_then_removed_notifications() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	let log = record_events(&mut manager, entity);
	let position = ComponentType::of::<Position>();

	manager.entity_add_component(entity, Position::default()).unwrap();
	manager.entity_remove_component::<Position>(entity).unwrap();

	assert_eq!(
		*log.borrow(),
		[
			EntityEvent::ComponentAdded { entity, component: position },
			EntityEvent::ComponentRemoved { entity, component: position },
		]
	);
	assert!(manager.get_component_by_name(entity, "position").is_none());
	assert!(!manager.entity(entity).unwrap().has_component::<Position>());
}

#[test]
pub fn no_op_changes_are_silent() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	manager.entity_add_component(entity, Hp(1)).unwrap();
	let log = record_events(&mut manager, entity);

	manager.entity_add_component(entity, Hp(2)).unwrap();
	manager.entity_remove_component::<Velocity>(entity).unwrap();
	assert!(log.borrow().is_empty());

	manager.entity_remove_component::<Hp>(entity).unwrap();
	assert_eq!(log.borrow().len(), 1);
	assert_eq!(log.borrow()[0].kind(), EntityEventKind::ComponentRemoved);
	assert_eq!(log.borrow()[0].component(), ComponentType::of::<Hp>());
	assert_eq!(log.borrow()[0].entity(), entity);
}

#[test]
pub fn removal_observers_see_the_component() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	manager.entity_add_component(entity, Position { x: 8.0, y: 9.0 }).unwrap();
	manager.query::<(Position,)>().unwrap();

	let seen = Rc::new(RefCell::new(None));
	let sink = seen.clone();
	manager
		.subscribe(entity, EntityEventKind::ComponentRemoved, move |manager, event| {
			let grouped = manager
				.cached_query(&[event.component()])
				.ok()
				.flatten()
				.map_or(false, |group| group.contains(&event.entity()));
			let position = manager.get_component::<Position>(event.entity()).copied();
			*sink.borrow_mut() = Some((position, grouped));
		})
		.unwrap();

	manager.entity_remove_component::<Position>(entity).unwrap();
	assert_eq!(*seen.borrow(), Some((Some(Position { x: 8.0, y: 9.0 }), true)));
	assert!(manager.query::<(Position,)>().unwrap().is_empty());
}

#[test]
pub fn addition_observers_see_updated_groups() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	manager.query::<(Velocity,)>().unwrap();

	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = seen.clone();
	manager
		.subscribe(entity, EntityEventKind::ComponentAdded, move |manager, event| {
			let group = manager.cached_query(&[event.component()]).unwrap().unwrap_or_default();
			sink.borrow_mut().push(group.to_vec());
		})
		.unwrap();

	manager.entity_add_component(entity, Velocity::default()).unwrap();
	assert_eq!(*seen.borrow(), [vec![entity]]);
}

#[test]
pub fn unsubscribe() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();

	let count = Rc::new(RefCell::new(0));
	let sink = count.clone();
	let mut facade = manager.entity_mut(entity).unwrap();
	let subscription = facade
		.subscribe(EntityEventKind::ComponentAdded, move |_, _| *sink.borrow_mut() += 1)
		.unwrap();

	facade.add_component(Hp(1)).unwrap();
	assert_eq!(facade.unsubscribe(subscription), Ok(true));
	assert_eq!(facade.unsubscribe(subscription), Ok(false));
	facade.add_component(Position::default()).unwrap();

	assert_eq!(*count.borrow(), 1);
}

#[test]
pub fn destroyed_entities_drop_their_subscribers() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	let log = record_events(&mut manager, entity);

	manager.entity_add_component(entity, Hp(1)).unwrap();
	manager.entity_add_component(entity, Velocity::default()).unwrap();
	manager.entity_mut(entity).unwrap().destroy().unwrap();

	// Both components were stripped, newest first.
	let kinds = log.borrow().iter().map(|e| (e.kind(), e.component())).collect::<Vec<_>>();
	assert_eq!(
		kinds,
		[
			(EntityEventKind::ComponentAdded, ComponentType::of::<Hp>()),
			(EntityEventKind::ComponentAdded, ComponentType::of::<Velocity>()),
			(EntityEventKind::ComponentRemoved, ComponentType::of::<Velocity>()),
			(EntityEventKind::ComponentRemoved, ComponentType::of::<Hp>()),
		]
	);
	assert!(manager.entity_mut(entity).is_err());

	// The record is recycled for the next entity, without the old subscribers.
	let recycled = manager.create_entity();
	manager.entity_add_component(recycled, Hp(2)).unwrap();
	assert_eq!(log.borrow().len(), 4);
	assert_eq!(manager.unsubscribe_all(recycled), Ok(0));
}

#[test]
pub fn unsubscribe_all() {
	let mut manager = EntityManager::new();
	let entity = manager.create_entity();
	let log = record_events(&mut manager, entity);

	assert_eq!(manager.unsubscribe_all(entity), Ok(2));
	manager.entity_add_component(entity, Hp(1)).unwrap();
	assert!(log.borrow().is_empty());
}
