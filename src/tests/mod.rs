use crate::components::Component;

mod entity_tests;

#[derive(Component, Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Copy, Clone, Debug, Default, PartialEq)]
pub struct Velocity {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Copy, Clone, Debug, Default, PartialEq)]
#[component(name = "Health")]
pub struct Hp(pub u32);

/// Relies on the default name derivation instead of the derive macro.
#[derive(Debug, Default, PartialEq)]
pub struct Lifetime<T>(pub T);

impl<T: 'static> Component for Lifetime<T> {}

/// A hand-written implementation that derives no usable name.
#[derive(Debug, Default)]
pub struct Anonymous;

impl Component for Anonymous {
	fn name() -> &'static str {
		""
	}
}
