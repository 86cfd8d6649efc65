use crate::components::{Component, ComponentType};

/// A statically known set of [Component] types.
///
/// Implemented for `()` and for tuples of up to twelve [components](Component),
/// so `(Position, Velocity)` can be used wherever a combination of component types is expected.
pub trait ComponentSet: 'static {
	/// The [component types](ComponentType) making up the set, in declaration order.
	fn component_types() -> Vec<ComponentType>;
}

impl ComponentSet for () {
	fn component_types() -> Vec<ComponentType> {
		Vec::new()
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl <$($t: Component),*> ComponentSet for ($($t,)*) {
            fn component_types() -> Vec<ComponentType> {
                vec![$(ComponentType::of::<$t>()),*]
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
