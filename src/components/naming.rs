//! Name derivation for [component types](ComponentType).
//!
//! Two names are derived from [`Component::name`](crate::components::Component::name):
//! the *attachment name* under which an instance is stored on its entity,
//! and the case-insensitive *key token* used to build [group keys](group_key).

use crate::components::ComponentType;
use std::collections::hash_map::Entry;
use crate::error::EcsResult;
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::any::TypeId;

/// Separator between the tokens of a group key.
pub const GROUP_KEY_SEPARATOR: char = ',';

lazy_static! {
	static ref TOKEN_TO_TYPES: Mutex<HashMap<String, Vec<TypeId>>> = Mutex::new(HashMap::default());
}

/// Strips the module path and generic arguments from a Rust type name.
///
/// `my_game::physics::Velocity<f32>` becomes `Velocity`.
pub fn short_type_name(type_name: &'static str) -> &'static str {
	let base = match type_name.find('<') {
		Some(end) => &type_name[..end],
		None => type_name,
	};

	match base.rfind("::") {
		Some(start) => &base[start + 2..],
		None => base,
	}
}

/// The name an attached instance of `ty` is stored under.
/// With `camel_case` set, the first character is lowercased (`Position` → `position`).
///
/// Registers the name like [key_token] does, so a collision is reported
/// even if the colliding types are never queried together.
pub fn attachment_name(ty: &ComponentType, camel_case: bool) -> EcsResult<String> {
	let name = ty.name()?;
	register_token(ty, &name.to_lowercase());
	if !camel_case {
		return Ok(name.to_owned());
	}

	let mut chars = name.chars();
	let mut result = String::with_capacity(name.len());
	if let Some(first) = chars.next() {
		result.extend(first.to_lowercase());
	}
	result.push_str(chars.as_str());
	Ok(result)
}

/// The case-insensitive token representing `ty` inside a group key.
pub fn key_token(ty: &ComponentType) -> EcsResult<String> {
	let token = ty.name()?.to_lowercase();
	register_token(ty, &token);
	Ok(token)
}

/// Builds the canonical key of a combination of component types.
///
/// Tokens are sorted and deduplicated, so the key only depends on the *set* of names:
/// `[Position, Velocity]` and `[Velocity, Position, Position]` share the key `position,velocity`.
pub fn group_key(types: &[ComponentType]) -> EcsResult<String> {
	let mut tokens = types.iter().map(key_token).collect::<EcsResult<Vec<_>>>()?;
	tokens.sort_unstable();
	tokens.dedup();

	let mut key = String::new();
	for (i, token) in tokens.iter().enumerate() {
		if i > 0 {
			key.push(GROUP_KEY_SEPARATOR);
		}
		key.push_str(token);
	}

	Ok(key)
}

// Distinct types sharing a token end up in the same group key; this is only reported, once per type.
fn register_token(ty: &ComponentType, token: &str) {
	let mut registry = TOKEN_TO_TYPES.lock();
	match registry.entry(token.to_owned()) {
		Entry::Vacant(entry) => {
			entry.insert(vec![ty.id()]);
		},
		Entry::Occupied(mut entry) => {
			let types = entry.get_mut();
			if !types.contains(&ty.id()) {
				types.push(ty.id());
				tracing::warn!(
					token,
					component = ty.type_name(),
					"component name collides with another component type"
				);
			}
		},
	}
}

/// Returns `true` if more than one component type has derived `token` so far.
pub fn is_colliding_token(token: &str) -> bool {
	TOKEN_TO_TYPES.lock().get(token).map_or(false, |types| types.len() > 1)
}
