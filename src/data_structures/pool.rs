use std::ops::{Deref, DerefMut};
use std::mem::ManuallyDrop;
use std::cell::RefCell;
use std::rc::Rc;

/// Restores a pooled value to a reusable state before it goes back into a [Pool].
pub trait Recycle {
	fn recycle(&mut self);
}

impl<T> Recycle for Vec<T> {
	fn recycle(&mut self) {
		self.clear();
	}
}

/// A free list of reusable values.
///
/// Values are either taken and given back explicitly through [`Pool::acquire`] / [`Pool::release`],
/// or borrowed for a scope through [`Pool::take_one`].
/// Released values are [recycled](Recycle) before they become visible again.
#[derive(Default)]
pub struct Pool<T: Default + Recycle> {
	values: Rc<RefCell<Vec<T>>>,
}

/// A value borrowed from a [Pool], returned to it on drop.
pub struct PoolBorrow<T: Recycle> {
	value: ManuallyDrop<T>,
	values: Rc<RefCell<Vec<T>>>,
}

impl<T: Default + Recycle> Pool<T> {
	pub fn new() -> Self {
		Self {
			values: Rc::default(),
		}
	}

	/// Takes a recycled value, or a new default one if the pool is empty.
	pub fn acquire(&self) -> T {
		self.values.borrow_mut().pop().unwrap_or_default()
	}

	/// Recycles `value` and stores it for later reuse.
	pub fn release(&self, mut value: T) {
		value.recycle();
		self.values.borrow_mut().push(value);
	}

	/// Borrows a value until the returned [PoolBorrow] is dropped.
	pub fn take_one(&self) -> PoolBorrow<T> {
		PoolBorrow {
			value: ManuallyDrop::new(self.acquire()),
			values: self.values.clone(),
		}
	}

	/// The number of values waiting to be reused.
	pub fn available(&self) -> usize {
		self.values.borrow().len()
	}
}

impl<T: Recycle> Deref for PoolBorrow<T> {
	type Target = T;
	fn deref(&self) -> &Self::Target {
		&self.value
	}
}

impl<T: Recycle> DerefMut for PoolBorrow<T> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.value
	}
}

impl<T: Recycle> Drop for PoolBorrow<T> {
	fn drop(&mut self) {
		// SAFETY: `value` is never accessed again after being taken here.
		let mut value = unsafe { ManuallyDrop::take(&mut self.value) };
		value.recycle();
		self.values.borrow_mut().push(value);
	}
}
