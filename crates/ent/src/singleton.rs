//! One shared instance per type, created lazily.
//!
//! ```rust
//! use std::sync::Arc;
//! use ent::singleton::{self, Singleton};
//!
//! #[derive(Default)]
//! struct Settings {
//!     verbose: bool,
//! }
//!
//! impl Singleton for Settings {}
//!
//! let a = Settings::instance();
//! let b = singleton::instance(|| Settings { verbose: true });
//! assert!(Arc::ptr_eq(&a, &b));
//! assert!(!b.verbose);
//! ```

use std::any::{Any, TypeId};
use std::sync::{Arc, Mutex, PoisonError};

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

lazy_static! {
    static ref INSTANCES: Mutex<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>> =
        Mutex::new(FxHashMap::default());
}

/// Returns the shared instance of `T`, creating it with `init` on first use.
///
/// `init` runs without the registry lock held. If two threads race to create
/// the first instance, one result is kept and returned to both.
pub fn instance<T: Any + Send + Sync>(init: impl FnOnce() -> T) -> Arc<T> {
    if let Some(existing) = get::<T>() {
        return existing;
    }

    let created = Arc::new(init());
    let mut instances = INSTANCES.lock().unwrap_or_else(PoisonError::into_inner);
    let slot = instances
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Box::new(Arc::clone(&created)));
    match slot.downcast_ref::<Arc<T>>() {
        Some(shared) => Arc::clone(shared),
        None => created,
    }
}

/// Returns the shared instance of `T` if one has been created.
pub fn get<T: Any + Send + Sync>() -> Option<Arc<T>> {
    INSTANCES
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&TypeId::of::<T>())
        .and_then(|slot| slot.downcast_ref::<Arc<T>>())
        .cloned()
}

/// Forgets the shared instance of `T`, returning it.
///
/// Holders of the old `Arc` keep it; the next [`instance`] call creates a
/// new one.
pub fn reset<T: Any + Send + Sync>() -> Option<Arc<T>> {
    INSTANCES
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&TypeId::of::<T>())
        .and_then(|slot| slot.downcast::<Arc<T>>().ok())
        .map(|boxed| *boxed)
}

/// Types with a process-wide default instance.
pub trait Singleton: Any + Send + Sync + Default {
    fn instance() -> Arc<Self> {
        instance(Self::default)
    }
}
