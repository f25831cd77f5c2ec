//! Ent classes: the runtime type identity carried by every ent.
//!
//! A class is a named node in a single-rooted hierarchy. Classes are
//! registered explicitly through [`EntClass::define`], which also makes them
//! discoverable through [`EntClass::subclasses`].
//!
//! # Example
//!
//! ```rust
//! use ent::{Ent, EntClass};
//!
//! let foo = EntClass::define("Foo", &EntClass::base(), &[]).unwrap();
//! let bar = EntClass::define("Bar", &foo, &["render"]).unwrap();
//!
//! assert!(bar.is_subclass_of(&foo));
//! assert!(bar.protects("render"));
//! assert!(bar.protects("merge"));
//! assert!(EntClass::base().subclasses().contains(&bar));
//!
//! let ent = Ent::with_class(bar.clone());
//! assert!(ent.is_instance_of(&foo));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::error::EntError;

/// Name of the root class.
pub const BASE_CLASS_NAME: &str = "Ent";

/// Attribute names reserved by the ent API itself.
///
/// A key with one of these names only accepts safe values.
pub const BASE_ATTRIBUTES: &[&str] = &[
    "copy",
    "diff",
    "encode",
    "load",
    "merge",
    "promote",
    "subclasses",
];

#[derive(Debug)]
struct ClassDef {
    name: String,
    parent: Option<EntClass>,
    attributes: Vec<String>,
}

/// Handle to a registered ent class.
///
/// Handles are cheap to clone. Class names are unique within the process,
/// so two handles are equal exactly when their names are equal.
#[derive(Clone)]
pub struct EntClass(Arc<ClassDef>);

lazy_static! {
    static ref BASE: EntClass = EntClass(Arc::new(ClassDef {
        name: BASE_CLASS_NAME.to_string(),
        parent: None,
        attributes: BASE_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
    }));
    static ref REGISTRY: RwLock<FxHashMap<String, EntClass>> = {
        let mut classes = FxHashMap::default();
        classes.insert(BASE_CLASS_NAME.to_string(), BASE.clone());
        RwLock::new(classes)
    };
}

impl EntClass {
    /// Returns the root `Ent` class.
    pub fn base() -> EntClass {
        BASE.clone()
    }

    /// Registers a subclass of `parent`.
    ///
    /// `attributes` names class-level attributes (methods, in spirit) that
    /// incoming data must not shadow with unsafe values. Redefining a class
    /// with the same parent and attributes returns the existing handle;
    /// anything else is a [`EntError::ClassConflict`].
    pub fn define(name: &str, parent: &EntClass, attributes: &[&str]) -> Result<EntClass, EntError> {
        let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = registry.get(name) {
            let same_parent = existing.parent() == Some(parent);
            let same_attributes = existing.0.attributes.iter().map(String::as_str).eq(attributes.iter().copied());
            if same_parent && same_attributes {
                return Ok(existing.clone());
            }
            return Err(EntError::ClassConflict {
                name: name.to_string(),
            });
        }

        let class = EntClass(Arc::new(ClassDef {
            name: name.to_string(),
            parent: Some(parent.clone()),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        }));
        registry.insert(name.to_string(), class.clone());
        tracing::debug!(class = name, parent = parent.name(), "registered ent class");
        Ok(class)
    }

    /// Looks up a registered class by name.
    pub fn lookup(name: &str) -> Option<EntClass> {
        REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&EntClass> {
        self.0.parent.as_ref()
    }

    pub fn is_base(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Iterates over this class and its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &EntClass> {
        std::iter::successors(Some(self), |c| c.parent())
    }

    /// Returns whether this class is `other` or derives from it.
    pub fn is_subclass_of(&self, other: &EntClass) -> bool {
        self.ancestors().any(|c| c == other)
    }

    /// Returns whether `key` names a class-level attribute of this class or
    /// any ancestor.
    pub fn protects(&self, key: &str) -> bool {
        self.ancestors()
            .any(|c| c.0.attributes.iter().any(|a| a == key))
    }

    /// Returns every registered class deriving from this one, recursively,
    /// excluding the class itself. Sorted by name.
    pub fn subclasses(&self) -> Vec<EntClass> {
        let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<EntClass> = registry
            .values()
            .filter(|c| *c != self && c.is_subclass_of(self))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        found
    }
}

impl PartialEq for EntClass {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for EntClass {}

impl Hash for EntClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl Default for EntClass {
    fn default() -> Self {
        EntClass::base()
    }
}

impl fmt::Debug for EntClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntClass({})", self.0.name)
    }
}

impl fmt::Display for EntClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
