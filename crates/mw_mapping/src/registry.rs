//! Runtime lookup of member mappings.
//!
//! A [`MappingRegistry`] stores one [`MappingMeta`] per registered type and
//! indexes it by [`TypeId`], by the mapping's type name and by the Rust type
//! path. Through the meta, values can be serialized behind `&dyn Any` and
//! deserialized from a type name.
//!
//! ## auto_register
//!
//! Types deriving `Mapped` with `#[mapping(auto_register)]` can be registered
//! all at once with [`MappingRegistry::auto_register`]. This uses the
//! [`inventory`](https://docs.rs/inventory) crate and needs the
//! `auto_register` feature. Without the feature, or on a platform `inventory`
//! does not support, the method returns `false` and registers nothing.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use core::any::{Any, TypeId};
use core::fmt;

use foldhash::fast::FixedState;
use hashbrown::{HashMap, HashSet};

use crate::error::{DeserializeError, RegistryError};
use crate::{Mapped, text};

type FastMap<K, V> = HashMap<K, V, FixedState>;
type FastSet<K> = HashSet<K, FixedState>;

/// Type-erased serialization of one registered type.
pub type SerializeFn = fn(&dyn Any) -> Option<String>;

/// Type-erased deserialization of one registered type.
pub type DeserializeFn = fn(&str) -> Result<Box<dyn Any>, DeserializeError>;

// -----------------------------------------------------------------------------
// MappingMeta

/// What the registry knows about one mapped type.
#[derive(Clone)]
pub struct MappingMeta {
    type_id: TypeId,
    type_name: &'static str,
    type_path: &'static str,
    field_names: Box<[&'static str]>,
    serialize: SerializeFn,
    deserialize: Option<DeserializeFn>,
}

fn serialize_erased<T: Mapped>(value: &dyn Any) -> Option<String> {
    value.downcast_ref::<T>().map(text::serialize)
}

fn deserialize_erased<T: Mapped + Default>(input: &str) -> Result<Box<dyn Any>, DeserializeError> {
    text::deserialize::<T>(input).map(|value| Box::new(value) as Box<dyn Any>)
}

impl MappingMeta {
    /// Creates the meta of `T`, without deserialization support.
    pub fn of<T: Mapped>() -> Self {
        let mapping = T::member_mapping();
        Self {
            type_id: TypeId::of::<T>(),
            type_name: mapping.type_name(),
            type_path: core::any::type_name::<T>(),
            field_names: mapping.field_names().collect(),
            serialize: serialize_erased::<T>,
            deserialize: None,
        }
    }

    /// Creates the meta of `T`, deserializing from `T::default()`.
    pub fn of_default<T: Mapped + Default>() -> Self {
        Self {
            deserialize: Some(deserialize_erased::<T>),
            ..Self::of::<T>()
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The mapping's type name, see [`MemberMapping::type_name`](crate::MemberMapping::type_name).
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The full Rust path of the type, as given by [`core::any::type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The display names of the mapped fields, in mapping order.
    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    /// Returns `true` if the type can be deserialized through the registry.
    #[inline]
    pub fn can_deserialize(&self) -> bool {
        self.deserialize.is_some()
    }

    /// Serializes `value`, or returns `None` if it is not of this type.
    #[inline]
    pub fn serialize(&self, value: &dyn Any) -> Option<String> {
        (self.serialize)(value)
    }

    /// Deserializes a boxed value of this type.
    pub fn deserialize(&self, input: &str) -> Result<Box<dyn Any>, RegistryError> {
        let Some(deserialize) = self.deserialize else {
            return Err(RegistryError::DeserializeUnsupported {
                type_name: self.type_name,
            });
        };
        Ok(deserialize(input)?)
    }
}

impl fmt::Debug for MappingMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingMeta")
            .field("type_name", &self.type_name)
            .field("type_path", &self.type_path)
            .field("field_names", &self.field_names)
            .field("can_deserialize", &self.can_deserialize())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MappingRegistry

/// A registry of [mapped](Mapped) types.
///
/// # Examples
///
/// ```
/// use mw_mapping::derive::Mapped;
/// use mw_mapping::registry::MappingRegistry;
///
/// #[derive(Mapped, Default)]
/// #[mapping(default)]
/// struct Foo {
///     one: i32,
///     two: String,
/// }
///
/// let mut registry = MappingRegistry::new();
/// registry.register_default::<Foo>();
///
/// let value = registry.deserialize_boxed("Foo", "{\n\tone : 1,\n\ttwo : abc\n}").unwrap();
/// let text = registry.serialize_any(value.as_ref()).unwrap();
/// assert_eq!(text, "{\n\tone : 1,\n\ttwo : abc\n}");
/// ```
pub struct MappingRegistry {
    meta_table: FastMap<TypeId, MappingMeta>,
    type_path_to_id: FastMap<&'static str, TypeId>,
    type_name_to_id: FastMap<&'static str, TypeId>,
    ambiguous_names: FastSet<&'static str>,
}

impl Default for MappingRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MappingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            meta_table: FastMap::default(),
            type_path_to_id: FastMap::default(),
            type_name_to_id: FastMap::default(),
            ambiguous_names: FastSet::default(),
        }
    }

    // The type must not be registered yet.
    fn add_new_type_indices(&mut self, meta: &MappingMeta) {
        let type_name = meta.type_name;

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                log::warn!(
                    "type name `{type_name}` is now ambiguous; use the type path `{}` instead",
                    meta.type_path,
                );
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, meta.type_id);
            }
        }

        self.type_path_to_id.insert(meta.type_path, meta.type_id);
    }

    /// Inserts `meta` if its type is not registered yet.
    ///
    /// Returns `true` if it was inserted.
    pub fn try_insert_meta(&mut self, meta: MappingMeta) -> bool {
        if self.meta_table.contains_key(&meta.type_id) {
            return false;
        }

        log::debug!(
            "registered mapped type `{}` ({} fields)",
            meta.type_path,
            meta.field_names.len(),
        );
        self.add_new_type_indices(&meta);
        self.meta_table.insert(meta.type_id, meta);
        true
    }

    /// Registers `T` without deserialization support.
    ///
    /// Returns `false` and does nothing if `T` is already registered.
    #[inline]
    pub fn register<T: Mapped>(&mut self) -> bool {
        self.try_insert_meta(MappingMeta::of::<T>())
    }

    /// Registers `T` with deserialization support.
    ///
    /// If `T` is already registered, its meta gains deserialization support
    /// and `false` is returned.
    pub fn register_default<T: Mapped + Default>(&mut self) -> bool {
        match self.meta_table.get_mut(&TypeId::of::<T>()) {
            Some(meta) => {
                meta.deserialize = Some(deserialize_erased::<T>);
                false
            }
            None => self.try_insert_meta(MappingMeta::of_default::<T>()),
        }
    }

    /// Registers every type declared with `#[mapping(auto_register)]`.
    ///
    /// Returns `true` if automatic registration is available on this platform
    /// and was performed. Calling it again is harmless: registered types are
    /// skipped.
    ///
    /// Requires the `auto_register` feature; without it this returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mw_mapping::derive::Mapped;
    /// use mw_mapping::registry::MappingRegistry;
    ///
    /// #[derive(Mapped)]
    /// #[mapping(auto_register)]
    /// struct Foo {
    ///     one: i32,
    /// }
    ///
    /// let mut registry = MappingRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.get_with_type_name("Foo").is_some());
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(self)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Returns `true` if `type_id` is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.meta_table.contains_key(&type_id)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta_table.is_empty()
    }

    /// Returns the meta of `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&MappingMeta> {
        self.meta_table.get(&type_id)
    }

    /// Returns the meta of the type with the full path `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&MappingMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the meta of the type whose mapping is named `type_name`.
    ///
    /// Returns `None` if the name is not registered or is
    /// [ambiguous](Self::is_ambiguous).
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&MappingMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if several registered types share the mapping name `type_name`.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns an iterator over the registered metas, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MappingMeta> {
        self.meta_table.values()
    }

    /// Resolves a type name first, then a type path.
    fn resolve(&self, name: &str) -> Result<&MappingMeta, RegistryError> {
        if let Some(meta) = self.get_with_type_name(name) {
            return Ok(meta);
        }
        if let Some(meta) = self.get_with_type_path(name) {
            return Ok(meta);
        }
        if self.is_ambiguous(name) {
            return Err(RegistryError::AmbiguousName {
                name: name.to_string(),
            });
        }
        Err(RegistryError::NotRegistered {
            name: name.to_string(),
        })
    }

    /// Serializes a value of any registered type.
    pub fn serialize_any(&self, value: &dyn Any) -> Result<String, RegistryError> {
        let type_id = value.type_id();
        let Some(meta) = self.get(type_id) else {
            return Err(RegistryError::NotRegistered {
                name: format!("{type_id:?}"),
            });
        };
        meta.serialize(value).ok_or(RegistryError::TypeMismatch {
            expected: meta.type_path,
            found: "<unknown>",
        })
    }

    /// Deserializes a boxed value of the type named `name`.
    ///
    /// `name` is a mapping type name or a full type path.
    pub fn deserialize_boxed(&self, name: &str, input: &str) -> Result<Box<dyn Any>, RegistryError> {
        self.resolve(name)?.deserialize(input)
    }

    /// Deserializes a value of the type named `name` and checks that it is a `T`.
    pub fn deserialize_as<T: Any>(&self, name: &str, input: &str) -> Result<T, RegistryError> {
        let meta = self.resolve(name)?;
        if meta.type_id != TypeId::of::<T>() {
            return Err(RegistryError::TypeMismatch {
                expected: core::any::type_name::<T>(),
                found: meta.type_path,
            });
        }
        match meta.deserialize(input)?.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(RegistryError::TypeMismatch {
                expected: core::any::type_name::<T>(),
                found: meta.type_path,
            }),
        }
    }
}

impl fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.meta_table.values()).finish()
    }
}
