use std::collections::HashMap;

use playfield::{ListenerSetError, ListenerSlot};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Blueprint for entities the user can place on the field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityType {
    pub texture_handle: String,
    #[serde(default)]
    pub z: i32,
    #[serde(default = "default_tilable")]
    pub tilable: bool,
    #[serde(default)]
    pub animated: bool,
}

fn default_tilable() -> bool {
    true
}

/// Notified about every registered type; a UI uses this to build its
/// entity selector.
pub trait EntitySelectorListener {
    fn entity_type_registered(&mut self, type_name: &str, texture_handle: &str);
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("entity type name must not be empty")]
    EmptyTypeName,
    #[error("entity type '{type_name}' has an empty texture handle")]
    EmptyTextureHandle { type_name: String },
    #[error("entity type '{type_name}' is already registered")]
    AlreadyRegistered { type_name: String },
    #[error("failed to parse entity type catalog '{source_name}' at {location}: {source}")]
    Catalog {
        source_name: String,
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(flatten)]
    entity_type: EntityType,
}

#[derive(Debug, Deserialize)]
struct Catalog {
    types: Vec<CatalogEntry>,
}

/// Registry of placeable entity types, keyed by name.
///
/// Iteration follows registration order so selector UIs stay stable.
#[derive(Default)]
pub struct EntityTypeRegistry {
    types: HashMap<String, EntityType>,
    order: Vec<String>,
    selector: ListenerSlot<Box<dyn EntitySelectorListener>>,
}

impl EntityTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        type_name: &str,
        entity_type: EntityType,
    ) -> Result<(), RegistryError> {
        if type_name.trim().is_empty() {
            return Err(RegistryError::EmptyTypeName);
        }
        if entity_type.texture_handle.trim().is_empty() {
            return Err(RegistryError::EmptyTextureHandle {
                type_name: type_name.to_string(),
            });
        }
        if self.types.contains_key(type_name) {
            return Err(RegistryError::AlreadyRegistered {
                type_name: type_name.to_string(),
            });
        }
        if let Some(listener) = self.selector.get_mut() {
            listener.entity_type_registered(type_name, &entity_type.texture_handle);
        }
        self.order.push(type_name.to_string());
        self.types.insert(type_name.to_string(), entity_type);
        Ok(())
    }

    pub fn get(&self, type_name: &str) -> Option<&EntityType> {
        self.types.get(type_name)
    }

    /// Type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Attaches (or with `None` clears) the selector listener.
    ///
    /// A newly attached listener is replayed with every type registered so
    /// far, in registration order.
    pub fn set_selector_listener(
        &mut self,
        listener: Option<Box<dyn EntitySelectorListener>>,
    ) -> Result<(), ListenerSetError> {
        let attaching = listener.is_some();
        self.selector.set(listener)?;
        if attaching {
            if let Some(listener) = self.selector.get_mut() {
                for name in &self.order {
                    if let Some(entity_type) = self.types.get(name) {
                        listener.entity_type_registered(name, &entity_type.texture_handle);
                    }
                }
            }
        }
        Ok(())
    }

    /// Loads a JSON catalog of entity types; `source_name` labels errors.
    pub fn load_catalog_json(
        &mut self,
        source_name: &str,
        json: &str,
    ) -> Result<usize, RegistryError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let catalog: Catalog =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
                RegistryError::Catalog {
                    source_name: source_name.to_string(),
                    location: error.path().to_string(),
                    source: error.into_inner(),
                }
            })?;
        let mut added = 0;
        for entry in catalog.types {
            self.register(&entry.name, entry.entity_type)?;
            added += 1;
        }
        info!(source = source_name, count = added, "entity_type_catalog_loaded");
        Ok(added)
    }
}
