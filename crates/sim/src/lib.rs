//! Simulation-side collaborators for the playfield engine: the entity type
//! registry, the playfield state with its placement relation, and a small
//! demo scene the binary runs.

mod demo;
mod field;
mod registry;

pub use demo::{register_demo_textures, DemoSimulation, DEMO_CATALOG_JSON};
pub use field::{
    EntityId, FieldError, PlacedEntity, PlacementTable, Playfield, PlayfieldId, SharedField,
};
pub use registry::{EntitySelectorListener, EntityType, EntityTypeRegistry, RegistryError};
