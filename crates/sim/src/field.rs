use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use playfield::{CommandError, CommandSink, Drawable};
use thiserror::Error;
use tracing::info;

use crate::registry::EntityTypeRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayfieldId(pub u32);

/// An entity instance sitting on the field.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEntity {
    pub id: EntityId,
    pub type_name: String,
    pub x: f64,
    pub y: f64,
    pub z: i32,
    pub texture_handle: String,
    pub tilable: bool,
    pub animated: bool,
    /// Name of an attached entity program; stored only, nothing runs it.
    pub program: Option<String>,
}

/// Entity-to-playfield membership relation.
///
/// Membership is a queryable fact, not a back-pointer held by the entity:
/// an id missing from the table simply is not placed anywhere.
#[derive(Debug, Default)]
pub struct PlacementTable {
    placements: HashMap<EntityId, PlayfieldId>,
}

impl PlacementTable {
    pub fn place(&mut self, entity: EntityId, field: PlayfieldId) {
        self.placements.insert(entity, field);
    }

    pub fn remove(&mut self, entity: EntityId) {
        self.placements.remove(&entity);
    }

    pub fn playfield_of(&self, entity: EntityId) -> Option<PlayfieldId> {
        self.placements.get(&entity).copied()
    }

    pub fn is_placed(&self, entity: EntityId) -> bool {
        self.placements.contains_key(&entity)
    }
}

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("unknown entity type '{type_name}'")]
    UnknownEntityType { type_name: String },
}

/// The simulated field: placed entities plus the type registry behind them.
pub struct Playfield {
    id: PlayfieldId,
    registry: EntityTypeRegistry,
    entities: Vec<PlacedEntity>,
    placements: PlacementTable,
    next_entity_id: u64,
    revision: u64,
}

impl Playfield {
    pub fn new(id: PlayfieldId, registry: EntityTypeRegistry) -> Self {
        Self {
            id,
            registry,
            entities: Vec::new(),
            placements: PlacementTable::default(),
            next_entity_id: 0,
            revision: 0,
        }
    }

    pub fn id(&self) -> PlayfieldId {
        self.id
    }

    pub fn registry(&self) -> &EntityTypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityTypeRegistry {
        &mut self.registry
    }

    /// Bumped on every entity change, so consumers know when to rebuild
    /// their drawable snapshot.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn spawn(
        &mut self,
        type_name: &str,
        x: f64,
        y: f64,
        program: Option<&str>,
    ) -> Result<EntityId, FieldError> {
        let entity_type =
            self.registry
                .get(type_name)
                .ok_or_else(|| FieldError::UnknownEntityType {
                    type_name: type_name.to_string(),
                })?;
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(PlacedEntity {
            id,
            type_name: type_name.to_string(),
            x,
            y,
            z: entity_type.z,
            texture_handle: entity_type.texture_handle.clone(),
            tilable: entity_type.tilable,
            animated: entity_type.animated,
            program: program.map(str::to_string),
        });
        self.placements.place(id, self.id);
        self.revision += 1;
        info!(type_name, x, y, entity_id = id.0, "entity_spawned");
        Ok(id)
    }

    /// Removes every entity whose cell is (x, y); returns how many went.
    pub fn clear_cell(&mut self, x: i32, y: i32) -> usize {
        let placements = &mut self.placements;
        let before = self.entities.len();
        self.entities.retain(|entity| {
            let keep = entity.x.floor() as i32 != x || entity.y.floor() as i32 != y;
            if !keep {
                placements.remove(entity.id);
            }
            keep
        });
        let removed = before - self.entities.len();
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut PlacedEntity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Marks the field changed after direct entity mutation.
    pub fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn is_placed(&self, entity: EntityId) -> bool {
        self.placements.is_placed(entity)
    }

    pub fn playfield_of(&self, entity: EntityId) -> Option<PlayfieldId> {
        self.placements.playfield_of(entity)
    }

    /// Full replacement snapshot for the drawer.
    pub fn drawables(&self) -> Vec<Drawable> {
        self.entities
            .iter()
            .map(|entity| {
                Drawable::new(entity.x, entity.y, entity.z, entity.texture_handle.clone())
                    .with_tilable(entity.tilable)
                    .with_animated(entity.animated)
            })
            .collect()
    }
}

/// Shared handle over one playfield; the drawer holds a clone as its
/// command sink.
#[derive(Clone)]
pub struct SharedField(Rc<RefCell<Playfield>>);

impl SharedField {
    pub fn new(field: Playfield) -> Self {
        Self(Rc::new(RefCell::new(field)))
    }

    pub fn borrow(&self) -> Ref<'_, Playfield> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Playfield> {
        self.0.borrow_mut()
    }
}

impl CommandSink for SharedField {
    fn spawn_entity_at(
        &mut self,
        type_name: &str,
        x: i32,
        y: i32,
        program: Option<&str>,
    ) -> Result<(), CommandError> {
        self.0
            .borrow_mut()
            .spawn(type_name, x as f64, y as f64, program)
            .map(|_| ())
            .map_err(Into::into)
    }

    fn clear_cell(&mut self, x: i32, y: i32) -> Result<(), CommandError> {
        let removed = self.0.borrow_mut().clear_cell(x, y);
        info!(x, y, removed, "cell_cleared");
        Ok(())
    }
}
