use playfield::{
    KeyCode, PlayfieldDrawer, Simulation, TextureError, TextureImage, TextureRegistry, Tool,
};
use tracing::info;

use crate::field::{EntityId, FieldError, SharedField};

/// Entity types of the demo scene.
pub const DEMO_CATALOG_JSON: &str = r#"{
    "types": [
        { "name": "wall", "texture_handle": "demo/wall" },
        { "name": "tree", "texture_handle": "demo/tree", "z": 5, "tilable": false },
        { "name": "coin", "texture_handle": "demo/coin", "z": 10, "animated": true }
    ]
}"#;

const WALL_DARK: [u8; 4] = [96, 96, 104, 255];
const WALL_LIGHT: [u8; 4] = [136, 136, 148, 255];
const TREE_GREEN: [u8; 4] = [34, 120, 54, 255];
const COIN_GOLD: [u8; 4] = [222, 178, 34, 255];
const TEXTURE_SIZE: u32 = 16;
const PATROL_INTERVAL_TICKS: u64 = 30;
const PATROL_MAX_X: f64 = 7.0;

fn checkered(size: u32, a: [u8; 4], b: [u8; 4]) -> Result<TextureImage, TextureError> {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let color = if (x / 4 + y / 4) % 2 == 0 { a } else { b };
            rgba.extend_from_slice(&color);
        }
    }
    TextureImage::from_rgba(size, size, rgba)
}

fn disc(size: u32, color: [u8; 4], radius_fraction: f64) -> Result<TextureImage, TextureError> {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    let center = (size as f64 - 1.0) / 2.0;
    let radius = center * radius_fraction;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            if dx * dx + dy * dy <= radius * radius {
                rgba.extend_from_slice(&color);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    TextureImage::from_rgba(size, size, rgba)
}

/// Registers the procedural textures the demo catalog refers to.
pub fn register_demo_textures(textures: &mut TextureRegistry) -> Result<(), TextureError> {
    textures.register_static("demo/wall", checkered(TEXTURE_SIZE, WALL_DARK, WALL_LIGHT)?)?;
    textures.register_static("demo/tree", disc(TEXTURE_SIZE, TREE_GREEN, 0.9)?)?;
    textures.register_animated(
        "demo/coin",
        vec![
            disc(TEXTURE_SIZE, COIN_GOLD, 0.8)?,
            disc(TEXTURE_SIZE, COIN_GOLD, 0.6)?,
            disc(TEXTURE_SIZE, COIN_GOLD, 0.4)?,
            disc(TEXTURE_SIZE, COIN_GOLD, 0.6)?,
        ],
        8,
        true,
    )?;
    Ok(())
}

/// Small scene driving the drawer: a wall row, stacked coins showing the
/// tiling layout, and one tree patrolling along the wall.
pub struct DemoSimulation {
    field: SharedField,
    patrol: Option<EntityId>,
    patrol_direction: f64,
    last_pushed_revision: Option<u64>,
}

impl DemoSimulation {
    pub fn new(field: SharedField) -> Self {
        Self {
            field,
            patrol: None,
            patrol_direction: 1.0,
            last_pushed_revision: None,
        }
    }

    pub fn populate(&mut self) -> Result<(), FieldError> {
        let mut field = self.field.borrow_mut();
        for x in 0..8 {
            field.spawn("wall", x as f64, 0.0, None)?;
        }
        field.spawn("tree", 2.0, 3.0, None)?;
        field.spawn("tree", 5.0, 2.0, None)?;
        for _ in 0..3 {
            field.spawn("coin", 4.0, 4.0, None)?;
        }
        let patrol = field.spawn("tree", 0.0, 1.0, Some("patrol"))?;
        self.patrol = Some(patrol);
        info!(entity_count = field.entity_count(), "demo_scene_populated");
        Ok(())
    }

    fn advance_patrol(&mut self, tick: u64) {
        if tick == 0 || tick % PATROL_INTERVAL_TICKS != 0 {
            return;
        }
        let Some(patrol) = self.patrol else {
            return;
        };
        let mut field = self.field.borrow_mut();
        if let Some(entity) = field.find_entity_mut(patrol) {
            entity.x += self.patrol_direction;
            if entity.x >= PATROL_MAX_X {
                self.patrol_direction = -1.0;
            } else if entity.x <= 0.0 {
                self.patrol_direction = 1.0;
            }
            field.touch();
        } else {
            // cleared away by the user
            self.patrol = None;
        }
    }
}

impl Simulation for DemoSimulation {
    fn tick(&mut self, tick: u64, drawer: &mut PlayfieldDrawer) {
        self.advance_patrol(tick);
        let revision = self.field.borrow().revision();
        if self.last_pushed_revision != Some(revision) {
            drawer.set_drawables(self.field.borrow().drawables());
            self.last_pushed_revision = Some(revision);
        }
    }

    fn key_pressed(&mut self, key: KeyCode, drawer: &mut PlayfieldDrawer) {
        match key {
            KeyCode::Digit1 => drawer.set_selected_tool(Tool::View),
            KeyCode::Digit2 => drawer.set_selected_tool(Tool::Add),
            KeyCode::Digit3 => drawer.set_selected_tool(Tool::Sub),
            KeyCode::Digit4 => drawer.set_selected_tool(Tool::Blocked),
            KeyCode::KeyR => {
                drawer.reset_zoom_and_pan();
                // force a fresh full paint of the restored view
                self.last_pushed_revision = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use playfield::{CommandError, CommandSink};

    use super::*;
    use crate::field::{Playfield, PlayfieldId};
    use crate::registry::EntityTypeRegistry;

    struct NullSink;

    impl CommandSink for NullSink {
        fn spawn_entity_at(
            &mut self,
            _type_name: &str,
            _x: i32,
            _y: i32,
            _program: Option<&str>,
        ) -> Result<(), CommandError> {
            Ok(())
        }

        fn clear_cell(&mut self, _x: i32, _y: i32) -> Result<(), CommandError> {
            Ok(())
        }
    }

    fn demo_setup() -> (DemoSimulation, SharedField, PlayfieldDrawer) {
        let mut registry = EntityTypeRegistry::new();
        registry
            .load_catalog_json("test", DEMO_CATALOG_JSON)
            .unwrap();
        let mut textures = TextureRegistry::new();
        register_demo_textures(&mut textures).unwrap();
        let field = SharedField::new(Playfield::new(PlayfieldId(0), registry));
        let mut simulation = DemoSimulation::new(field.clone());
        simulation.populate().unwrap();
        let drawer = PlayfieldDrawer::new(textures, Box::new(NullSink), 320, 240);
        (simulation, field, drawer)
    }

    #[test]
    fn catalog_and_textures_line_up() {
        let mut registry = EntityTypeRegistry::new();
        registry
            .load_catalog_json("test", DEMO_CATALOG_JSON)
            .unwrap();
        let mut textures = TextureRegistry::new();
        register_demo_textures(&mut textures).unwrap();
        for name in registry.type_names().collect::<Vec<_>>() {
            let entity_type = registry.get(name).unwrap();
            assert!(
                textures.resolve(&entity_type.texture_handle).is_ok(),
                "missing texture for {name}"
            );
        }
    }

    #[test]
    fn first_tick_pushes_the_populated_scene() {
        let (mut simulation, field, mut drawer) = demo_setup();
        drawer.take_pending();
        simulation.tick(1, &mut drawer);
        assert!(drawer.has_pending());
        assert_eq!(field.borrow().entity_count(), 14);
    }

    #[test]
    fn unchanged_scene_is_not_pushed_twice() {
        let (mut simulation, _field, mut drawer) = demo_setup();
        simulation.tick(1, &mut drawer);
        drawer.take_pending();
        simulation.tick(2, &mut drawer);
        assert!(!drawer.has_pending());
    }

    #[test]
    fn patrol_moves_on_its_interval_and_bounces() {
        let (mut simulation, field, mut drawer) = demo_setup();
        let patrol = simulation.patrol.unwrap();
        simulation.tick(PATROL_INTERVAL_TICKS, &mut drawer);
        {
            let field = field.borrow();
            let entity = field.entities().iter().find(|e| e.id == patrol).unwrap();
            assert_eq!(entity.x, 1.0);
        }
        for step in 2..=20 {
            simulation.tick(step * PATROL_INTERVAL_TICKS, &mut drawer);
        }
        let field = field.borrow();
        let entity = field.entities().iter().find(|e| e.id == patrol).unwrap();
        assert!((0.0..=PATROL_MAX_X).contains(&entity.x));
    }

    #[test]
    fn number_keys_switch_tools() {
        let (mut simulation, _field, mut drawer) = demo_setup();
        simulation.key_pressed(KeyCode::Digit3, &mut drawer);
        assert_eq!(drawer.selected_tool(), Tool::Sub);
        simulation.key_pressed(KeyCode::Digit1, &mut drawer);
        assert_eq!(drawer.selected_tool(), Tool::View);
    }
}
