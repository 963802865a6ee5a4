//! Software-rendered 2D grid playfield.
//!
//! The engine draws a pannable, zoomable cell grid into a `pixels` frame
//! buffer, renders texture-backed drawables supplied by a simulation, and
//! translates pointer input into simulation commands. Repainting is
//! region-based: only the parts of the viewport that actually changed are
//! redrawn between drawable replacements.

mod app;
mod dirty;
mod drawable;
mod drawer;
mod grouping;
mod listener;
mod proxy;
mod rect;
mod surface;
mod text;
mod texture_keys;
mod textures;
mod transform;

pub use app::{run_app, AppConfig, AppError, Simulation};
pub use dirty::{PaintRegion, RedrawPlanner, REDRAW_MARGIN_PX};
pub use drawable::Drawable;
pub use drawer::{PlayfieldDrawer, INFO_BAR_HEIGHT};
pub use grouping::{group_runs, SlotLayout, TileGroup, GROUP_POSITION_TOLERANCE};
pub use listener::{ListenerSetError, ListenerSlot};
pub use proxy::{CommandError, CommandSink, Tool};
pub use rect::Rect;
pub use surface::Surface;
pub use texture_keys::TextureKeyError;
pub use textures::{Texture, TextureError, TextureImage, TextureRegistry};
pub use transform::{FieldTransform, CELL_SIZE, SCALE_MAX, SCALE_MIN};

// implementors of `Simulation::key_pressed` name key codes without a direct
// winit dependency
pub use winit::keyboard::KeyCode;
