/// Pointer interaction mode selected by the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pan/zoom only.
    View,
    /// Clicking spawns the selected entity type.
    Add,
    /// Clicking clears the cell.
    Sub,
    /// Interaction disabled until a tool is chosen.
    #[default]
    Blocked,
}

pub type CommandError = Box<dyn std::error::Error>;

/// Commands the drawer issues into the simulation.
///
/// Failures are caught at the interaction boundary, logged and surfaced as a
/// user-facing warning; they never abort the render loop.
pub trait CommandSink {
    fn spawn_entity_at(
        &mut self,
        type_name: &str,
        x: i32,
        y: i32,
        program: Option<&str>,
    ) -> Result<(), CommandError>;

    fn clear_cell(&mut self, x: i32, y: i32) -> Result<(), CommandError>;
}
