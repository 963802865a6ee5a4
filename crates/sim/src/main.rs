use playfield::{run_app, AppConfig, PlayfieldDrawer, TextureRegistry, Tool};
use sim::{
    register_demo_textures, DemoSimulation, EntityTypeRegistry, Playfield, PlayfieldId,
    SharedField, DEMO_CATALOG_JSON,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    info!("=== Playfield Demo Startup ===");

    let mut textures = TextureRegistry::new();
    if let Err(error) = register_demo_textures(&mut textures) {
        error!(error = %error, "texture_setup_failed");
        std::process::exit(1);
    }

    let mut registry = EntityTypeRegistry::new();
    if let Err(error) = registry.load_catalog_json("embedded", DEMO_CATALOG_JSON) {
        error!(error = %error, "catalog_load_failed");
        std::process::exit(1);
    }

    let field = SharedField::new(Playfield::new(PlayfieldId(0), registry));
    let mut simulation = DemoSimulation::new(field.clone());
    if let Err(error) = simulation.populate() {
        error!(error = %error, "scene_setup_failed");
        std::process::exit(1);
    }

    let config = AppConfig {
        window_title: "Playfield Demo".to_string(),
        ..AppConfig::default()
    };
    let mut drawer = PlayfieldDrawer::new(
        textures,
        Box::new(field),
        config.window_width,
        config.window_height,
    );
    // keys 1-4 switch tools, R resets the view; start ready to place walls
    drawer.set_selected_tool(Tool::Add);
    drawer.set_selected_entity_type("wall", "demo/wall");

    if let Err(error) = run_app(config, drawer, Box::new(simulation)) {
        error!(error = %error, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
