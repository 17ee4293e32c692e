use clap::{Parser, Subcommand};
use orrery_assets::AssetStore;
use orrery_common::FrameClock;
use orrery_render::{DebugTextRenderer, Renderer};
use orrery_scene::{CameraRig, Scene, SceneFile};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery-cli", about = "CLI tool for orrery scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Parse a scene description and import every asset it references
    Validate {
        /// Scene description file
        scene: String,
    },
    /// Print the frame a renderer would draw at a given time
    Preview {
        /// Scene description file
        scene: String,

        /// Elapsed time in seconds
        #[arg(short, long, default_value = "0.0")]
        time: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("orrery-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", orrery_common::crate_info());
            println!("scene: {}", orrery_scene::crate_info());
            println!("input: {}", orrery_input::crate_info());
            println!("assets: {}", orrery_assets::crate_info());
            println!("render: {}", orrery_render::crate_info());
        }
        Commands::Validate { scene } => {
            let file = SceneFile::from_path(&scene)?;
            println!("{scene}: version {}", file.version);

            let mut store = AssetStore::new();
            let loaded = Scene::load(&scene, CameraRig::demo(1.0), &mut store)?;
            println!(
                "{} objects, {} assets imported",
                loaded.objects.len(),
                store.len()
            );
            for (index, object) in loaded.objects.iter().enumerate() {
                let pos = object.position();
                let mesh = store.get_mesh(object.mesh())?;
                println!(
                    "  object[{index}] pos=({:.2}, {:.2}, {:.2}) vertices={} textured={}",
                    pos.x,
                    pos.y,
                    pos.z,
                    mesh.vertices.len(),
                    object.has_texture()
                );
            }
            println!("OK");
        }
        Commands::Preview { scene, time } => {
            let mut store = AssetStore::new();
            let mut loaded = Scene::load(&scene, CameraRig::demo(1.0), &mut store)?;

            let mut clock = FrameClock::new();
            let ctx = clock.tick(time);
            loaded.update(&ctx);

            print!("{}", DebugTextRenderer::new().render(&loaded, &ctx));
        }
    }

    Ok(())
}
