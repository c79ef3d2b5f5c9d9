use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

use blockfill::prelude::*;
use blockfill::BuildError;

const BACKGROUND: u32 = colors::SKY;
const SCREENSHOT_PATH: &str = "screenshot.png";

#[derive(Parser)]
#[command(name = "blockfill")]
#[command(about = "Painter's-algorithm software renderer demo")]
struct Args {
    /// TOML render config; defaults are used when omitted
    config: Option<PathBuf>,
    /// Render one frame to this image file and exit without opening a window
    #[arg(long, value_name = "FILE")]
    screenshot: Option<PathBuf>,
}

const TILE: f32 = 100.0;
const TILES: i32 = 12;

/// Static props of the demo level.
///
/// Ground and walls are built from tile-sized blocks: a face with any vertex
/// behind the camera is dropped whole, so large faces would vanish as soon
/// as the camera walks onto them.
fn build_level(pool: &mut MeshPool) -> Result<(), BuildError> {
    let half = TILES as f32 * TILE / 2.0;
    let mut ground = Mesh::new(Vec3::new(0.0, -5.0, 0.0), 0.0);
    let mut walls = Mesh::new(Vec3::new(0.0, 40.0, 0.0), 0.0);
    for i in 0..TILES {
        let a = -half + TILE * (i as f32 + 0.5);
        for j in 0..TILES {
            let b = -half + TILE * (j as f32 + 0.5);
            let color = if (i + j) % 2 == 0 {
                colors::GRASS
            } else {
                colors::scale(colors::GRASS, 0.85)
            };
            let tile = Shape::Box {
                width: TILE,
                height: 10.0,
                depth: TILE,
            };
            build_mesh(&mut ground, tile, Vec3::new(a, 0.0, b), color)?;
        }

        // One block of each perimeter wall.
        let block = Shape::Box {
            width: TILE,
            height: 80.0,
            depth: 20.0,
        };
        let turned = Shape::Box {
            width: 20.0,
            height: 80.0,
            depth: TILE,
        };
        build_mesh(&mut walls, block, Vec3::new(a, 0.0, half), colors::BRICK)?;
        build_mesh(&mut walls, block, Vec3::new(a, 0.0, -half), colors::BRICK)?;
        build_mesh(&mut walls, turned, Vec3::new(half, 0.0, a), colors::BRICK)?;
        build_mesh(&mut walls, turned, Vec3::new(-half, 0.0, a), colors::BRICK)?;
    }
    pool.insert(ground);
    pool.insert(walls);

    for (i, x) in [-300.0, -150.0, 150.0, 300.0].into_iter().enumerate() {
        let mut pyramid = Mesh::new(Vec3::new(x, 30.0, 350.0), i as f32 * 0.4);
        add_pyramid(&mut pyramid, 60.0, 60.0, Vec3::ZERO, colors::SAND)?;
        pool.insert(pyramid);
    }

    for z in [-250.0, 0.0, 250.0] {
        let mut column = Mesh::new(Vec3::new(-380.0, 50.0, z), 0.0);
        add_prism(&mut column, 20.0, 100.0, 10, Vec3::ZERO, colors::STONE)?;
        add_box(&mut column, 50.0, 10.0, 50.0, Vec3::new(0.0, 55.0, 0.0), colors::STONE)?;
        pool.insert(column);
    }

    let mut ramp = Mesh::new(Vec3::new(250.0, 20.0, -150.0), std::f32::consts::FRAC_PI_2);
    add_ramp(&mut ramp, 80.0, 40.0, 120.0, Vec3::ZERO, colors::WOOD)?;
    add_box(&mut ramp, 80.0, 40.0, 80.0, Vec3::new(0.0, 0.0, 100.0), colors::WOOD)?;
    pool.insert(ramp);

    Ok(())
}

/// A blocky figure standing on its local origin.
fn build_character(mesh: &mut Mesh) -> Result<(), BuildError> {
    add_box(mesh, 8.0, 24.0, 8.0, Vec3::new(-6.0, 12.0, 0.0), colors::TEAL)?;
    add_box(mesh, 8.0, 24.0, 8.0, Vec3::new(6.0, 12.0, 0.0), colors::TEAL)?;
    add_box(mesh, 22.0, 26.0, 12.0, Vec3::new(0.0, 37.0, 0.0), colors::CRIMSON)?;
    add_box(mesh, 6.0, 22.0, 6.0, Vec3::new(-15.0, 38.0, 0.0), colors::SKIN)?;
    add_box(mesh, 6.0, 22.0, 6.0, Vec3::new(15.0, 38.0, 0.0), colors::SKIN)?;
    add_box(mesh, 14.0, 14.0, 14.0, Vec3::new(0.0, 58.0, 0.0), colors::SKIN)?;
    Ok(())
}

/// Pose of the hopping NPC at a given tick.
fn npc_pose(tick: u64) -> (Vec3, f32) {
    let t = tick as f32;
    let hop = (t * 0.12).sin().abs() * 25.0;
    let position = Vec3::new((t * 0.01).sin() * 120.0, hop, 120.0 + (t * 0.01).cos() * 60.0);
    (position, t * 0.02)
}

fn render_screenshot(
    context: &mut RenderContext,
    camera: &Camera,
    pool: &MeshPool,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let frame = context.render_frame(camera, pool.meshes(), BACKGROUND);
    frame.save_png(path)?;
    log::info!("saved {} ({} faces drawn)", path.display(), frame.stats.drawn);
    Ok(())
}

fn handle_key(
    key: Key,
    context: &mut RenderContext,
    config: &mut RenderConfig,
    camera: &Camera,
    pool: &MeshPool,
) -> Result<(), Box<dyn Error>> {
    match key {
        Key::Num1 => context.set_render_mode(RenderMode::Filled),
        Key::Num2 => context.set_render_mode(RenderMode::FilledOutline),
        Key::Num3 => context.set_render_mode(RenderMode::Outline),
        Key::R => {
            let next = match context.rasterizer() {
                RasterizerType::Scanline => RasterizerType::EdgeFunction,
                RasterizerType::EdgeFunction => RasterizerType::Scanline,
            };
            context.set_rasterizer(next);
            log::info!("rasterizer: {next}");
        }
        Key::C => {
            config.cull = match config.cull {
                CullMode::ScreenSpace => CullMode::ObjectNormal,
                CullMode::ObjectNormal => CullMode::ScreenSpace,
            };
            context.set_cull_mode(config.cull);
            log::info!("culling: {:?}", config.cull);
        }
        Key::F => {
            config.fog = match config.fog {
                FogMode::Off => FogMode::Linear,
                FogMode::Linear => FogMode::Quadratic,
                FogMode::Quadratic => FogMode::Off,
            };
            context.set_fog(config.fog);
            log::info!("fog: {:?}", config.fog);
        }
        Key::L => {
            config.shading = match config.shading {
                ShadingMode::Flat => ShadingMode::Directional,
                ShadingMode::Directional => ShadingMode::Flat,
            };
            context.set_shading(config.shading);
            log::info!("shading: {:?}", config.shading);
        }
        Key::P => render_screenshot(context, camera, pool, Path::new(SCREENSHOT_PATH))?,
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RenderConfig::load_from_file(path)?,
        None => RenderConfig::default(),
    };

    let mut pool = MeshPool::new();
    build_level(&mut pool)?;
    let (npc_position, npc_yaw) = npc_pose(0);
    let mut npc_mesh = Mesh::new(npc_position, npc_yaw);
    build_character(&mut npc_mesh)?;
    let npc = pool.insert(npc_mesh);
    log::info!("level ready: {} meshes", pool.len());

    let mut camera = Camera::new(Vec3::new(0.0, 60.0, -250.0))
        .with_lens(config.focal_length, config.near_clip);
    camera.look_at(Vec3::new(0.0, 30.0, 150.0));
    let mut context = RenderContext::new(&config);

    if let Some(path) = &args.screenshot {
        return render_screenshot(&mut context, &camera, &pool, path);
    }

    let mut window = Window::new("Blockfill", config.width, config.height)?;
    let mut frame_limiter = FrameLimiter::new(&window);
    let mut fps_counter = FpsCounter::new();
    let controller = CameraController::default();
    let mut tick: u64 = 0;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                context.resize(w, h);
            }
            WindowEvent::KeyPress(key) => {
                handle_key(key, &mut context, &mut config, &camera, &pool)?
            }
            WindowEvent::None => {}
        }

        // Fixed step: one tick of movement per frame regardless of elapsed time.
        controller.update(&mut camera, &window.input_state());
        let (position, yaw) = npc_pose(tick);
        pool.set_pose(npc, position, yaw);
        tick += 1;

        let frame = context.render_frame(&camera, pool.meshes(), BACKGROUND);
        window.present(frame.as_bytes())?;

        let delta = frame_limiter.wait_and_get_delta(&window);
        if fps_counter.tick(delta).is_some() {
            log::trace!("{:?}", frame.stats);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn config_and_screenshot_are_both_optional() {
        let args = Args::try_parse_from(["blockfill"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.screenshot.is_none());

        let args =
            Args::try_parse_from(["blockfill", "level.toml", "--screenshot", "out.png"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("level.toml")));
        assert_eq!(args.screenshot, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn screenshot_flag_requires_a_path() {
        assert!(Args::try_parse_from(["blockfill", "--screenshot"]).is_err());
    }

    #[test]
    fn second_positional_is_rejected() {
        assert!(Args::try_parse_from(["blockfill", "a.toml", "b.toml"]).is_err());
    }
}
