//! Frame rendering entry point.
//!
//! A [`RenderContext`] owns everything that lives across frames: the color
//! buffer, the rasterizer choice, render settings and the reusable item list.
//! The outer loop creates one at startup, calls
//! [`render_frame`](RenderContext::render_frame) once per tick with the
//! current camera and meshes, presents the returned [`Frame`] and drops the
//! context at shutdown.
//!
//! Per frame:
//!
//! 1. clear to the background color
//! 2. transform, near-reject, cull and project every face ([`Pipeline`])
//! 3. sort the surviving items far to near
//! 4. fill and/or outline each item in that order

use std::path::Path;

use serde::Deserialize;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::culling::CullMode;
use crate::light::DirectionalLight;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{fill_polygon, RasterizerDispatcher, RasterizerType, RenderItem, Renderer};
use crate::shading::{Fog, FogMode, Shader, ShadingMode};
use crate::sorting::sort_far_to_near;
use crate::transform::Pipeline;

/// What gets drawn for each visible face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Fill only.
    Filled,
    /// Fill, then outline in the outline color.
    #[default]
    FilledOutline,
    /// Outline only, drawn in the face color.
    Outline,
}

/// Counters for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    pub faces: usize,
    pub near_rejected: usize,
    pub back_culled: usize,
    pub index_faults: usize,
    pub drawn: usize,
}

/// A finished frame, borrowed from its [`RenderContext`].
#[derive(Debug)]
pub struct Frame<'a> {
    pixels: &'a [u32],
    bytes: &'a [u8],
    width: u32,
    height: u32,
    pub stats: FrameStats,
}

impl Frame<'_> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed ARGB8888 pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        self.pixels
    }

    /// The pixels as raw bytes, ready for an ARGB8888 streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Writes the frame to an image file; the format follows the extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        let mut image = image::RgbaImage::new(self.width, self.height);
        for (pixel, &argb) in image.pixels_mut().zip(self.pixels) {
            let [a, r, g, b] = argb.to_be_bytes();
            *pixel = image::Rgba([r, g, b, a]);
        }
        image.save(path)
    }
}

pub struct RenderContext {
    renderer: Renderer,
    rasterizer: RasterizerDispatcher,
    items: Vec<RenderItem>,
    render_mode: RenderMode,
    cull: CullMode,
    shader: Shader,
    outline_color: u32,
}

impl RenderContext {
    pub fn new(config: &RenderConfig) -> Self {
        log::debug!(
            "render context {}x{}, {} rasterizer, {:?} culling",
            config.width,
            config.height,
            config.rasterizer,
            config.cull
        );
        Self {
            renderer: Renderer::new(config.width, config.height),
            rasterizer: RasterizerDispatcher::new(config.rasterizer),
            items: Vec::new(),
            render_mode: config.render_mode,
            cull: config.cull,
            shader: Shader {
                mode: config.shading,
                light: DirectionalLight::default(),
                fog: Fog::new(config.fog, config.max_view_distance),
            },
            outline_color: config.outline_color,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("resizing render context to {width}x{height}");
        self.renderer.resize(width, height);
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_rasterizer(&mut self, rasterizer_type: RasterizerType) {
        self.rasterizer.set_type(rasterizer_type);
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    pub fn set_cull_mode(&mut self, cull: CullMode) {
        self.cull = cull;
    }

    pub fn set_shading(&mut self, mode: ShadingMode) {
        self.shader.mode = mode;
    }

    pub fn set_fog(&mut self, mode: FogMode) {
        self.shader.fog.mode = mode;
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.shader.light = light;
    }

    /// Items drawn in the last frame, in draw order.
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Renders `meshes` as seen from `camera` over `background`.
    ///
    /// `background` also serves as the fog color.
    pub fn render_frame<'m>(
        &mut self,
        camera: &Camera,
        meshes: impl IntoIterator<Item = &'m Mesh>,
        background: u32,
    ) -> Frame<'_> {
        let projection = Projection::for_camera(camera, self.renderer.width(), self.renderer.height());
        let pipeline = Pipeline::new(
            camera,
            projection,
            self.cull,
            self.shader,
            background,
            self.outline_color,
        );

        let mut stats = FrameStats::default();
        self.items.clear();
        for mesh in meshes {
            pipeline.collect_mesh(mesh, &mut self.items, &mut stats);
        }
        sort_far_to_near(&mut self.items);

        self.renderer.clear(background);
        self.draw_items();
        stats.drawn = self.items.len();
        log::trace!("{stats:?}");

        Frame {
            pixels: self.renderer.pixels(),
            bytes: self.renderer.as_bytes(),
            width: self.renderer.width(),
            height: self.renderer.height(),
            stats,
        }
    }

    fn draw_items(&mut self) {
        let (fill, outline) = match self.render_mode {
            RenderMode::Filled => (true, false),
            RenderMode::FilledOutline => (true, true),
            RenderMode::Outline => (false, true),
        };

        // Each item is outlined before the next one is filled so that nearer
        // fills cover the outlines of the faces behind them.
        for item in &self.items {
            if fill {
                let mut fb = self.renderer.as_framebuffer();
                fill_polygon(&self.rasterizer, &item.points, &mut fb, item.color);
            }
            if outline {
                let color = if fill { item.outline } else { item.color };
                self.renderer.draw_polygon_outline(&item.points, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::vec3::Vec3;
    use crate::mesh::add_box;

    fn config() -> RenderConfig {
        RenderConfig {
            width: 160,
            height: 120,
            fog: FogMode::Off,
            render_mode: RenderMode::Filled,
            ..RenderConfig::default()
        }
    }

    fn cube(position: Vec3, size: f32, color: u32) -> Mesh {
        let mut mesh = Mesh::new(position, 0.0);
        add_box(&mut mesh, size, size, size, Vec3::ZERO, color).unwrap();
        mesh
    }

    #[test]
    fn empty_scene_is_background() {
        let mut context = RenderContext::new(&config());
        let frame = context.render_frame(&Camera::default(), std::iter::empty(), colors::SKY);
        assert!(frame.pixels().iter().all(|&c| c == colors::SKY));
        assert_eq!(frame.stats, FrameStats::default());
        assert_eq!(frame.as_bytes().len(), 160 * 120 * 4);
    }

    #[test]
    fn nearer_box_owns_the_centre_pixel() {
        let near = cube(Vec3::new(0.0, 0.0, 100.0), 10.0, colors::CRIMSON);
        let far = cube(Vec3::new(0.0, 0.0, 300.0), 60.0, colors::TEAL);

        for rasterizer in [RasterizerType::Scanline, RasterizerType::EdgeFunction] {
            let mut context = RenderContext::new(&config());
            context.set_rasterizer(rasterizer);
            // Submit the near box first; sorting has to put it last.
            let frame = context.render_frame(&Camera::default(), [&near, &far], colors::SKY);
            assert_eq!(frame.pixel(80, 60), Some(colors::CRIMSON), "{rasterizer}");
            // Far box shows around the near one.
            assert_eq!(frame.pixel(80, 60 - 30), Some(colors::TEAL), "{rasterizer}");
            assert_eq!(frame.pixel(2, 2), Some(colors::SKY), "{rasterizer}");
        }
    }

    #[test]
    fn frame_items_are_sorted_far_to_near() {
        let meshes: Vec<Mesh> = (0..12)
            .map(|i| {
                let angle = i as f32 * 0.5;
                let position = Vec3::new(
                    angle.sin() * 80.0,
                    (i as f32 - 6.0) * 10.0,
                    150.0 + i as f32 * 25.0,
                );
                let mut mesh = cube(position, 15.0, colors::STONE);
                mesh.set_yaw(angle);
                mesh
            })
            .collect();
        let mut camera = Camera::new(Vec3::new(0.0, 40.0, 0.0));
        camera.rotate_pitch(-0.2);

        let mut context = RenderContext::new(&config());
        let stats = context.render_frame(&camera, &meshes, colors::SKY).stats;
        let items = context.items();

        assert!(!items.is_empty());
        assert!(items.windows(2).all(|w| w[0].depth >= w[1].depth));
        assert_eq!(stats.meshes, 12);
        assert_eq!(stats.faces, 72);
        assert_eq!(stats.drawn, items.len());
        assert_eq!(
            stats.faces,
            stats.drawn + stats.near_rejected + stats.back_culled + stats.index_faults
        );
    }

    #[test]
    fn outline_mode_leaves_interior_untouched() {
        let mut config = config();
        config.render_mode = RenderMode::Outline;
        let mut context = RenderContext::new(&config);
        let mesh = cube(Vec3::new(0.0, 0.0, 100.0), 20.0, colors::CRIMSON);
        let frame = context.render_frame(&Camera::default(), [&mesh], colors::SKY);

        assert_eq!(frame.pixel(80, 60), Some(colors::SKY));
        assert!(frame.pixels().iter().any(|&c| c == colors::CRIMSON));
    }

    #[test]
    fn filled_outline_draws_outline_color_on_edges() {
        let mut config = config();
        config.render_mode = RenderMode::FilledOutline;
        let mut context = RenderContext::new(&config);
        let mesh = cube(Vec3::new(0.0, 0.0, 100.0), 20.0, colors::CRIMSON);
        let frame = context.render_frame(&Camera::default(), [&mesh], colors::SKY);

        assert_eq!(frame.pixel(80, 60), Some(colors::CRIMSON));
        assert!(frame.pixels().iter().any(|&c| c == colors::OUTLINE));
    }

    #[test]
    fn resize_changes_frame_size() {
        let mut context = RenderContext::new(&config());
        context.resize(64, 32);
        let frame = context.render_frame(&Camera::default(), std::iter::empty(), colors::SKY);
        assert_eq!((frame.width(), frame.height()), (64, 32));
        assert_eq!(frame.pixels().len(), 64 * 32);
    }
}
