use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Keys with a one-shot action, reported on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Num1,
    Num2,
    Num3,
    /// Toggle rasterizer.
    R,
    /// Toggle culling method.
    C,
    /// Cycle fog mode.
    F,
    /// Toggle directional shading.
    L,
    /// Save a screenshot.
    P,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        match keycode {
            Keycode::Num1 => Some(Key::Num1),
            Keycode::Num2 => Some(Key::Num2),
            Keycode::Num3 => Some(Key::Num3),
            Keycode::R => Some(Key::R),
            Keycode::C => Some(Key::C),
            Keycode::F => Some(Key::F),
            Keycode::L => Some(Key::L),
            Keycode::P => Some(Key::P),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
    KeyPress(Key),
}

/// Held movement keys, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub look_up: bool,
    pub look_down: bool,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to hold the target frame rate and returns the time
    /// elapsed since the previous call in milliseconds.
    ///
    /// Movement does not scale by this value; it only feeds the FPS counter.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Averages frame times and logs the rate once per second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    elapsed_ms: u64,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame; returns the new average when a second has passed.
    pub fn tick(&mut self, delta_ms: u64) -> Option<f32> {
        self.elapsed_ms += delta_ms;
        self.frames += 1;
        if self.elapsed_ms < 1000 {
            return None;
        }
        self.fps = self.frames as f32 * 1000.0 / self.elapsed_ms as f32;
        self.elapsed_ms = 0;
        self.frames = 0;
        log::debug!("{:.1} fps", self.fps);
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so that it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped before the creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::debug!("opened {width}x{height} window \"{title}\"");
        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events and returns the first one that matters.
    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = Key::from_keycode(keycode) {
                        return WindowEvent::KeyPress(key);
                    }
                }
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Samples the movement keys currently held down.
    pub fn input_state(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        InputState {
            forward: keys.is_scancode_pressed(Scancode::W),
            back: keys.is_scancode_pressed(Scancode::S),
            left: keys.is_scancode_pressed(Scancode::A),
            right: keys.is_scancode_pressed(Scancode::D),
            up: keys.is_scancode_pressed(Scancode::Space),
            down: keys.is_scancode_pressed(Scancode::LShift),
            turn_left: keys.is_scancode_pressed(Scancode::Left),
            turn_right: keys.is_scancode_pressed(Scancode::Right),
            look_up: keys.is_scancode_pressed(Scancode::Up),
            look_down: keys.is_scancode_pressed(Scancode::Down),
        }
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::new();
        let reports: Vec<f32> = (0..120).filter_map(|_| counter.tick(16)).collect();
        // 63 frames of 16 ms reach 1008 ms.
        assert_eq!(reports.len(), 1);
        assert!((reports[0] - 62.5).abs() < 0.1);
    }
}
