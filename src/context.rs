//! The owned engine aggregate: screen canvas, input tracker, frame pacer,
//! default font, window-size relay and the quit latch. One `Context` per
//! surface; every operation takes it by reference, there is no ambient
//! state.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::font::{self, Font};
use crate::geometry::{letterbox_fit, Rect};
use crate::input::{InputEvent, InputState};
use crate::timing::FramePacer;

pub struct Context {
    pub screen: Canvas,
    pub input: InputState,
    pacer: FramePacer,
    font: Font,
    window_width: i32,
    window_height: i32,
    quit: bool,
}

impl Context {
    /// Create a context with a `width` x `height` screen and the built-in
    /// font. The window size starts equal to the screen until a resize
    /// event arrives.
    pub fn new(width: i32, height: i32) -> Result<Context, String> {
        Ok(Context {
            screen: Canvas::new(width, height),
            input: InputState::new(),
            pacer: FramePacer::new(),
            font: Font::builtin()?,
            window_width: width,
            window_height: height,
            quit: false,
        })
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.pacer.set_target_fps(fps);
    }

    /// Block until the frame deadline; returns the delta seconds.
    pub fn tick(&mut self) -> f32 {
        self.pacer.tick()
    }

    /// Reset the per-frame input edges. Call before pumping this frame's
    /// raw events.
    pub fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    /// Route one raw event from the windowing layer into the engine state.
    /// Pointer coordinates are mapped from window space into canvas space
    /// through the letterbox viewport.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Quit => self.quit = true,
            InputEvent::KeyDown(key) => self.input.key_down_event(key),
            InputEvent::KeyUp(key) => self.input.key_up_event(key),
            InputEvent::TextInput(ch) => self.input.push_char(ch),
            InputEvent::MouseDown(button) => self.input.button_down_event(button),
            InputEvent::MouseUp(button) => self.input.button_up_event(button),
            InputEvent::MouseMove { x, y } => {
                let (cx, cy) = self.window_to_canvas(x, y);
                self.input.mouse_move_event(cx, cy);
            }
            InputEvent::Wheel(amount) => self.input.wheel_event(amount),
            InputEvent::Resize { width, height } => {
                self.window_width = width.max(1);
                self.window_height = height.max(1);
            }
        }
    }

    /// Latch the quit request. Once set it is never retracted.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Tell the context how large the presentation window is. Also updated
    /// by `Resize` events.
    pub fn set_window_size(&mut self, width: i32, height: i32) {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
    }

    /// Letterboxed output rectangle for the presentation sink, in window
    /// coordinates.
    pub fn viewport(&self) -> Rect {
        letterbox_fit(
            self.screen.width(),
            self.screen.height(),
            self.window_width,
            self.window_height,
        )
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Draw text on the screen with the default font. Returns the final
    /// cursor x.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> i32 {
        font::draw_text(&mut self.screen, &self.font, text, x, y, color)
    }

    fn window_to_canvas(&self, x: i32, y: i32) -> (i32, i32) {
        let vp = self.viewport();
        if vp.is_empty() {
            return (0, 0);
        }
        (
            (x - vp.x) * self.screen.width() / vp.w,
            (y - vp.y) * self.screen.height() / vp.h,
        )
    }
}
