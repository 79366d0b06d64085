//! SDL2 presentation bridge: window, streaming texture and the raw-event
//! source that feeds the engine's input tracker.
//!
//! Everything SDL lives here. The engine core hands this module a finished
//! `Canvas` and a viewport rectangle once per frame and receives plain
//! `InputEvent` values back; it never sees an SDL type.

use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::input::InputEvent;

use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::{MouseButton, MouseUtil};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas as SdlCanvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: SdlCanvas<Window>,
    event_pump: EventPump,
    mouse: MouseUtil,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

impl Display {
    /// Create a window-backed display. `vsync=true` locks presentation to
    /// the monitor refresh; leave it off when the frame pacer governs
    /// timing.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        // typed-character events
        video_subsystem.text_input().start();

        Ok((
            Self {
                canvas,
                event_pump,
                mouse: sdl_context.mouse(),
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_cursor_visible(&self, visible: bool) {
        self.mouse.show_cursor(visible);
    }

    /// Upload the canvas and present it into `viewport` (window
    /// coordinates), clearing the borders to black.
    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        canvas: &Canvas,
        viewport: Rect,
    ) -> Result<(), String> {
        target
            .texture
            .update(None, canvas.as_bytes(), (canvas.width() * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        self.canvas.clear();
        if !viewport.is_empty() {
            let dst =
                sdl2::rect::Rect::new(viewport.x, viewport.y, viewport.w as u32, viewport.h as u32);
            self.canvas.copy(&target.texture, None, Some(dst))?;
        }
        self.canvas.present();
        Ok(())
    }

    /// Drain the OS queue into engine events. Key events relay the physical
    /// scancode; codes outside the engine's 256-entry table and repeat
    /// key-downs are dropped here.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(code) = map_scancode(sc) {
                        events.push(InputEvent::KeyDown(code));
                    }
                },
                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(code) = map_scancode(sc) {
                        events.push(InputEvent::KeyUp(code));
                    }
                },
                Event::TextInput { text, .. } => {
                    events.extend(
                        text.chars()
                            .filter(|c| !c.is_control())
                            .map(InputEvent::TextInput),
                    );
                },
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::MouseButtonDown { mouse_btn, .. } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseDown(button));
                    }
                },
                Event::MouseButtonUp { mouse_btn, .. } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseUp(button));
                    }
                },
                Event::MouseWheel { precise_y, .. } => {
                    events.push(InputEvent::Wheel(precise_y));
                },
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => {
                    self.width = w.max(1) as u32;
                    self.height = h.max(1) as u32;
                    events.push(InputEvent::Resize {
                        width: w,
                        height: h,
                    });
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the canvas resolution. ABGR8888 reads the
    /// canvas's r,g,b,a byte order on little-endian hosts.
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self { texture })
    }
}

fn map_scancode(sc: sdl2::keyboard::Scancode) -> Option<u8> {
    let code = sc as i32;
    (0..256).contains(&code).then(|| code as u8)
}

fn map_mouse_button(btn: MouseButton) -> Option<u8> {
    match btn {
        MouseButton::Left => Some(1),
        MouseButton::Right => Some(2),
        MouseButton::Middle => Some(3),
        MouseButton::X1 => Some(4),
        MouseButton::X2 => Some(5),
        MouseButton::Unknown => None,
    }
}
