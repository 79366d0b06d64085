//! Per-frame input edge tracking: double-buffered key/button state, pointer
//! relays and the typed-character queue.
//!
//! Raw down/up events arrive from the windowing layer as they are pumped;
//! the per-frame reset runs before pumping and clears the edge flags while
//! preserving the held state. That is what turns "is this held" signals into
//! "was this pressed/released this frame" events.

use bitflags::bitflags;

pub const KEY_COUNT: usize = 256;
pub const BUTTON_COUNT: usize = 16;

/// Typed characters kept per frame; further input is dropped silently.
pub const CHAR_QUEUE_LEN: usize = 32;

bitflags! {
    /// State byte for one key or mouse button.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InputFlags: u8 {
        const DOWN = 1 << 0;
        const PRESSED = 1 << 1;
        const RELEASED = 1 << 2;
    }
}

/// Raw events the windowing layer delivers, one pump per frame. Mouse
/// coordinates are window-space; the context maps them through the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(u8),
    KeyUp(u8),
    TextInput(char),
    MouseDown(u8),
    MouseUp(u8),
    MouseMove { x: i32, y: i32 },
    Wheel(f32),
    Resize { width: i32, height: i32 },
}

/// Fixed-capacity FIFO ring for typed characters.
#[derive(Debug, Clone, Copy)]
struct CharQueue {
    buf: [char; CHAR_QUEUE_LEN],
    head: usize,
    len: usize,
}

impl CharQueue {
    fn new() -> Self {
        Self {
            buf: ['\0'; CHAR_QUEUE_LEN],
            head: 0,
            len: 0,
        }
    }

    fn push(&mut self, ch: char) {
        if self.len == CHAR_QUEUE_LEN {
            return;
        }
        self.buf[(self.head + self.len) % CHAR_QUEUE_LEN] = ch;
        self.len += 1;
    }

    fn pop(&mut self) -> Option<char> {
        if self.len == 0 {
            return None;
        }
        let ch = self.buf[self.head];
        self.head = (self.head + 1) % CHAR_QUEUE_LEN;
        self.len -= 1;
        Some(ch)
    }

    fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

/// All per-frame input state: key and button flag tables, the character
/// queue and the pointer relays.
pub struct InputState {
    keys: [InputFlags; KEY_COUNT],
    buttons: [InputFlags; BUTTON_COUNT],
    chars: CharQueue,
    mouse_pos: (i32, i32),
    mouse_delta: (i32, i32),
    wheel: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: [InputFlags::empty(); KEY_COUNT],
            buttons: [InputFlags::empty(); BUTTON_COUNT],
            chars: CharQueue::new(),
            mouse_pos: (0, 0),
            mouse_delta: (0, 0),
            wheel: 0.0,
        }
    }

    /// Per-frame reset: clear the pressed/released edges on every entry
    /// (held state survives), drop queued characters and zero the pointer
    /// accumulators. Call once per frame, before pumping that frame's raw
    /// events.
    pub fn begin_frame(&mut self) {
        for flags in self.keys.iter_mut().chain(self.buttons.iter_mut()) {
            *flags &= InputFlags::DOWN;
        }
        self.chars.clear();
        self.mouse_delta = (0, 0);
        self.wheel = 0.0;
    }

    pub fn key_down_event(&mut self, key: u8) {
        self.keys[key as usize].insert(InputFlags::DOWN | InputFlags::PRESSED);
    }

    pub fn key_up_event(&mut self, key: u8) {
        let flags = &mut self.keys[key as usize];
        flags.remove(InputFlags::DOWN);
        flags.insert(InputFlags::RELEASED);
    }

    pub fn button_down_event(&mut self, button: u8) {
        if let Some(flags) = self.buttons.get_mut(button as usize) {
            flags.insert(InputFlags::DOWN | InputFlags::PRESSED);
        }
    }

    pub fn button_up_event(&mut self, button: u8) {
        if let Some(flags) = self.buttons.get_mut(button as usize) {
            flags.remove(InputFlags::DOWN);
            flags.insert(InputFlags::RELEASED);
        }
    }

    /// Queue a typed character. Dropped silently once the queue is full.
    pub fn push_char(&mut self, ch: char) {
        self.chars.push(ch);
    }

    /// Pop the oldest typed character of the frame.
    pub fn get_char(&mut self) -> Option<char> {
        self.chars.pop()
    }

    /// Record a pointer move in canvas space. The delta accumulates across
    /// the frame's motion events.
    pub fn mouse_move_event(&mut self, x: i32, y: i32) {
        self.mouse_delta.0 += x - self.mouse_pos.0;
        self.mouse_delta.1 += y - self.mouse_pos.1;
        self.mouse_pos = (x, y);
    }

    pub fn wheel_event(&mut self, amount: f32) {
        self.wheel += amount;
    }

    #[inline]
    pub fn is_key_down(&self, key: usize) -> bool {
        check(&self.keys, key, InputFlags::DOWN)
    }

    #[inline]
    pub fn was_key_pressed(&self, key: usize) -> bool {
        check(&self.keys, key, InputFlags::PRESSED)
    }

    #[inline]
    pub fn was_key_released(&self, key: usize) -> bool {
        check(&self.keys, key, InputFlags::RELEASED)
    }

    #[inline]
    pub fn is_button_down(&self, button: usize) -> bool {
        check(&self.buttons, button, InputFlags::DOWN)
    }

    #[inline]
    pub fn was_button_pressed(&self, button: usize) -> bool {
        check(&self.buttons, button, InputFlags::PRESSED)
    }

    #[inline]
    pub fn was_button_released(&self, button: usize) -> bool {
        check(&self.buttons, button, InputFlags::RELEASED)
    }

    #[inline]
    pub fn mouse_pos(&self) -> (i32, i32) {
        self.mouse_pos
    }

    #[inline]
    pub fn mouse_delta(&self) -> (i32, i32) {
        self.mouse_delta
    }

    #[inline]
    pub fn wheel(&self) -> f32 {
        self.wheel
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Out-of-range ids answer false rather than fault.
#[inline]
fn check(table: &[InputFlags], idx: usize, flag: InputFlags) -> bool {
    table.get(idx).is_some_and(|f| f.contains(flag))
}
