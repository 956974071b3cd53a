/// Events the widget consumes. The host translates raw terminal input into
/// these and routes them; event dispatch itself stays on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered to the widget holding input focus.
    Key { key: Key, modifiers: Modifiers },
    /// Pointer button pressed at screen coordinates.
    PointerDown { x: u16, y: u16, button: MouseButton },
}

impl Event {
    /// Translate a raw crossterm event.
    /// Returns `None` for events outside the widget vocabulary (key release,
    /// mouse movement, resize, ...).
    pub fn from_crossterm(raw: &crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

        match raw {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(Event::Key {
                    key: Key::from_code(key_event.code)?,
                    modifiers: key_event.modifiers.into(),
                })
            }
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Down(button) => Some(Event::PointerDown {
                    x: mouse_event.column,
                    y: mouse_event.row,
                    button: button.into(),
                }),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Map a crossterm key code. Returns `None` for unsupported keys.
    pub fn from_code(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Delete => Some(Key::Delete),
            KeyCode::Tab => Some(Key::Tab),
            KeyCode::BackTab => Some(Key::BackTab),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            _ => None,
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
