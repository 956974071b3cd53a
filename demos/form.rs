use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, event, execute, queue, terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use textpick::{CreatableSelect, Event, FocusState, Key, MountedSelect, OutsideWatcher, SelectEvent};

/// Restores the terminal on drop, including on panic unwind.
struct TermGuard;

impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("textpick-form.log")?;
    let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);

    terminal::enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;
    let _guard = TermGuard;

    let fruit_value = Arc::new(Mutex::new(String::new()));
    let city_value = Arc::new(Mutex::new(String::new()));

    let watcher = OutsideWatcher::new();
    let mut focus = FocusState::new();
    focus.register("fruit");
    focus.register("city");

    let fruit_sink = Arc::clone(&fruit_value);
    let mut fruit = CreatableSelect::new()
        .id("fruit")
        .options(["Apple", "Banana", "Apricot", "Cherry"])
        .placeholder("Select or type...")
        .on_change(move |text| {
            if let Ok(mut value) = fruit_sink.lock() {
                *value = text.to_string();
            }
        })
        .mount(10, 3, &watcher);

    let city_sink = Arc::clone(&city_value);
    let mut city = CreatableSelect::new()
        .id("city")
        .options(["Amsterdam", "Berlin", "Lisbon", "Oslo"])
        .placeholder("Select or type...")
        .on_change(move |text| {
            if let Ok(mut value) = city_sink.lock() {
                *value = text.to_string();
            }
        })
        .mount(10, 9, &watcher);

    loop {
        draw(&fruit, &city, &fruit_value, &city_value)?;

        let raw = event::read()?;
        let Some(event) = Event::from_crossterm(&raw) else {
            continue;
        };

        match event {
            Event::Key {
                key: Key::Char('q'),
                modifiers,
            } if modifiers.ctrl => return Ok(()),

            Event::Key { key: Key::Tab, .. } => {
                if let Some(id) = focus.focus_next() {
                    apply_focus(&id, &mut fruit, &mut city);
                }
            }

            Event::Key {
                key: Key::BackTab, ..
            } => {
                if let Some(id) = focus.focus_prev() {
                    apply_focus(&id, &mut fruit, &mut city);
                }
            }

            Event::PointerDown { x, y, .. } => {
                // Document-level watcher first, then the widgets themselves.
                watcher.pointer_down(x, y);
                let fruit_out = fruit.handle_event(&event);
                let city_out = city.handle_event(&event);

                if fruit_out.contains(&SelectEvent::FocusRequested) {
                    city.blur();
                    focus.focus("fruit");
                } else if city_out.contains(&SelectEvent::FocusRequested) {
                    fruit.blur();
                    focus.focus("city");
                }
                if fruit_out.contains(&SelectEvent::FocusReleased)
                    || city_out.contains(&SelectEvent::FocusReleased)
                {
                    focus.blur();
                }
            }

            Event::Key { .. } => {
                let out = match focus.focused() {
                    Some("fruit") => fruit.handle_event(&event),
                    Some("city") => city.handle_event(&event),
                    _ => Vec::new(),
                };
                if out.contains(&SelectEvent::FocusReleased) {
                    focus.blur();
                }
            }
        }
    }
}

fn apply_focus(id: &str, fruit: &mut MountedSelect, city: &mut MountedSelect) {
    if id == "fruit" {
        city.blur();
        fruit.focus();
    } else {
        fruit.blur();
        city.focus();
    }
}

fn draw(
    fruit: &MountedSelect,
    city: &MountedSelect,
    fruit_value: &Arc<Mutex<String>>,
    city_value: &Arc<Mutex<String>>,
) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(2, 1),
        SetAttribute(Attribute::Bold),
        Print("textpick form demo - Tab to switch fields, Ctrl+Q to quit"),
        SetAttribute(Attribute::Reset),
        cursor::MoveTo(2, 3),
        Print("Fruit:"),
        cursor::MoveTo(2, 9),
        Print("City:"),
    )?;

    draw_select(&mut stdout, fruit)?;
    draw_select(&mut stdout, city)?;

    let fruit_text = fruit_value.lock().map(|v| v.clone()).unwrap_or_default();
    let city_text = city_value.lock().map(|v| v.clone()).unwrap_or_default();
    queue!(
        stdout,
        cursor::MoveTo(2, 16),
        Print(format!("Form state: fruit={fruit_text:?} city={city_text:?}")),
    )?;

    stdout.flush()
}

fn draw_select(stdout: &mut io::Stdout, select: &MountedSelect) -> io::Result<()> {
    let layout = select.layout();
    let field = layout.field;

    let content = if select.text().is_empty() && !select.is_focused() {
        select.placeholder().to_string()
    } else {
        select.text().to_string()
    };

    queue!(stdout, cursor::MoveTo(field.x, field.y))?;
    if select.is_focused() {
        queue!(stdout, SetAttribute(Attribute::Underlined))?;
    }
    queue!(
        stdout,
        Print(content),
        SetAttribute(Attribute::Reset),
        cursor::MoveTo(layout.toggle.x, layout.toggle.y),
        Print(if select.is_open() { "▴" } else { "▾" }),
    )?;

    // `zip` truncates to the visible rows, so a stale layout draws nothing.
    for (row, label) in layout.rows.iter().zip(select.visible_rows()) {
        queue!(stdout, cursor::MoveTo(row.x, row.y), Print(label))?;
    }

    Ok(())
}
