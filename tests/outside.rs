use std::sync::{Arc, Mutex};

use textpick::{CreatableSelect, Event, Key, Modifiers, MountedSelect, MouseButton, OutsideWatcher};

type ChangeLog = Arc<Mutex<Vec<String>>>;

fn click(x: u16, y: u16) -> Event {
    Event::PointerDown {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn mounted_at(y: u16, watcher: &OutsideWatcher, log: &ChangeLog) -> MountedSelect {
    let sink = Arc::clone(log);
    CreatableSelect::new()
        .options(["Apple", "Banana", "Apricot"])
        .on_change(move |text| sink.lock().unwrap().push(text.to_string()))
        .mount(0, y, watcher)
}

// ============================================================================
// Outside-interaction closing
// ============================================================================

#[test]
fn test_pointer_outside_closes_without_touching_text() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();
    let mut select = mounted_at(0, &watcher, &log);

    select.focus();
    for c in "ap".chars() {
        select.handle_event(&Event::Key {
            key: Key::Char(c),
            modifiers: Modifiers::new(),
        });
    }
    assert!(select.is_open());

    watcher.pointer_down(50, 20);

    assert!(!select.is_open());
    assert_eq!(select.text(), "ap");
    assert_eq!(*log.lock().unwrap(), ["a", "ap"]);
}

#[test]
fn test_pointer_inside_does_not_close() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();
    let mut select = mounted_at(0, &watcher, &log);

    select.focus();
    // Field row and a candidate row are both inside the bounding region.
    watcher.pointer_down(2, 0);
    assert!(select.is_open());
    watcher.pointer_down(2, 2);
    assert!(select.is_open());
}

#[test]
fn test_closed_widget_is_left_alone() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();
    let select = mounted_at(0, &watcher, &log);

    watcher.pointer_down(50, 20);
    assert!(!select.is_open());
    assert_eq!(select.text(), "");
}

#[test]
fn test_click_in_one_widget_closes_the_other() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();
    let mut top = mounted_at(0, &watcher, &log);
    let mut bottom = mounted_at(20, &watcher, &log);

    top.focus();
    bottom.focus();
    assert!(top.is_open() && bottom.is_open());

    // A click inside the top widget's field is outside the bottom widget.
    watcher.pointer_down(2, 0);
    top.handle_event(&click(2, 0));
    bottom.handle_event(&click(2, 0));

    assert!(top.is_open());
    assert!(!bottom.is_open());
}

#[test]
fn test_region_shrinks_when_list_closes() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();
    let mut select = mounted_at(0, &watcher, &log);

    select.focus();
    select.handle_event(&Event::Key {
        key: Key::Escape,
        modifiers: Modifiers::new(),
    });
    // Reopen via toggle, then click where a candidate row used to be but
    // the dropdown of the *other* state no longer is: y=2 is a row again
    // once open, so it must not close.
    select.handle_event(&click(9, 0));
    watcher.pointer_down(2, 2);
    assert!(select.is_open());
}

// ============================================================================
// Registration lifecycle
// ============================================================================

#[test]
fn test_guard_deregisters_exactly_once_on_drop() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();

    assert_eq!(watcher.watch_count(), 0);
    let first = mounted_at(0, &watcher, &log);
    let second = mounted_at(20, &watcher, &log);
    assert_eq!(watcher.watch_count(), 2);

    drop(first);
    assert_eq!(watcher.watch_count(), 1);
    drop(second);
    assert_eq!(watcher.watch_count(), 0);
}

#[test]
fn test_remount_cycles_do_not_leak_registrations() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();

    for _ in 0..10 {
        let mut select = mounted_at(0, &watcher, &log);
        select.focus();
        assert_eq!(watcher.watch_count(), 1);
    }
    assert_eq!(watcher.watch_count(), 0);

    // A dangling pointer-down after everything unmounted is harmless.
    watcher.pointer_down(50, 20);
}

#[test]
fn test_watcher_clones_share_registrations() {
    let watcher = OutsideWatcher::new();
    let log = ChangeLog::default();
    let mut select = mounted_at(0, &watcher, &log);

    select.focus();
    let clone = watcher.clone();
    assert_eq!(clone.watch_count(), 1);
    clone.pointer_down(50, 20);
    assert!(!select.is_open());
}

#[test]
fn test_guard_outliving_the_watcher_is_safe() {
    let log = ChangeLog::default();
    let select = {
        let watcher = OutsideWatcher::new();
        mounted_at(0, &watcher, &log)
    };
    // Watcher dropped first; dropping the widget's guard must not panic.
    drop(select);
}
