//! Creatable select widget - a text input with a filtered dropdown that also
//! accepts arbitrary freeform text.
//!
//! [`CreatableSelect`] is the configuration builder; [`mount`] produces a
//! [`MountedSelect`], the live state machine. The host feeds it [`Event`]s
//! and applies the returned [`SelectEvent`]s (focus requests/releases) to its
//! own focus handling. The change callback fires on every edit and every
//! commit, so a freeform value is committed simply by being the current text
//! when the enclosing form reads it.
//!
//! [`mount`]: CreatableSelect::mount

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::event::{Event, Key, Modifiers, MouseButton};
use crate::filter::{filter_indices, MatchPolicy, SubstringPolicy};
use crate::layout::{field_width, Rect, SelectLayout};
use crate::outside::{OutsideGuard, OutsideWatcher};
use crate::text_input::{TextEditResult, TextInput};

/// Change notification handler, invoked with the new text on every edit and
/// every commit.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Out-events produced by a mounted select. The host applies focus
/// requests/releases to its [`FocusState`](crate::focus::FocusState) and can
/// observe edits and commits without installing a change handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// The text changed through a user edit.
    Changed { text: String },
    /// A candidate was committed (explicit pick or Enter).
    Committed { label: String },
    /// The candidate list opened.
    Opened,
    /// The candidate list closed.
    Closed,
    /// The widget wants input focus (field click, toggle open).
    FocusRequested,
    /// The widget released input focus (commit completed).
    FocusReleased,
}

/// Builder for a creatable select.
///
/// # Example
///
/// ```ignore
/// let watcher = OutsideWatcher::new();
/// let mut fruit = CreatableSelect::new()
///     .id("fruit")
///     .options(["Apple", "Banana", "Apricot"])
///     .placeholder("Select or type...")
///     .on_change(|text| log::info!("fruit = {text}"))
///     .mount(4, 2, &watcher);
/// ```
pub struct CreatableSelect {
    id: String,
    options: Vec<String>,
    value: String,
    placeholder: String,
    class: Option<String>,
    disabled: bool,
    width: Option<u16>,
    policy: Box<dyn MatchPolicy>,
    on_change: Option<ChangeHandler>,
}

impl Default for CreatableSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatableSelect {
    pub fn new() -> Self {
        Self {
            id: "select".into(),
            options: Vec::new(),
            value: String::new(),
            placeholder: String::new(),
            class: None,
            disabled: false,
            width: None,
            policy: Box::new(SubstringPolicy),
            on_change: None,
        }
    }

    /// Set the widget id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the candidate options. Caller order is preserved; duplicates are
    /// kept as separate entries.
    pub fn options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial text value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the placeholder text shown when input is empty.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Opaque styling hook for the host's renderer. No behavioral effect.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Mark the select as disabled: editing, toggling, and commit
    /// interactions are all refused.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Fix the field width in cells instead of deriving it from the labels.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Replace the matching policy (default: case-insensitive substring).
    pub fn policy(mut self, policy: impl MatchPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Set the change handler, invoked with the new text on every edit and
    /// every commit. Without one the select still works but notifies nobody.
    pub fn on_change(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Mount the select at `(x, y)`, registering it with the watcher for the
    /// widget's lifetime. Dropping the returned widget deregisters it.
    pub fn mount(self, x: u16, y: u16, watcher: &OutsideWatcher) -> MountedSelect {
        let width = self
            .width
            .unwrap_or_else(|| field_width(&self.options, &self.placeholder));

        let open = Arc::new(AtomicBool::new(false));
        let region = Arc::new(Mutex::new(Rect::new(x, y, width, 1)));
        let watch = watcher.watch(Arc::clone(&region), Arc::clone(&open));

        let mut mounted = MountedSelect {
            id: self.id,
            options: self.options,
            input: TextInput::new(self.value),
            placeholder: self.placeholder,
            class: self.class,
            disabled: self.disabled,
            explicit_width: self.width,
            width,
            policy: self.policy,
            on_change: self.on_change,
            filtered: Vec::new(),
            open,
            region,
            origin: (x, y),
            layout: SelectLayout::default(),
            focused: false,
            _watch: watch,
        };
        mounted.refilter();
        mounted.relayout();
        mounted
    }
}

/// A live creatable select: the interaction state machine plus its derived
/// candidate list and screen regions.
pub struct MountedSelect {
    id: String,
    options: Vec<String>,
    input: TextInput,
    placeholder: String,
    class: Option<String>,
    disabled: bool,
    explicit_width: Option<u16>,
    width: u16,
    policy: Box<dyn MatchPolicy>,
    on_change: Option<ChangeHandler>,
    /// Indices into `options`, original order. Re-derived on every change to
    /// the text or the options; never mutated independently.
    filtered: Vec<usize>,
    open: Arc<AtomicBool>,
    region: Arc<Mutex<Rect>>,
    origin: (u16, u16),
    layout: SelectLayout,
    focused: bool,
    _watch: OutsideGuard,
}

impl MountedSelect {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    /// Cursor position within the text, in characters.
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Indices of the current candidates, in original option order.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Labels of the current candidates, in original option order.
    pub fn filtered_labels(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .filter_map(|&i| self.options.get(i))
            .map(String::as_str)
            .collect()
    }

    /// Candidate labels the renderer should show: empty unless the list is
    /// open and has at least one match.
    pub fn visible_rows(&self) -> Vec<&str> {
        if self.is_open() {
            self.filtered_labels()
        } else {
            Vec::new()
        }
    }

    pub fn layout(&self) -> &SelectLayout {
        &self.layout
    }

    /// Feed one input event through the state machine. Total over all event
    /// input: unhandled events degrade to a no-op transition.
    pub fn handle_event(&mut self, event: &Event) -> Vec<SelectEvent> {
        if self.disabled {
            return Vec::new();
        }

        // The watcher may have closed the list since the last event; refresh
        // the regions before routing anything against them.
        if !self.is_open() && !self.layout.rows.is_empty() {
            self.relayout();
        }

        match *event {
            Event::PointerDown {
                x,
                y,
                button: MouseButton::Left,
            } => self.handle_pointer(x, y),
            Event::PointerDown { .. } => Vec::new(),
            Event::Key { key, modifiers } => self.handle_key(key, modifiers),
        }
    }

    /// Give the widget input focus. Gaining focus opens the candidate list.
    pub fn focus(&mut self) -> Vec<SelectEvent> {
        if self.disabled {
            return Vec::new();
        }

        let mut out = Vec::new();
        self.focused = true;
        self.set_open(true, &mut out);
        self.relayout();
        out
    }

    /// Drop input focus. Does not close the list; only commit, escape, and
    /// outside interactions close it.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Adopt an externally supplied value. The external write always wins
    /// over in-flight local edits; it does not touch the open state and does
    /// not fire the change handler.
    pub fn sync_value(&mut self, value: impl Into<String>) {
        self.input.set_text(value);
        self.refilter();
        self.relayout();
    }

    /// Replace the option list and re-derive the candidates.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = impl Into<String>>) {
        self.options = options.into_iter().map(Into::into).collect();
        if self.explicit_width.is_none() {
            self.width = field_width(&self.options, &self.placeholder);
        }
        self.refilter();
        self.relayout();
    }

    fn handle_pointer(&mut self, x: u16, y: u16) -> Vec<SelectEvent> {
        let mut out = Vec::new();

        // Toggle sits inside the field row, so test it first.
        if self.layout.toggle.contains(x, y) {
            if self.is_open() {
                self.set_open(false, &mut out);
            } else {
                self.set_open(true, &mut out);
                if !self.focused {
                    self.focused = true;
                    out.push(SelectEvent::FocusRequested);
                }
            }
            self.relayout();
        } else if self.layout.field.contains(x, y) {
            if !self.focused {
                self.focused = true;
                out.push(SelectEvent::FocusRequested);
            }
            self.set_open(true, &mut out);
            self.relayout();
        } else if self.is_open() {
            if let Some(row) = self.layout.row_at(x, y) {
                let picked = self
                    .filtered
                    .get(row)
                    .and_then(|&i| self.options.get(i))
                    .cloned();
                if let Some(label) = picked {
                    return self.commit(label);
                }
            }
            // Pointer outside the widget entirely: the document-level
            // watcher owns that transition, not the instance.
        }

        out
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Vec<SelectEvent> {
        if !self.focused {
            return Vec::new();
        }

        let mut out = Vec::new();
        match key {
            Key::Escape => {
                if self.is_open() {
                    self.set_open(false, &mut out);
                    self.relayout();
                }
            }

            Key::Enter => {
                // First-in-filtered-order wins, independent of any cursor.
                let first = self
                    .filtered
                    .first()
                    .and_then(|&i| self.options.get(i))
                    .cloned();
                if let Some(label) = first {
                    return self.commit(label);
                }
                // No candidates: strict no-op. The current text has already
                // been delivered through the change handler keystroke by
                // keystroke, so there is nothing left to commit.
            }

            _ => match self.input.handle_key(key, modifiers) {
                TextEditResult::Changed => {
                    self.refilter();
                    self.set_open(true, &mut out);
                    self.relayout();
                    let text = self.input.text().to_string();
                    self.notify(&text);
                    out.push(SelectEvent::Changed { text });
                }
                // Enter is intercepted above before it can reach the input.
                TextEditResult::Submitted => {}
                TextEditResult::Handled | TextEditResult::Ignored => {}
            },
        }

        out
    }

    /// Shared tail of both commit paths: adopt the label, close, release
    /// focus, notify. State is updated and re-derived before the handler
    /// sees the new value.
    fn commit(&mut self, label: String) -> Vec<SelectEvent> {
        log::debug!("[select] {}: commit {label:?}", self.id);

        let mut out = Vec::new();
        self.input.set_text(label.clone());
        self.refilter();
        self.set_open(false, &mut out);
        if self.focused {
            self.focused = false;
            out.push(SelectEvent::FocusReleased);
        }
        self.relayout();
        self.notify(&label);
        out.push(SelectEvent::Committed { label });
        out
    }

    fn set_open(&mut self, open: bool, out: &mut Vec<SelectEvent>) {
        if self.open.swap(open, Ordering::SeqCst) != open {
            log::debug!("[select] {}: open={open}", self.id);
            out.push(if open {
                SelectEvent::Opened
            } else {
                SelectEvent::Closed
            });
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(self.policy.as_ref(), &self.options, self.input.text());
    }

    /// Recompute screen regions and publish the bounds to the watcher.
    /// Candidate rows exist only while the list is open and non-empty.
    fn relayout(&mut self) {
        let rows = if self.is_open() {
            self.filtered.len()
        } else {
            0
        };
        let (x, y) = self.origin;
        self.layout = SelectLayout::compute(x, y, self.width, rows);

        let mut region = self.region.lock().unwrap_or_else(PoisonError::into_inner);
        *region = self.layout.bounds;
    }

    fn notify(&self, text: &str) {
        match &self.on_change {
            Some(handler) => handler(text),
            None => log::debug!("[select] {}: change dropped, no handler", self.id),
        }
    }
}
