pub mod event;
pub mod filter;
pub mod focus;
pub mod layout;
pub mod outside;
pub mod select;
pub mod text_input;

pub use event::{Event, Key, Modifiers, MouseButton};
pub use filter::{filter_indices, FuzzyPolicy, MatchPolicy, SubstringPolicy};
pub use focus::FocusState;
pub use layout::{Rect, SelectLayout};
pub use outside::{OutsideGuard, OutsideWatcher};
pub use select::{ChangeHandler, CreatableSelect, MountedSelect, SelectEvent};
pub use text_input::{TextEditResult, TextInput};
