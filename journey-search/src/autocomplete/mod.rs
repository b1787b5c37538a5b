//! Station autocomplete.
//!
//! Keystrokes are debounced, the settled query is ranked against the
//! catalog, and the resulting candidates are offered in a list whose
//! open/close behaviour is an explicit state machine. Selections are
//! requested from the owning form rather than written directly.

mod binding;
mod config;
mod dropdown;
mod field;
mod matcher;
mod timer;

pub use binding::SelectionBinding;
pub use config::AutocompleteConfig;
pub use dropdown::{Dropdown, DropdownState};
pub use field::{FieldEvent, StationField};
pub use matcher::{MAX_CANDIDATES, ScoredCandidate, match_stations, search};
pub use timer::ScheduledTask;
