//! Entity structs for the spinner's two persisted collections.
//!
//! Each entity maps to a table in the libSQL database (`tasks`, `spin_history`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON output
//! and schema validation.

mod spin;
mod task;

pub use spin::{SpinHistoryEntry, SpinRecord};
pub use task::{
    DEFAULT_CATEGORY, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, Task, normalize_category,
    normalize_task_name,
};
