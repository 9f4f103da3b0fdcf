pub mod complete;
pub mod dispatch;
pub mod history;
pub mod note;
pub mod report;
pub mod shared;
pub mod spin;
pub mod stats;
pub mod task;
