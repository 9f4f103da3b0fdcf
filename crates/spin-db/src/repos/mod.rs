//! Repository methods on `SpinService`, one module per collection plus the
//! aggregate statistics queries.

pub mod spin;
pub mod stats;
pub mod task;
