//! Fetch sequencing
//!
//! A fetch is a small state machine (`RetryMachine`) driven on a worker
//! thread (`FetchTask`). The task reports progress as `FetchEvent`s and
//! always ends with a displayable quote unless it is aborted.

pub mod machine;
pub mod policy;
pub mod task;

pub use machine::{FetchState, RetryMachine, Transition};
pub use policy::RetryPolicy;
pub use task::{FetchEvent, FetchHandle, FetchTask, FetchUpdate};
