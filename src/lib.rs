//! Decision task for pull requests — builds one CI task description and
//! submits it to the queue service.

pub mod config;
pub mod error;
pub mod queue;
pub mod slug;
pub mod task;
