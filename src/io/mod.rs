pub mod recovery;
pub mod store;

pub use store::{StoreError, TaskStore};
