//! User storage backends.
//!
//! Only the in-memory backend exists today. Other backends plug in by
//! implementing [`usergraph_core::UserDataAccess`] and
//! [`usergraph_core::DataAccessProvider`] and mapping their failures to
//! [`usergraph_core::DataAccessError`].

pub mod memory;

pub use memory::{MemoryDataSource, MemoryUserAccess, UserStore};
