//! Context Store Adapters.
//!
//! Implementations of the ContextStore port.

mod in_memory_store;

pub use in_memory_store::InMemoryContextStore;
