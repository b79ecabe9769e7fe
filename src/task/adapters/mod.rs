//! Adapter implementations of the task repository port.

pub mod key_value;
pub mod memory;

pub use key_value::KeyValueTaskRepository;
pub use memory::InMemoryTaskRepository;
