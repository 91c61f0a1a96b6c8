mod in_memory;
pub use in_memory::*;

mod redis;
pub use redis::*;
