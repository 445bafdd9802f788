pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Address, Init, Keygen, Read, Shard, Sign, Verify, Version, Write};
