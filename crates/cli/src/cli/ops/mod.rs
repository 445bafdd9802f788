pub mod address;
pub mod init;
pub mod keygen;
pub mod read;
pub mod shard;
pub mod sign;
pub mod verify;
pub mod version;
pub mod write;

pub use address::Address;
pub use init::Init;
pub use keygen::Keygen;
pub use read::Read;
pub use shard::Shard;
pub use sign::Sign;
pub use verify::Verify;
pub use version::Version;
pub use write::Write;
