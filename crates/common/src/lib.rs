/**
 * Ed25519 key material, addresses and
 *  detached signatures in their text form.
 */
pub mod crypto;
/**
 * The archive a value is stored in, and the
 *  signed frame that carries it to a shard.
 */
pub mod envelope;
/**
 * Sixteen-way shard ring keyed by the leading
 *  hex digit of a public key.
 */
pub mod shard;
/**
 * Client facade: replicated writes, verified reads,
 *  and the transport seam underneath them.
 */
pub mod client;
pub mod testkit;

pub mod prelude {
    pub use crate::client::{Client, ClientError, HttpTransport, Transport, WriteReceipt};
    pub use crate::crypto::{
        generate_key_pair, generate_signature, verify_signature, Address, PublicKey, SecretKey,
    };
    pub use crate::envelope::{Envelope, Frame};
    pub use crate::shard::{next_shard, Shard};
}
