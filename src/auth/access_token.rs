/// Access Token Issuance
///
/// Opaque bearer tokens: 128 random bytes rendered as hex. No structure,
/// no expiry, no embedded claims. Issued once at signup and bound to the
/// account for its lifetime.

use rand::{thread_rng, RngCore};

const TOKEN_BYTES: usize = 128;

/// Generate a new opaque access token
///
/// Draws 128 bytes from the thread-local CSPRNG and renders them as
/// lowercase hex (256 characters). Guessing or colliding is
/// computationally infeasible at this entropy.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
