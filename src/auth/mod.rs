/// Authentication module
///
/// Handles password hashing, opaque access token issuance,
/// and token-based account lookup.

mod access_token;
mod authenticator;
mod password;

pub use access_token::generate_access_token;
pub use authenticator::authenticate;
pub use authenticator::AuthenticatedUser;
pub use password::hash_password;
pub use password::verify_password;
