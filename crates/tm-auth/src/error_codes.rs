//! Authentication error codes, in the hosted provider's format.

/// Sign-up with an email that already has an account
pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";

/// Malformed email address
pub const INVALID_EMAIL: &str = "auth/invalid-email";

/// Password shorter than the provider minimum
pub const WEAK_PASSWORD: &str = "auth/weak-password";

/// No account for this email
pub const USER_NOT_FOUND: &str = "auth/user-not-found";

/// Password does not match
pub const WRONG_PASSWORD: &str = "auth/wrong-password";

/// Email/password pair rejected without saying which part
pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";

/// Provider unreachable
pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";

/// ID token failed verification
pub const INVALID_ID_TOKEN: &str = "auth/invalid-id-token";

/// ID token past its expiry
pub const ID_TOKEN_EXPIRED: &str = "auth/id-token-expired";

/// Token could not be produced
pub const INTERNAL_ERROR: &str = "auth/internal-error";
