//! SASL XOAUTH2 authentication strings.
//!
//! Mail clients consume the output directly: the base64 form as an
//! `AUTHENTICATE XOAUTH2` initial response, the plain form for inspection
//! while testing IMAP/SMTP logins.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Generates an XOAUTH2 authorization string.
///
/// Format: `user=<user>\nauth=Bearer <token>\n\n`, base64 encoded unless
/// `plain` is set.
///
/// # Arguments
///
/// * `user` - User email address
/// * `access_token` - `OAuth2` access token
/// * `plain` - Return the raw text instead of base64
///
/// # Example
///
/// ```
/// use muttoauth_oauth::sasl::xoauth2_string;
///
/// let plain = xoauth2_string("user@example.com", "ya29.a0", true);
/// assert_eq!(plain, "user=user@example.com\nauth=Bearer ya29.a0\n\n");
/// ```
#[must_use]
pub fn xoauth2_string(user: &str, access_token: &str, plain: bool) -> String {
    let auth_string = format!("user={user}\nauth=Bearer {access_token}\n\n");
    if plain {
        return auth_string;
    }
    STANDARD.encode(auth_string.as_bytes())
}
