//! Client-side form checks applied before any network call.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is valid")
});

/// True when `email` looks like `local@domain`.
///
/// The local part is a dot-separated atom or a quoted string; the domain is
/// either a bracketed IPv4 literal or a host name ending in a TLD of at least
/// two letters.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// True when `password` has at least [`MIN_PASSWORD_LEN`] characters.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}
