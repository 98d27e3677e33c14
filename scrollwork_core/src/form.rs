// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact form validation and `mailto:` composition.
//!
//! There is no form backend: a valid submission becomes a `mailto:` URI with
//! URL-encoded subject and body, and the browser is redirected to it. The
//! two failure modes are missing fields and a malformed email address, both
//! reported through inline banners that auto-expire after [`BANNER_TTL`].

use alloc::format;
use alloc::string::String;

use crate::time::Duration;

/// The fixed recipient for composed messages.
pub const RECIPIENT: &str = "joinvkc@gmail.com";

/// How long a status banner stays visible before self-clearing.
pub const BANNER_TTL: Duration = Duration::from_millis(10_000);

/// Banner shown after a successful redirect to the mail client.
pub const SUCCESS_BANNER: &str = "Your email client has been opened. Please send the email from \
     there. If it didn't open automatically, please email directly to joinvkc@gmail.com";

/// Banner shown when the redirect fails for any reason.
pub const FALLBACK_BANNER: &str =
    "There was an error opening your email client. Please email directly to joinvkc@gmail.com";

/// Why a submission was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormError {
    /// One or more required fields is empty.
    EmptyField,
    /// The email address does not have the shape `local@domain.tld`.
    InvalidEmail,
}

impl FormError {
    /// The banner text for this rejection.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::EmptyField => "Please fill in all fields.",
            Self::InvalidEmail => "Please enter a valid email address.",
        }
    }
}

impl core::fmt::Display for FormError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.banner())
    }
}

impl core::error::Error for FormError {}

/// The four required fields of a contact submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Message subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactSubmission {
    /// Checks that all fields are present and the email is plausibly shaped.
    ///
    /// Field presence is checked before email shape, so an empty email
    /// reports [`FormError::EmptyField`].
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.subject.is_empty()
            || self.message.is_empty()
        {
            return Err(FormError::EmptyField);
        }
        if !email_shape_ok(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Validates and composes the `mailto:` URI for this submission.
    ///
    /// The subject is prefixed with `Portfolio Contact:` and the body lists
    /// the sender's details above the message; both are percent-encoded.
    pub fn mailto(&self, recipient: &str) -> Result<String, FormError> {
        self.validate()?;

        let subject = format!("Portfolio Contact: {}", self.subject);
        let body = format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
            self.name, self.email, self.subject, self.message,
        );
        Ok(format!(
            "mailto:{recipient}?subject={}&body={}",
            urlencoding::encode(&subject),
            urlencoding::encode(&body),
        ))
    }
}

/// Whether `email` looks like `local@domain.tld`.
///
/// This is the same permissive shape check the page has always applied: no
/// whitespace, exactly one `@` with a non-empty local part, and a dot in the
/// domain with at least one character on each side. It is a typo guard, not
/// an RFC 5321 validator.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            subject: "x".to_string(),
            message: "y".to_string(),
        }
    }

    #[test]
    fn missing_field_rejects_without_composing() {
        let s = ContactSubmission {
            name: String::new(),
            ..submission()
        };
        assert_eq!(s.validate(), Err(FormError::EmptyField));
        assert_eq!(s.mailto(RECIPIENT), Err(FormError::EmptyField));
        assert_eq!(FormError::EmptyField.banner(), "Please fill in all fields.");
    }

    #[test]
    fn malformed_email_rejects() {
        let s = ContactSubmission {
            email: "not-an-email".to_string(),
            ..submission()
        };
        assert_eq!(s.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn email_shapes() {
        assert!(email_shape_ok("a@b.com"));
        assert!(email_shape_ok("first.last@sub.domain.org"));
        assert!(!email_shape_ok("a b@c.com"));
        assert!(!email_shape_ok("@b.com"));
        assert!(!email_shape_ok("a@b"));
        assert!(!email_shape_ok("a@b."));
        assert!(!email_shape_ok("a@.com@x"));
        assert!(!email_shape_ok(""));
    }

    #[test]
    fn valid_submission_composes_encoded_mailto() {
        let s = ContactSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello there".to_string(),
            message: "Line one\nLine two".to_string(),
        };
        let uri = s.mailto(RECIPIENT).unwrap();

        assert!(uri.starts_with("mailto:joinvkc@gmail.com?subject="));
        assert!(uri.contains("subject=Portfolio%20Contact%3A%20Hello%20there"));
        // Newlines in the body are percent-encoded.
        assert!(uri.contains("Line%20one%0ALine%20two"));
        assert!(uri.contains("Name%3A%20Ada%20Lovelace"));
        // Nothing raw leaks through.
        assert!(!uri.contains(' '));
        assert!(!uri.contains('\n'));
    }
}
