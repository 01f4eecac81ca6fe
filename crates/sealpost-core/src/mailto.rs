//! Outbound mail composition.

use crate::KeyInfo;

/// Fixed subject of every composed mail.
pub const MAIL_SUBJECT: &str = "Encrypted Message";

/// A `mailto:` link carrying the ciphertext as its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    /// Recipient address, inserted as-is. May be empty.
    pub recipient: String,
    /// Mail subject.
    pub subject: String,
    /// Mail body.
    pub body: String,
}

impl MailtoLink {
    /// Link addressed to the key's bracketed email with the fixed subject.
    pub fn for_ciphertext(key: &KeyInfo, ciphertext: &str) -> Self {
        Self {
            recipient: key.recipient_email().to_string(),
            subject: MAIL_SUBJECT.to_string(),
            body: ciphertext.to_string(),
        }
    }

    /// Render the `mailto:` URI with percent-encoded subject and body.
    pub fn to_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(user_id: &str) -> KeyInfo {
        KeyInfo {
            fingerprint: vec![0; 20],
            user_id: user_id.to_string(),
            algorithm: "rsa".into(),
            bits: Some(2048),
            raw_algorithm: "RSA".into(),
        }
    }

    #[test]
    fn uri_encodes_subject_and_body() {
        let link = MailtoLink::for_ciphertext(&key("Alice <alice@example.com>"), "a b\nc=d&e");
        insta::assert_snapshot!(
            link.to_uri(),
            @"mailto:alice@example.com?subject=Encrypted%20Message&body=a%20b%0Ac%3Dd%26e"
        );
    }

    #[test]
    fn missing_email_gives_empty_recipient() {
        let link = MailtoLink::for_ciphertext(&key("Alice"), "x");
        assert_eq!(link.recipient, "");
        assert!(link.to_uri().starts_with("mailto:?subject="));
    }
}
