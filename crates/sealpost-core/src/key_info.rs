//! Recipient key metadata.
//!
//! [`KeyInfo`] is the read-only view of a parsed public key the page shows to
//! the user. It is created once per successful key load and replaced wholesale
//! on the next one, never mutated in place.

/// Derived, read-only view of a parsed recipient public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    /// Raw fingerprint bytes.
    pub fingerprint: Vec<u8>,
    /// Primary user identity, conventionally `Name <email>`.
    pub user_id: String,
    /// Algorithm family name as reported by the capability (e.g. `rsa`).
    pub algorithm: String,
    /// Key size in bits, when the algorithm has one.
    pub bits: Option<u32>,
    /// Algorithm identifier of the primary key packet.
    pub raw_algorithm: String,
}

impl KeyInfo {
    /// Uppercase hex fingerprint in space-separated groups of four.
    pub fn fingerprint_hex(&self) -> String {
        let hex = hex::encode_upper(&self.fingerprint);
        let groups: Vec<&str> = hex
            .as_bytes()
            .chunks(4)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok())
            .collect();
        groups.join(" ")
    }

    /// Last four groups of [`Self::fingerprint_hex`].
    pub fn fingerprint_short(&self) -> String {
        let full = self.fingerprint_hex();
        let groups: Vec<&str> = full.split(' ').collect();
        groups[groups.len().saturating_sub(4)..].join(" ")
    }

    /// Algorithm name followed by the bit length when known.
    pub fn algorithm_label(&self) -> String {
        match self.bits {
            Some(bits) if bits > 0 => format!("{} {bits}", self.algorithm),
            _ => self.algorithm.clone(),
        }
    }

    /// Uppercased [`Self::algorithm_label`], shown as a badge.
    pub fn algorithm_badge(&self) -> String {
        self.algorithm_label().to_uppercase()
    }

    /// Label plus the raw packet algorithm, shown in the details panel.
    pub fn algorithm_detail(&self) -> String {
        format!("{} ({})", self.algorithm_label(), self.raw_algorithm)
    }

    /// Email address taken from the identity's `<...>` bracket.
    ///
    /// Empty when the identity carries no bracketed address.
    pub fn recipient_email(&self) -> &str {
        bracketed_email(&self.user_id).unwrap_or("")
    }
}

/// First non-empty `<...>` segment of `identity`.
fn bracketed_email(identity: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(open) = identity[offset..].find('<') {
        let start = offset + open + 1;
        let close = identity[start..].find('>')?;
        if close > 0 {
            return Some(&identity[start..start + close]);
        }
        offset = start;
    }
    None
}
