// ===============================
// src/kyc.rs
// ===============================
//
// Stub KYC page: input format checks and fake document uploads.
//
use ahash::AHashMap as HashMap;

use crate::domain::{KycField, UploadState};

/// PAN: AAAAA9999A, IFSC: AAAA0XXXXXX (both case-insensitive).
/// Numeric fields: empty is fine, otherwise must be a finite number.
pub fn validate(field: KycField, value: &str) -> bool {
    let up = value.trim().to_ascii_uppercase();
    let b = up.as_bytes();
    match field {
        KycField::Number => up.is_empty() || up.parse::<f64>().map(f64::is_finite).unwrap_or(false),
        KycField::Pan => {
            b.len() == 10
                && b[..5].iter().all(u8::is_ascii_uppercase)
                && b[5..9].iter().all(u8::is_ascii_digit)
                && b[9].is_ascii_uppercase()
        }
        KycField::Ifsc => {
            b.len() == 11
                && b[..4].iter().all(u8::is_ascii_uppercase)
                && b[4] == b'0'
                && b[5..].iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        }
    }
}

/// Upload slots. A slot can be started once; the button stays disabled after.
#[derive(Default)]
pub struct UploadDesk {
    slots: HashMap<String, UploadState>,
}

impl UploadDesk {
    /// `false` when the slot is already uploading or uploaded.
    pub fn begin(&mut self, slot: &str) -> bool {
        if self.slots.contains_key(slot) {
            return false;
        }
        self.slots.insert(slot.to_string(), UploadState::Uploading);
        true
    }

    pub fn complete(&mut self, slot: &str) -> bool {
        match self.slots.get_mut(slot) {
            Some(state) if *state == UploadState::Uploading => {
                *state = UploadState::Uploaded;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn state(&self, slot: &str) -> Option<UploadState> {
        self.slots.get(slot).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_format() {
        assert!(validate(KycField::Pan, "ABCDE1234F"));
        assert!(validate(KycField::Pan, "abcde1234f"));
        assert!(!validate(KycField::Pan, "ABCD1234F"));
        assert!(!validate(KycField::Pan, "ABCDE12345"));
        assert!(!validate(KycField::Pan, ""));
    }

    #[test]
    fn ifsc_format() {
        assert!(validate(KycField::Ifsc, "SBIN0001234"));
        assert!(validate(KycField::Ifsc, "hdfc0ab12cd"));
        assert!(!validate(KycField::Ifsc, "SBIN1001234"));
        assert!(!validate(KycField::Ifsc, "SBI00001234"));
    }

    #[test]
    fn numeric_fields() {
        assert!(validate(KycField::Number, ""));
        assert!(validate(KycField::Number, "42.5"));
        assert!(!validate(KycField::Number, "4x"));
        assert!(!validate(KycField::Number, "NaN"));
    }

    #[test]
    fn upload_runs_once() {
        let mut d = UploadDesk::default();
        assert!(!d.complete("pan"));
        assert!(d.begin("pan"));
        assert!(!d.begin("pan"));
        assert_eq!(d.state("pan"), Some(UploadState::Uploading));
        assert!(d.complete("pan"));
        assert!(!d.complete("pan"));
        assert!(!d.begin("pan"));
        assert_eq!(d.state("pan"), Some(UploadState::Uploaded));
    }
}
