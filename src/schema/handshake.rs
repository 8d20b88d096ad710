//! Captured 4-way handshake descriptor.
//!
//! The descriptor is the immutable input boundary of the search: whatever
//! extracts handshake fields from a wireless capture produces one of these,
//! and the search core only ever reads it. Construction is the single place
//! where malformed field lengths can surface, so a descriptor that exists is
//! safe to hand to the derivation chain for the whole run.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::{self, CryptoError};

/// Immutable handshake metadata extracted from a capture.
///
/// `eapol_frame` must carry zeros in its tag field, consistent with how
/// `real_mic` was cut out of the captured frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeDescriptor {
    /// Network SSID (salt of the master-key derivation).
    pub ssid: Vec<u8>,
    /// AP MAC address (BSSID).
    pub ap_mac: [u8; 6],
    /// Client/station MAC address.
    pub client_mac: [u8; 6],
    /// Authenticator nonce.
    pub anonce: [u8; 32],
    /// Supplicant nonce.
    pub snonce: [u8; 32],
    /// EAPOL frame with the tag field zeroed.
    pub eapol_frame: Vec<u8>,
    /// Authentication tag captured from the handshake.
    pub real_mic: [u8; 16],
}

/// Descriptor construction and persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("Handshake field {field} must be {expected} bytes, got {actual}")]
    MalformedField {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("SSID must not be empty")]
    EmptySsid,
    #[error("EAPOL frame must not be empty")]
    EmptyEapolFrame,
    #[error("Handshake file access failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Handshake JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N], HandshakeError> {
    bytes
        .try_into()
        .map_err(|_| HandshakeError::MalformedField {
            field,
            expected: N,
            actual: bytes.len(),
        })
}

impl HandshakeDescriptor {
    /// Build a descriptor from raw byte fields, rejecting wrong-length
    /// components instead of truncating or padding them.
    pub fn from_parts(
        ssid: &[u8],
        ap_mac: &[u8],
        client_mac: &[u8],
        anonce: &[u8],
        snonce: &[u8],
        eapol_frame: &[u8],
        real_mic: &[u8],
    ) -> Result<Self, HandshakeError> {
        let descriptor = Self {
            ssid: ssid.to_vec(),
            ap_mac: fixed("ap_mac", ap_mac)?,
            client_mac: fixed("client_mac", client_mac)?,
            anonce: fixed("anonce", anonce)?,
            snonce: fixed("snonce", snonce)?,
            eapol_frame: eapol_frame.to_vec(),
            real_mic: fixed("real_mic", real_mic)?,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check the variable-length fields. The fixed-length fields are already
    /// guaranteed by their types.
    pub fn validate(&self) -> Result<(), HandshakeError> {
        if self.ssid.is_empty() {
            return Err(HandshakeError::EmptySsid);
        }
        if self.eapol_frame.is_empty() {
            return Err(HandshakeError::EmptyEapolFrame);
        }
        Ok(())
    }

    /// Build a descriptor whose captured tag was computed from a known
    /// passphrase. Useful for exercising the search end to end without a
    /// real capture.
    pub fn synthesize(
        passphrase: &str,
        ssid: &[u8],
        ap_mac: [u8; 6],
        client_mac: [u8; 6],
        anonce: [u8; 32],
        snonce: [u8; 32],
        eapol_frame: Vec<u8>,
    ) -> Result<Self, HandshakeError> {
        let master_key = crypto::derive_master_key(passphrase, ssid)?;
        let pairwise_key =
            crypto::derive_pairwise_key(&master_key, &ap_mac, &client_mac, &anonce, &snonce)?;
        let real_mic = crypto::compute_tag(&pairwise_key, &eapol_frame)?;

        let descriptor = Self {
            ssid: ssid.to_vec(),
            ap_mac,
            client_mac,
            anonce,
            snonce,
            eapol_frame,
            real_mic,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Save the descriptor as pretty JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<(), HandshakeError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a descriptor from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, HandshakeError> {
        let json = std::fs::read_to_string(path)?;
        let descriptor: Self = serde_json::from_str(&json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// SSID as text for display purposes.
    pub fn ssid_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.ssid)
    }
}

/// Format a MAC address in the usual colon-separated form.
pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}
