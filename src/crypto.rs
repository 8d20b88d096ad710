//! WPA2 key derivation chain.
//!
//! Implements the three derivation stages that turn a passphrase guess plus
//! handshake metadata into a comparable authentication tag:
//!
//! - Master key (PMK): PBKDF2-HMAC-SHA1 over the passphrase, salted by the SSID
//! - Pairwise transient key (PTK): iterated HMAC-SHA1 expansion (PRF-512)
//!   keyed by the master key
//! - Tag (MIC): truncated HMAC-SHA1 over the EAPOL frame, keyed by the first
//!   16 bytes of the pairwise key
//!
//! All functions are deterministic and hold no state. Fixed-length inputs are
//! enforced through array types, so a malformed MAC address or nonce cannot
//! reach this module; see `schema::handshake` for the validation boundary.

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// PBKDF2 iteration count mandated by the WPA2 passphrase mapping.
pub const PBKDF2_ROUNDS: u32 = 4096;

/// Master key (PMK) length in bytes.
pub const MASTER_KEY_LEN: usize = 32;

/// Pairwise transient key (PTK) length in bytes.
pub const PAIRWISE_KEY_LEN: usize = 64;

/// Authentication tag (MIC) length in bytes.
pub const TAG_LEN: usize = 16;

/// Label fed into the pairwise key expansion.
const PAIRWISE_LABEL: &[u8] = b"Pairwise key expansion";

/// Errors from the derivation chain.
///
/// The RustCrypto primitives report key-length problems through
/// `InvalidLength`; with the fixed-size inputs used here none of these can
/// fire in practice, but they are propagated rather than swallowed so an
/// evaluation failure stays distinguishable from a poor match.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("keyed-hash initialization failed: {0}")]
    InvalidKey(#[from] hmac::digest::InvalidLength),
}

/// Derive the 32-byte master key (PMK) from a passphrase and SSID.
///
/// PMK = PBKDF2-HMAC-SHA1(passphrase, ssid, 4096 rounds, 32 bytes).
/// This is by far the most expensive step of scoring a candidate: each call
/// costs 4096 HMAC-SHA1 invocations per 20-byte output block.
pub fn derive_master_key(
    passphrase: &str,
    ssid: &[u8],
) -> Result<[u8; MASTER_KEY_LEN], CryptoError> {
    let mut master_key = [0u8; MASTER_KEY_LEN];
    pbkdf2::pbkdf2::<HmacSha1>(passphrase.as_bytes(), ssid, PBKDF2_ROUNDS, &mut master_key)?;
    Ok(master_key)
}

/// PRF expansion: successive HMAC-SHA1 blocks over
/// `label || 0x00 || context || counter`, counter starting at 0 and
/// incrementing per block, accumulated until 64 bytes are available and then
/// truncated to exactly 64.
///
/// Downstream key material is sliced at fixed offsets, so the 64-byte output
/// length is a hard invariant for any valid inputs.
pub fn expand_transient_key(
    master_key: &[u8],
    label: &[u8],
    context: &[u8],
) -> Result<[u8; PAIRWISE_KEY_LEN], CryptoError> {
    let mut out = [0u8; PAIRWISE_KEY_LEN];
    let mut written = 0;
    let mut counter = 0u8;

    while written < PAIRWISE_KEY_LEN {
        let mut mac = HmacSha1::new_from_slice(master_key)?;
        mac.update(label);
        mac.update(&[0x00]);
        mac.update(context);
        mac.update(&[counter]);
        let block = mac.finalize().into_bytes();

        let take = block.len().min(PAIRWISE_KEY_LEN - written);
        out[written..written + take].copy_from_slice(&block[..take]);
        written += take;
        counter += 1;
    }

    Ok(out)
}

/// Derive the 64-byte pairwise transient key (PTK).
///
/// The expansion context is `min(mac) || max(mac) || min(nonce) || max(nonce)`
/// with the MAC pair and the nonce pair each ordered lexicographically. The
/// canonical ordering makes the derivation symmetric: swapping the AP and
/// client roles (addresses together with their nonces) yields the same key.
pub fn derive_pairwise_key(
    master_key: &[u8; MASTER_KEY_LEN],
    ap_mac: &[u8; 6],
    client_mac: &[u8; 6],
    anonce: &[u8; 32],
    snonce: &[u8; 32],
) -> Result<[u8; PAIRWISE_KEY_LEN], CryptoError> {
    let mut context = [0u8; 76]; // 6 + 6 + 32 + 32

    let (low_mac, high_mac) = if ap_mac <= client_mac {
        (ap_mac, client_mac)
    } else {
        (client_mac, ap_mac)
    };
    let (low_nonce, high_nonce) = if anonce <= snonce {
        (anonce, snonce)
    } else {
        (snonce, anonce)
    };

    context[..6].copy_from_slice(low_mac);
    context[6..12].copy_from_slice(high_mac);
    context[12..44].copy_from_slice(low_nonce);
    context[44..76].copy_from_slice(high_nonce);

    expand_transient_key(master_key, PAIRWISE_LABEL, &context)
}

/// Compute the 16-byte authentication tag (MIC) over an EAPOL frame.
///
/// The confirmation key (KCK) is the first 16 bytes of the pairwise key; the
/// tag is HMAC-SHA1 over the frame, truncated to 16 bytes. The frame must
/// carry zeros in its tag field, matching how the captured tag was extracted.
pub fn compute_tag(
    pairwise_key: &[u8; PAIRWISE_KEY_LEN],
    frame: &[u8],
) -> Result<[u8; TAG_LEN], CryptoError> {
    let mut mac = HmacSha1::new_from_slice(&pairwise_key[..TAG_LEN])?;
    mac.update(frame);
    let digest = mac.finalize().into_bytes();

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&digest[..TAG_LEN]);
    Ok(tag)
}
