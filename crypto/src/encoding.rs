//! Hex codecs for keys and signatures.
//!
//! Votes arrive over HTTP with `public_key` and `signature` as hex strings.
//! Decoding is strict about length but accepts either letter case.

use votechain_types::{PrivateKey, PublicKey, Signature};

use crate::CryptoError;

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CryptoError> {
    let bytes = hex::decode(s.trim()).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidLength { expected: N, actual })
}

pub fn public_key_from_hex(s: &str) -> Result<PublicKey, CryptoError> {
    decode_fixed::<32>(s).map(PublicKey)
}

pub fn signature_from_hex(s: &str) -> Result<Signature, CryptoError> {
    decode_fixed::<64>(s).map(Signature)
}

pub fn private_key_from_hex(s: &str) -> Result<PrivateKey, CryptoError> {
    decode_fixed::<32>(s).map(PrivateKey)
}
