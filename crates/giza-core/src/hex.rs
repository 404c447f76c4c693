//! # Hex Encoding Utilities
//!
//! Hand-rolled lowercase hex encode/decode — no external hex crate
//! dependency. Field elements, compressed keys, and commitment hashes all
//! cross module boundaries as fixed-width hex strings, so the decoder
//! offers an exact-width variant that rejects truncated or padded input
//! before it reaches any cryptographic code.

/// Render bytes as a lowercase hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a hex string into bytes. Accepts upper- or lowercase, rejects
/// odd-length and non-hex input.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, String> {
    let hex = hex.trim();
    // Reject non-ASCII before slicing: byte offsets into multi-byte
    // UTF-8 are not char boundaries.
    if !hex.is_ascii() {
        return Err("hex string contains non-ASCII characters".to_string());
    }
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

/// Parse a hex string that must decode to exactly `len` bytes.
pub fn decode_hex_exact(hex: &str, len: usize) -> Result<Vec<u8>, String> {
    let bytes = decode_hex(hex)?;
    if bytes.len() != len {
        return Err(format!(
            "expected {} hex chars ({len} bytes), got {} chars",
            len * 2,
            hex.trim().len()
        ));
    }
    Ok(bytes)
}
