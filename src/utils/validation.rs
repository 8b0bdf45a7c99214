/// Expected length of a lowercase hex SHA-256 digest.
pub const OID_LENGTH: usize = 64;

/// Validates that an oid is a lowercase hexadecimal SHA-256 digest.
///
/// Every oid is used as a filesystem name under the storage root, so this
/// check must run before any path is built from client input. Rejects
/// uppercase hex to keep canonical names unique.
pub fn validate_oid(oid: &str) -> Result<(), String> {
    if oid.len() != OID_LENGTH {
        return Err(format!(
            "oid must be {} characters, got {}",
            OID_LENGTH,
            oid.len()
        ));
    }

    if !oid
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err("oid must be lowercase hexadecimal".to_string());
    }

    Ok(())
}
