//! Rules for accepting an uploaded image.
//!
//! Only the file name and the leading bytes are inspected. The size ceiling is
//! enforced by the body-limit layer before a handler ever sees the upload.

use super::error::DomainError;

pub(crate) const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const JPEG_SIGNATURE: &[u8] = &[0xff, 0xd8, 0xff];
const GIF87_SIGNATURE: &[u8] = b"GIF87a";
const GIF89_SIGNATURE: &[u8] = b"GIF89a";

/// Lowercased suffix after the last `.`, if any.
pub(crate) fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

pub(crate) fn is_valid_extension(filename: &str) -> bool {
    extension_of(filename)
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduces a client-supplied name to something safe to use as a file name.
///
/// Directory components are dropped, whitespace becomes `_` and anything that
/// is not ASCII alphanumeric, `.`, `-` or `_` is removed. Returns `None` when
/// nothing usable is left.
pub(crate) fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

pub(crate) fn matches_magic_bytes(extension: &str, bytes: &[u8]) -> bool {
    match extension {
        "png" => bytes.starts_with(PNG_SIGNATURE),
        "jpg" | "jpeg" => bytes.starts_with(JPEG_SIGNATURE),
        "gif" => bytes.starts_with(GIF87_SIGNATURE) || bytes.starts_with(GIF89_SIGNATURE),
        _ => false,
    }
}

/// Runs every upload rule and returns the sanitized name to store under.
pub(crate) fn validate_image(filename: &str, bytes: &[u8]) -> Result<String, DomainError> {
    if !is_valid_extension(filename) {
        return Err(DomainError::Validation {
            field: "image",
            message: "allowed extensions are png, jpg, jpeg, gif",
        });
    }

    let sanitized = sanitize_filename(filename)
        .filter(|name| is_valid_extension(name))
        .ok_or(DomainError::Validation {
            field: "image",
            message: "file name is not usable",
        })?;

    let extension = extension_of(&sanitized).unwrap_or_default();
    if !matches_magic_bytes(&extension, bytes) {
        return Err(DomainError::Validation {
            field: "image",
            message: "file content does not match its extension",
        });
    }

    Ok(sanitized)
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub(crate) const TINY_PNG: &[u8] = &[
        0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0, 0, 0, 0x0d, b'I', b'H', b'D', b'R',
    ];
}
