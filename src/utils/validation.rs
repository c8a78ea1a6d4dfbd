use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use std::path::Path;

/// Maximum whole-number digits of a price (10 digits total, 2 fractional).
pub const PRICE_MAX_WHOLE_DIGITS: u32 = 8;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates upload size against maximum limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(anyhow!(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                size, max_size
            ),
        }));
    }
    Ok(())
}

/// Sniffs the content and returns its MIME type if it is a raster image.
pub fn validate_image(data: &[u8]) -> Result<mime::Mime> {
    if data.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "EMPTY_FILE",
            message: "File appears to be empty".to_string(),
        }));
    }

    let detected = infer::get(data)
        .and_then(|kind| kind.mime_type().parse::<mime::Mime>().ok())
        .filter(|m| m.type_() == mime::IMAGE);

    detected.ok_or_else(|| {
        anyhow!(ValidationError {
            code: "NOT_AN_IMAGE",
            message: "Upload a valid image. The file is either not an image or corrupted."
                .to_string(),
        })
    })
}

/// Reduces a client-supplied filename to something safe to embed in a storage key.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    // Windows clients send full paths
    let base = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let name = Path::new(base)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        }));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path components stripped from upload name: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c.is_whitespace()
                || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';' | '#' | '%')
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    let sanitized = sanitized.trim_start_matches('.');
    if sanitized.is_empty() {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: format!("Filename '{}' has no usable characters", filename),
        }));
    }

    // Limit length safely for UTF-8
    let mut end = sanitized.len().min(100);
    while !sanitized.is_char_boundary(end) {
        end -= 1;
    }
    Ok(sanitized[..end].to_string())
}

/// Field validator for prices: at most 8 whole digits and 2 decimal places.
pub fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    let normalized = price.normalize();

    if normalized.scale() > PRICE_DECIMAL_PLACES {
        let mut err = validator::ValidationError::new("price_decimal_places");
        err.message = Some("Ensure that there are no more than 2 decimal places.".into());
        return Err(err);
    }

    let limit = Decimal::from(10u64.pow(PRICE_MAX_WHOLE_DIGITS));
    if normalized.trunc().abs() >= limit {
        let mut err = validator::ValidationError::new("price_max_digits");
        err.message = Some("Ensure that there are no more than 10 digits in total.".into());
        return Err(err);
    }

    Ok(())
}

/// Field validator rejecting names that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("This field may not be blank.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(1024, 2048).is_ok());
        assert!(validate_file_size(2048, 2048).is_ok());
        assert!(validate_file_size(2049, 2048).is_err());
    }

    #[test]
    fn test_validate_image() {
        assert_eq!(validate_image(PNG_HEADER).unwrap(), mime::IMAGE_PNG);
        assert!(validate_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]).is_ok());
        assert!(validate_image(b"%PDF-1.4 not an image").is_err());
        assert!(validate_image(b"").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("photo.png").unwrap(), "photo.png");
        assert_eq!(sanitize_filename("my photo.png").unwrap(), "my_photo.png");
        assert_eq!(
            sanitize_filename("../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\pic<1>.jpg").unwrap(),
            "pic_1_.jpg"
        );
        assert_eq!(sanitize_filename(".hidden.png").unwrap(), "hidden.png");
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("...").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::from_str("19.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("10.500").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("1.999").unwrap()).is_err());
        assert!(validate_price(&Decimal::from_str("100000000").unwrap()).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Shoes").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
