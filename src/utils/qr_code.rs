use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::errors::app_error::AppError;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Render `content` as a PNG QR code wrapped in a self-contained data URL.
pub fn render_data_url(content: &str) -> Result<String, AppError> {
    let qr_code = QrCode::new(content.as_bytes())
        .map_err(|e| AppError::QrCode(e.to_string()))?;

    let image = qr_code
        .render::<Luma<u8>>()
        .module_dimensions(4, 4)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::QrCode(e.to_string()))?;

    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn renders_png_data_url() {
        let data_url = render_data_url("http://localhost:5000/abc12345").unwrap();
        let encoded = data_url.strip_prefix(DATA_URL_PREFIX).unwrap();
        let png = STANDARD.decode(encoded).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn oversized_content_fails() {
        let content = "x".repeat(8_000);
        assert!(matches!(
            render_data_url(&content),
            Err(AppError::QrCode(_))
        ));
    }
}
