/// Image formats recognized by their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
}

impl ImageKind {
    /// Sniff the format from magic bytes. Unknown payloads are reported as PNG.
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => ImageKind::Jpeg,
            [0x89, 0x50, 0x4E, 0x47, ..] => ImageKind::Png,
            [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => ImageKind::Webp,
            _ => {
                tracing::warn!(
                    "Unrecognized asset format (first 4 bytes: {:02X?}), assuming PNG",
                    &bytes[..bytes.len().min(4)]
                );
                ImageKind::Png
            }
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Webp => "webp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_formats() {
        assert_eq!(ImageKind::sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D]), ImageKind::Png);
        assert_eq!(ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageKind::Jpeg);
        assert_eq!(
            ImageKind::sniff(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            ImageKind::Webp
        );
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_png() {
        assert_eq!(ImageKind::sniff(&[0x00, 0x01]), ImageKind::Png);
        assert_eq!(ImageKind::sniff(&[]).content_type(), "image/png");
        assert_eq!(ImageKind::Jpeg.extension(), "jpg");
    }
}
