use std::path::Path;

pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const EXIF_PREFIX: &[u8] = b"Exif\0\0";

pub fn is_jpeg_path(path: &Path) -> bool {
    has_extension(path, JPEG_EXTENSIONS)
}

/// Case-insensitive extension match.
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|value| value.to_str()) else {
        return false;
    };

    extensions
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
}

pub fn is_jpeg_data(bytes: &[u8]) -> bool {
    bytes.starts_with(&SOI)
}

/// Walks the marker segments ahead of the scan data looking for an APP1
/// segment that starts with `Exif\0\0`.
pub fn has_exif_segment(bytes: &[u8]) -> bool {
    if !is_jpeg_data(bytes) {
        return false;
    }

    let mut pos = SOI.len();
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return false;
        }

        let marker = bytes[pos + 1];
        // Fill bytes.
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        if marker == SOS || marker == EOI {
            return false;
        }
        // Standalone markers carry no length.
        if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
            pos += 2;
            continue;
        }

        let length = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        if length < 2 {
            return false;
        }

        let contents_start = pos + 4;
        let contents_end = (pos + 2 + length).min(bytes.len());
        if marker == APP1 && bytes[contents_start..contents_end].starts_with(EXIF_PREFIX) {
            return true;
        }

        pos += 2 + length;
    }

    false
}
