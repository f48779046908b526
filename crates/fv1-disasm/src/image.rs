use std::path::Path;

use anyhow::Result;
use fv1_rs::PROGLEN;

/// Bytes per program slot (128 big-endian words).
pub const PROGBYTES: usize = PROGLEN * 4;
/// Program slots in a full multi-program image.
pub const IMAGE_SLOTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("input image is empty")]
    Empty,
    #[error("program {index} starts at offset {offset:#06x}, past the {len}-byte image")]
    SlotOutOfRange { index: usize, offset: usize, len: usize },
}

/// Read a program image, capped at one full 8-slot image (4096 bytes).
pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    let mut bytes = std::fs::read(path)?;
    bytes.truncate(IMAGE_SLOTS * PROGBYTES);
    Ok(bytes)
}

/// Slice one program slot out of a multi-program image. A short final
/// slot yields whatever bytes exist; the decoder copes with partial
/// programs.
pub fn program_slice(image: &[u8], index: usize) -> Result<&[u8], ImageError> {
    if image.is_empty() {
        return Err(ImageError::Empty);
    }
    let offset = index * PROGBYTES;
    if offset >= image.len() {
        return Err(ImageError::SlotOutOfRange { index, offset, len: image.len() });
    }
    let end = (offset + PROGBYTES).min(image.len());
    Ok(&image[offset..end])
}
