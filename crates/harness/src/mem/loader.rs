//! Binary image loader.

use std::fs;
use std::path::Path;

use tracing::info;

/// Word-addressed backdoor into the design's RAM.
///
/// Implemented by whatever owns the memory array — a simulator's RAM model
/// in production, a plain vector in tests. Word index 0 is byte address 0.
pub trait BackdoorMemory {
    /// Overwrites the 32-bit word at `index`.
    fn poke_word(&mut self, index: usize, value: u32);
}

/// Injects a raw binary image into `mem`, returning the byte count loaded.
///
/// The image is consumed as little-endian 32-bit words; a short final chunk
/// is zero-padded. Nothing touches the bus — this is test setup, not
/// protocol traffic.
pub fn load_bytes(image: &[u8], mem: &mut impl BackdoorMemory) -> usize {
    for (index, chunk) in image.chunks(4).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        mem.poke_word(index, u32::from_le_bytes(word));
    }
    info!(bytes = image.len(), "backdoor load");
    image.len()
}

/// Reads a binary file and injects it via [`load_bytes`].
pub fn load_bin(path: impl AsRef<Path>, mem: &mut impl BackdoorMemory) -> std::io::Result<usize> {
    let image = fs::read(path)?;
    Ok(load_bytes(&image, mem))
}
