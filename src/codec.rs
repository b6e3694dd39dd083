//! Message serialization over the bit-slot walk.
//!
//! A message is the payload followed by an end-of-text (EOT) marker, written byte by byte,
//! most significant bit first, one bit per slot. Decoding reads whole bytes along the same
//! walk and stops as soon as the bytes read so far end with the full marker.

use crate::error::StegoError;
use crate::packer::ChannelPacker;
use crate::sequence::IndexWalk;
use image::RgbaImage;

/// Embeds and extracts EOT-terminated messages through a [`ChannelPacker`].
#[derive(Debug, Clone)]
pub struct BitstreamCodec {
    packer: ChannelPacker,
    entry: i64,
    key: i64,
    eot: Vec<u8>,
}

impl BitstreamCodec {
    /// Creates a codec starting at slot `entry` and stepping with `key`.
    ///
    /// The walk only moves when both `key` and the popcount of the current slot are
    /// non-zero, so an entry of `0` or a key of `0` pins every bit to a single slot.
    /// Encoding still succeeds in that case, but decoding keeps rereading that slot until
    /// the marker happens to match, which for most markers is never.
    #[must_use]
    pub fn new(packer: ChannelPacker, entry: i64, key: i64, eot: impl Into<Vec<u8>>) -> Self {
        Self {
            packer,
            entry,
            key,
            eot: eot.into(),
        }
    }

    fn walk(&self) -> IndexWalk {
        IndexWalk::new(self.entry, self.key)
    }

    /// Embeds `text` followed by the EOT marker and returns the resulting image.
    ///
    /// # Errors
    ///
    /// Returns the first packer error, typically [`StegoError::IndexOutOfBounds`] when the
    /// walk runs off the image. The partially written buffer is dropped with the codec.
    pub fn encode(mut self, text: impl AsRef<[u8]>) -> Result<RgbaImage, StegoError> {
        let bits: Vec<u8> = text
            .as_ref()
            .iter()
            .chain(self.eot.iter())
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
            .collect();

        for (bit, index) in bits.into_iter().zip(self.walk()) {
            self.packer.set(index, bit)?;
        }

        Ok(self.packer.into_image())
    }

    /// Reads bytes along the walk until they end with the EOT marker and returns them
    /// without it.
    ///
    /// The marker must be matched in full against the tail of the bytes read, so nothing
    /// can match before at least `eot.len()` bytes are in. A payload that itself contains
    /// the marker is cut at its first occurrence.
    ///
    /// # Errors
    ///
    /// Returns the first packer error. On an image without an embedded message this is
    /// how decoding ends: the walk eventually leaves the image.
    pub fn decode(&self) -> Result<Vec<u8>, StegoError> {
        let mut walk = self.walk();
        let mut message = Vec::new();

        loop {
            let mut byte = 0u8;
            for index in walk.by_ref().take(8) {
                byte = (byte << 1) | self.packer.get(index)?;
            }
            message.push(byte);

            if message.ends_with(&self.eot) {
                message.truncate(message.len() - self.eot.len());
                return Ok(message);
            }
        }
    }
}
