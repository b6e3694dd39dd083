//! Single-channel LSB access to an image, addressed by bit-slot index.
//!
//! Slot `index` lives at `x = index % width`, `y = index / width`. Reads always come from
//! the untouched source image and writes always land in a separate output copy, so the
//! source stays available for comparison and repeated writes to one pixel never build on
//! each other.
//!
//! The row check rejects a slot only when its row is strictly greater than the image
//! height. Slots on the row just past the bottom edge are accepted: they read as `0` and
//! writes to them are dropped.

use crate::channel::Channel;
use crate::error::StegoError;
use image::RgbaImage;

/// Where a bit-slot index lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Pixel { x: u32, y: u32 },
    PastLastRow,
}

/// Reads and writes one LSB of one color channel per bit-slot.
#[derive(Debug, Clone)]
pub struct ChannelPacker {
    source: RgbaImage,
    output: RgbaImage,
    channel: Channel,
}

impl ChannelPacker {
    /// Creates a packer over `source`; the output buffer starts as a full copy of it.
    #[must_use]
    pub fn new(source: RgbaImage, channel: Channel) -> Self {
        let output = source.clone();
        Self {
            source,
            output,
            channel,
        }
    }

    /// Like [`ChannelPacker::new`], taking the channel as its numeric code
    /// (`0` red, `1` green, `2` blue).
    pub fn with_channel_code(source: RgbaImage, code: u8) -> Result<Self, StegoError> {
        let channel = Channel::try_from(code)?;
        Ok(Self::new(source, channel))
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The output buffer with every write applied so far.
    pub fn image(&self) -> &RgbaImage {
        &self.output
    }

    pub fn into_image(self) -> RgbaImage {
        self.output
    }

    /// Writes `bit` into the LSB of the selected channel at `index`.
    ///
    /// Any non-zero `bit` counts as `1`. The other channels and alpha are copied from the
    /// source pixel unchanged.
    pub fn set(&mut self, index: i64, bit: u8) -> Result<(), StegoError> {
        let Slot::Pixel { x, y } = self.locate(index)? else {
            return Ok(());
        };

        let mut pixel = *self.source.get_pixel(x, y);
        let value = &mut pixel[self.channel.offset()];
        *value = with_last_bit(*value, bit);
        self.output.put_pixel(x, y, pixel);

        Ok(())
    }

    /// Reads the LSB of the selected channel at `index` from the source image.
    pub fn get(&self, index: i64) -> Result<u8, StegoError> {
        let bit = match self.locate(index)? {
            Slot::Pixel { x, y } => self.source.get_pixel(x, y)[self.channel.offset()] & 0x01,
            Slot::PastLastRow => 0,
        };

        if bit > 1 {
            return Err(StegoError::ChannelReadInvariantViolation { index, bit });
        }
        Ok(bit)
    }

    fn locate(&self, index: i64) -> Result<Slot, StegoError> {
        if index < 0 {
            return Err(StegoError::NegativeIndex(index));
        }

        let (width, height) = self.source.dimensions();
        let out_of_bounds = StegoError::IndexOutOfBounds {
            index,
            width,
            height,
        };
        if width == 0 {
            return Err(out_of_bounds);
        }

        let index = index as u64;
        let x = index % u64::from(width);
        let y = index / u64::from(width);

        if y > u64::from(height) {
            return Err(out_of_bounds);
        }
        if y == u64::from(height) {
            return Ok(Slot::PastLastRow);
        }

        // Both fit: x < width and y < height.
        Ok(Slot::Pixel {
            x: x as u32,
            y: y as u32,
        })
    }
}

fn with_last_bit(value: u8, bit: u8) -> u8 {
    if bit == 0 {
        value & 0xFE
    } else {
        value | 0x01
    }
}
