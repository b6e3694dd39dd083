//! Hides text in the least significant bit of one color channel of a lossless image,
//! visiting pixels in a key-driven, irregular order instead of scanning them in sequence.
//!
//! The engine is three layers deep: [`sequence`] decides which bit-slot comes next,
//! [`packer`] reads and writes one bit per slot, and [`codec`] turns an EOT-terminated
//! message into bits along that walk and back. [`media`], [`diff`] and [`config`] serve the
//! command-line tool.
//!
//! ```
//! use image::RgbaImage;
//! use stegwalk_lib::{BitstreamCodec, Channel, ChannelPacker};
//!
//! let cover = RgbaImage::new(64, 64);
//! let packer = ChannelPacker::new(cover, Channel::Blue);
//! let stego = BitstreamCodec::new(packer, 1, 3, "#").encode("hello")?;
//!
//! let packer = ChannelPacker::new(stego, Channel::Blue);
//! assert_eq!(BitstreamCodec::new(packer, 1, 3, "#").decode()?, b"hello");
//! # Ok::<(), stegwalk_lib::StegoError>(())
//! ```

pub mod channel;
pub mod codec;
pub mod config;
pub mod diff;
pub mod error;
pub mod media;
pub mod packer;
pub mod sequence;

pub use channel::Channel;
pub use codec::BitstreamCodec;
pub use error::StegoError;
pub use packer::ChannelPacker;
