//! # stegbits 库
//!
//! 本库包含 n 位 LSB 隐写工具的核心逻辑：
//! [`steganography::encode`] 将消息写入每个通道的低 n 位，
//! [`steganography::decode`] 按相同位宽读出并识别结束标记。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod pixels;
pub mod steganography;

pub use codec::Message;
pub use error::StegoError;
pub use pixels::{BitWidth, PixelBuffer};
pub use steganography::{Decoded, Termination, decode, decode_with, encode, scan};
