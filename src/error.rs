//! # 错误类型
//!
//! 核心编码/解码逻辑返回的错误。命令行层会再用 `anyhow` 为其附加上下文。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 消息中包含码点大于 255 的字符，无法按单字节编码。
    #[error("Character {character:?} at position {position} is outside the single-byte range (0-255)")]
    InvalidCharacter { character: char, position: usize },

    /// 消息 (含结束标记) 所需比特数超过图像可用容量。
    #[error("Not enough space in the image. Required: {required} bits, Available: {capacity} bits")]
    CapacityExceeded { required: usize, capacity: usize },

    /// 位宽不在 1..=7 范围内。
    #[error("Invalid bit width {0}: must be between 1 and 7")]
    InvalidBitWidth(u8),

    /// 像素缓冲区为空，或其长度与 `width × height × 3` 不符。
    #[error("Malformed pixel buffer: {width}x{height} image needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, StegoError>;
