//! # 像素缓冲区与位宽
//!
//! 核心算法只认识按行优先排列的 RGB 字节序列，不关心图像文件格式。

use crate::constants::{
    BITS_PER_CHAR, CHANNELS_PER_PIXEL, DEFAULT_BIT_WIDTH, DELIMITER, MAX_BIT_WIDTH, MIN_BIT_WIDTH,
};
use crate::error::{Result, StegoError};
use image::RgbImage;

/// 每个通道被改写 (编码) 或读取 (解码) 的最低有效位数，取值 1..=7。
///
/// 该值不会写入图像，解码方必须使用与编码方完全相同的位宽。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth(u8);

impl BitWidth {
    pub fn get(self) -> u8 {
        self.0
    }

    /// 以 `usize` 形式返回位宽，便于参与容量计算。
    pub fn bits(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self(DEFAULT_BIT_WIDTH)
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(value: u8) -> Result<Self> {
        if (MIN_BIT_WIDTH..=MAX_BIT_WIDTH).contains(&value) {
            Ok(Self(value))
        } else {
            Err(StegoError::InvalidBitWidth(value))
        }
    }
}

/// 一张 RGB 图像的原始像素数据。
///
/// 不变量：`data.len() == width * height * 3`，且像素数不为零。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 从行优先的 RGB 字节构造缓冲区。
    ///
    /// # Errors
    ///
    /// 图像为空，或字节数与尺寸不符时返回 [`StegoError::InvalidBuffer`]。
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS_PER_PIXEL))
            .unwrap_or(usize::MAX);

        if expected == 0 || data.len() != expected {
            return Err(StegoError::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 从 `(r, g, b)` 三元组序列构造缓冲区。
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self> {
        Self::from_raw(width, height, pixels.concat())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS_PER_PIXEL
    }

    /// 所有通道值，顺序为像素优先，像素内 R→G→B。
    pub fn channels(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// 第 `index` 个像素的 `(r, g, b)`。
    pub fn pixel(&self, index: usize) -> Option<[u8; 3]> {
        self.data
            .chunks_exact(CHANNELS_PER_PIXEL)
            .nth(index)
            .map(|rgb| [rgb[0], rgb[1], rgb[2]])
    }

    /// 在给定位宽下可嵌入的比特总数：`3 × 像素数 × n`。
    pub fn capacity_bits(&self, n: BitWidth) -> usize {
        self.data.len() * n.bits()
    }

    /// 在给定位宽下，扣除结束标记后最多能隐藏的字符数。
    pub fn max_message_len(&self, n: BitWidth) -> usize {
        (self.capacity_bits(n) / BITS_PER_CHAR).saturating_sub(DELIMITER.len())
    }

    pub fn into_image(self) -> RgbImage {
        // 构造时已保证长度与尺寸一致
        RgbImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| unreachable!("pixel buffer length matches its dimensions"))
    }
}

impl TryFrom<RgbImage> for PixelBuffer {
    type Error = StegoError;

    fn try_from(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, image.into_raw())
    }
}
