//! # 核心隐写算法
//!
//! 编码：消息 + 结束标记 → 比特流 → 依次写入每个通道的低 `n` 位。
//! 解码：依次读取每个通道的低 `n` 位 → 8 位一组还原字符 → 扫描结束标记。
//!
//! 两者都按像素优先、像素内 R→G→B 的顺序遍历通道。

use crate::codec::{self, Message};
use crate::constants::{BITS_PER_CHAR, DELIMITER};
use crate::error::{Result, StegoError};
use crate::pixels::{BitWidth, PixelBuffer};
use log::debug;

/// 解码结果。找不到结束标记是正常结果，而不是错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Found(Message),
    NotFound,
}

impl Decoded {
    pub fn found(self) -> Option<Message> {
        match self {
            Decoded::Found(message) => Some(message),
            Decoded::NotFound => None,
        }
    }
}

/// 解码时判断消息结束的时机。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// 每追加一个字符后立即检查是否以结束标记结尾。
    #[default]
    AfterAppend,
    /// 追加字符后检查追加之前已累积的内容，因此会多读一个字符才停止。
    BeforeAppend,
}

/// 将 `message` 隐藏到 `pixels` 中，返回新的像素缓冲区。
///
/// 输入缓冲区不会被修改。超出消息所需容量的通道保持原样。
///
/// # Errors
///
/// 消息加结束标记所需的比特数超过 `3 × 像素数 × n` 时返回
/// [`StegoError::CapacityExceeded`]，此时不产生任何输出。
pub fn encode(pixels: &PixelBuffer, message: &Message, n: BitWidth) -> Result<PixelBuffer> {
    let payload = codec::append_delimiter(message);
    let bitstream = codec::to_bitstream(&payload);

    let required = bitstream.len();
    let capacity = pixels.capacity_bits(n);

    debug!(
        "encode: {} chars (+delimiter) need {} bits, image offers {} bits at n={}",
        message.len(),
        required,
        capacity,
        n.get()
    );

    if required > capacity {
        return Err(StegoError::CapacityExceeded { required, capacity });
    }

    let mut output = pixels.clone();
    let mut touched = 0;
    for (channel, bits) in output
        .channels_mut()
        .iter_mut()
        .zip(bitstream.chunks(n.bits()))
    {
        *channel = splice(*channel, bits, n);
        touched += 1;
    }

    debug!("encode: rewrote {} channels", touched);

    Ok(output)
}

/// 以默认的 [`Termination::AfterAppend`] 方式解码。
pub fn decode(pixels: &PixelBuffer, n: BitWidth) -> Result<Decoded> {
    decode_with(pixels, n, Termination::default())
}

/// 从 `pixels` 中提取隐藏的消息。
///
/// 结束标记第一次出现处及其之后的所有字符都会被丢弃。
///
/// 空的或畸形的缓冲区已在 [`PixelBuffer::from_raw`] 中被拒绝，
/// 因此这里没有额外的失败情形；找不到结束标记时返回 [`Decoded::NotFound`]。
pub fn decode_with(
    pixels: &PixelBuffer,
    n: BitWidth,
    termination: Termination,
) -> Result<Decoded> {
    let scanned = scan(pixels, n, termination);

    Ok(match codec::find_delimiter(scanned.as_bytes()) {
        Some(end) => Decoded::Found(Message::from(&scanned.as_bytes()[..end])),
        None => Decoded::NotFound,
    })
}

/// 逐字符读取通道低 `n` 位中的内容，直到按 `termination` 识别出结束标记或通道耗尽。
///
/// 返回扫描过的全部字符 (包括结束标记，以及 [`Termination::BeforeAppend`] 下多读的一个字符)。
/// 比特按需读取，识别出结束标记后不再访问剩余的通道。
pub fn scan(pixels: &PixelBuffer, n: BitWidth, termination: Termination) -> Message {
    let depth = n.get();
    let bits = pixels
        .channels()
        .iter()
        .flat_map(move |&channel| (0..depth).rev().map(move |i| (channel >> i) & 1 == 1));

    let mut scanned = Vec::new();
    for character in codec::group_bits(bits) {
        match termination {
            Termination::AfterAppend => {
                scanned.push(character);
                if ends_with_delimiter(&scanned) {
                    break;
                }
            }
            Termination::BeforeAppend => {
                scanned.push(character);
                if ends_with_delimiter(&scanned[..scanned.len() - 1]) {
                    break;
                }
            }
        }
    }

    let message = codec::groups_to_characters(scanned);

    // 只有最后一组可能不足 8 位，且仅在通道耗尽时出现
    let consumed = (message.len() * BITS_PER_CHAR).min(pixels.capacity_bits(n));
    debug!(
        "decode: scanned {} chars ({} bits) at n={}",
        message.len(),
        consumed,
        depth
    );

    message
}

fn ends_with_delimiter(bytes: &[u8]) -> bool {
    bytes.ends_with(DELIMITER)
}

/// 将 `bits` (高位在前) 写入 `channel` 低 `n` 位的窗口中，只改写 `bits.len()` 个比特。
///
/// 最后一次写入可能不足 `n` 位：这些比特占据窗口的高端，
/// 使解码时按 `n` 位读取窗口得到的比特顺序与比特流一致。
fn splice(channel: u8, bits: &[bool], n: BitWidth) -> u8 {
    let value = bits.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
    let shift = n.bits() - bits.len();
    let mask = ((1u8 << bits.len()) - 1) << shift;
    (channel & !mask) | (value << shift)
}
