//! # 比特编解码模块
//!
//! 负责消息与比特流之间的转换，以及结束标记的追加。
//! 消息以字节序列表示，每个字节对应一个码点位于 0..=255 的字符，
//! 因此比特流的长度总是字符数的 8 倍。

use crate::constants::{BITS_PER_CHAR, DELIMITER};
use crate::error::{Result, StegoError};

/// 待隐藏或已恢复的消息。
///
/// 内部是一段字节序列：每个字节就是一个字符的码点。
/// 从字节构造总是成功的；从文本构造时，码点超过 255 的字符会被拒绝。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(Vec<u8>);

impl Message {
    /// 将文本逐字符转换为单字节码点。
    ///
    /// # Errors
    ///
    /// 若任一字符的码点大于 255，返回 [`StegoError::InvalidCharacter`]。
    pub fn from_text(text: &str) -> Result<Self> {
        text.chars()
            .enumerate()
            .map(|(position, character)| {
                u8::try_from(u32::from(character))
                    .map_err(|_| StegoError::InvalidCharacter {
                        character,
                        position,
                    })
            })
            .collect::<Result<Vec<u8>>>()
            .map(Self)
    }

    /// 将每个字节映射回码点相同的字符 (即 Latin-1 解释)。
    pub fn to_text(&self) -> String {
        self.0.iter().map(|&byte| char::from(byte)).collect()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Message {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Message {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// 返回在末尾追加了结束标记的新消息。
pub fn append_delimiter(message: &Message) -> Message {
    let mut bytes = Vec::with_capacity(message.len() + DELIMITER.len());
    bytes.extend_from_slice(message.as_bytes());
    bytes.extend_from_slice(DELIMITER);
    Message(bytes)
}

/// 将每个字符展开为 8 个比特，高位在前，按字符顺序拼接。
pub fn to_bitstream(message: &Message) -> Vec<bool> {
    message
        .as_bytes()
        .iter()
        .flat_map(|&byte| (0..BITS_PER_CHAR).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// 把比特序列按顺序切分为 8 位一组，每组解析为一个无符号整数。
///
/// 这是惰性的：只在调用方需要下一组时才从底层迭代器读取比特。
/// 最后一组若不足 8 位，仍按其实际比特解析 (例如 `101` 得到 5)，不会被丢弃。
pub fn group_bits<I>(bits: I) -> Groups<I::IntoIter>
where
    I: IntoIterator<Item = bool>,
{
    Groups {
        bits: bits.into_iter(),
    }
}

/// [`group_bits`] 返回的迭代器。
pub struct Groups<I> {
    bits: I,
}

impl<I: Iterator<Item = bool>> Iterator for Groups<I> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let mut value = 0u8;
        let mut taken = 0;

        while taken < BITS_PER_CHAR {
            match self.bits.next() {
                Some(bit) => {
                    value = (value << 1) | u8::from(bit);
                    taken += 1;
                }
                None => break,
            }
        }

        (taken > 0).then_some(value)
    }
}

/// 将每组的整数值映射回对应码点的字符。
pub fn groups_to_characters<I>(groups: I) -> Message
where
    I: IntoIterator<Item = u8>,
{
    Message(groups.into_iter().collect())
}

/// 在字节序列中查找结束标记第一次出现的位置。
pub fn find_delimiter(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(DELIMITER.len())
        .position(|window| window == DELIMITER)
}
