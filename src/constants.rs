/// 附加在消息末尾的结束标记。
/// 解码时一旦在提取出的字符中发现该标记，即认为隐藏消息已结束。
pub const DELIMITER: &[u8; 5] = b"$t3g0";

/// 每个像素的颜色通道数 (R, G, B)。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个字符占用的比特数。
/// 消息按单字节字符处理，因此码点必须位于 0..=255。
pub const BITS_PER_CHAR: usize = 8;

/// 每个通道允许改写的最低有效位数的下限。
pub const MIN_BIT_WIDTH: u8 = 1;

/// 每个通道允许改写的最低有效位数的上限。
/// 改写 8 位等于直接替换整个通道值，因此不被允许。
pub const MAX_BIT_WIDTH: u8 = 7;

/// 未指定时使用的默认位宽。
pub const DEFAULT_BIT_WIDTH: u8 = 3;
