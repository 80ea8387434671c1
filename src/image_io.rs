//! # 图像与文本文件 I/O
//!
//! 核心算法之外的边界：把图像文件读成 RGB 像素缓冲区、把缓冲区写回文件，
//! 以及读取要隐藏的文本。

use crate::codec::Message;
use crate::pixels::PixelBuffer;
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::Path;

/// 打开图像并统一转换为 RGB8 (丢弃 alpha 通道)。
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();

    info!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    PixelBuffer::try_from(image).with_context(|| {
        format!(
            "Image contains no pixel data: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 按扩展名推断格式并保存。应使用无损格式，否则隐藏的数据会被破坏。
pub fn save_image(pixels: PixelBuffer, path: &Path) -> Result<()> {
    pixels.into_image().save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    info!("saved {}", path.display());
    Ok(())
}

/// 读取要隐藏的消息。
///
/// 默认按 UTF-8 文本读取并逐字符转换，码点超过 255 的字符会导致失败；
/// `raw` 为真时直接使用文件的原始字节。
pub fn read_message(path: &Path, raw: bool) -> Result<Message> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "Unable to read text file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    if raw {
        return Ok(Message::from(bytes));
    }

    let text = String::from_utf8(bytes).with_context(|| {
        format!(
            "Text file is not valid UTF-8 (use --raw to hide its bytes verbatim): {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(Message::from_text(&text)?)
}

/// 写出恢复的消息，编码方式与 [`read_message`] 对应。
pub fn write_message(message: &Message, path: &Path, raw: bool) -> Result<()> {
    let result = if raw {
        fs::write(path, message.as_bytes())
    } else {
        fs::write(path, message.to_text())
    };

    result.with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}
