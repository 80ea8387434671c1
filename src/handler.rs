//! # 命令处理逻辑模块
//!
//! 包含处理 `encode`、`decode` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, DecodeArgs, EncodeArgs};
use crate::image_io::{load_image, read_message, save_image, write_message};
use crate::pixels::BitWidth;
use crate::steganography::{Decoded, Termination, decode_with, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::path::{Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 读取图像和文本文件，将文本隐藏到像素的低 n 位中，最后将结果写入目标图像文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件，或文本包含码点超过 255 的字符。
/// * 图像没有足够的空间来隐藏文本。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_image_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    let width = BitWidth::try_from(args.bits)?;
    let pixels = load_image(&args.image)?;
    let message = read_message(&args.text, args.raw)?;

    let encoded = encode(&pixels, &message, width).with_context(|| {
        format!(
            "Failed to hide {} characters in '{}' at {} bits per channel. \nAt most {} characters fit.",
            message.len().to_string().red().bold(),
            args.image.to_string_lossy(),
            width.get(),
            pixels.max_message_len(width).to_string().green().bold()
        )
    })?;

    save_image(encoded, &dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 读取经过隐写的图像，按给定位宽提取隐藏的文本。
/// 指定了 `--text` 时写入该文件，否则打印到标准输出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有找到结束标记 (没有隐藏消息，或位宽不一致)。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    if let Some(text) = &args.text {
        ensure_writable(text, args.force)?;
    }

    let width = BitWidth::try_from(args.bits)?;
    let termination = if args.legacy_scan {
        Termination::BeforeAppend
    } else {
        Termination::AfterAppend
    };
    debug!("decode termination mode: {:?}", termination);

    let pixels = load_image(&args.image)?;

    let message = match decode_with(&pixels, width, termination)? {
        Decoded::Found(message) => message,
        Decoded::NotFound => anyhow::bail!(
            "No hidden message found in '{}' at {} bits per channel. \nThe image may not contain a message, or it was hidden with a different bit width.",
            args.image.to_string_lossy().red().bold(),
            width.get().to_string().red().bold()
        ),
    };

    match &args.text {
        Some(path) => {
            write_message(&message, path, args.raw)?;
            println!(
                "The text has been successfully recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => println!("{} {}", "Hidden Message:".green().bold(), message.to_text()),
    }

    Ok(())
}

/// 处理 'Capacity' 命令：报告图像在给定位宽下能容纳的比特数与字符数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let width = BitWidth::try_from(args.bits)?;
    let pixels = load_image(&args.image)?;

    println!(
        "{} ({}x{}, {} bits per channel): {} bits, up to {} characters",
        args.image.to_string_lossy().bold(),
        pixels.width(),
        pixels.height(),
        width.get(),
        pixels.capacity_bits(width).to_string().green().bold(),
        pixels.max_message_len(width).to_string().green().bold()
    );

    Ok(())
}

/// 未指定输出路径时的默认结果图像路径：源图像同目录下的 `doctored_<名称>.png`。
pub fn default_image_dest(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("doctored_{stem}.png"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
