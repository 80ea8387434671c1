//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 位宽既可通过 `--bits` 指定，也可通过环境变量 `STEGBITS_BITS` 配置。

use crate::constants::{DEFAULT_BIT_WIDTH, MAX_BIT_WIDTH, MIN_BIT_WIDTH};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// 在 RGB 图像每个通道的低 n 位中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "在 RGB 图像每个颜色通道的低 n 位 (1-7) 中隐藏或恢复文本。\n解码时必须使用与编码时相同的 n。请使用无损格式 (如 PNG, BMP) 保存结果。"
)]
pub struct Cli {
    /// 输出更详细的日志 (-v: info, -vv: debug, -vvv: trace)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将文本文件内容隐藏到图像中。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Decode(DecodeArgs),

    /// 显示图像在给定位宽下的可用容量。
    Capacity(CapacityArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 结果图像的保存路径。省略时为源图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 每个通道改写的最低有效位数。
    #[arg(short, long, env = "STEGBITS_BITS", default_value_t = DEFAULT_BIT_WIDTH,
          value_parser = clap::value_parser!(u8).range(MIN_BIT_WIDTH as i64..=MAX_BIT_WIDTH as i64))]
    pub bits: u8,

    /// 按原始字节隐藏文本文件，而不是按 UTF-8 字符转换。
    #[arg(long)]
    pub raw: bool,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的保存路径。省略时直接打印到标准输出。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 编码时使用的最低有效位数。
    #[arg(short, long, env = "STEGBITS_BITS", default_value_t = DEFAULT_BIT_WIDTH,
          value_parser = clap::value_parser!(u8).range(MIN_BIT_WIDTH as i64..=MAX_BIT_WIDTH as i64))]
    pub bits: u8,

    /// 将恢复的字节原样写出，而不是按字符转换为 UTF-8。
    #[arg(long)]
    pub raw: bool,

    /// 使用旧版扫描方式：在追加字符前检查结束标记。
    #[arg(long)]
    pub legacy_scan: bool,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 每个通道改写的最低有效位数。
    #[arg(short, long, env = "STEGBITS_BITS", default_value_t = DEFAULT_BIT_WIDTH,
          value_parser = clap::value_parser!(u8).range(MIN_BIT_WIDTH as i64..=MAX_BIT_WIDTH as i64))]
    pub bits: u8,
}
