use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use stegbits::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_decode, handle_encode},
};

/// 根据 `-v` 的次数设置日志级别；`RUST_LOG` 可覆盖该设置。
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format_timestamp(None)
        .init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Encode(args) => handle_encode(args),
        Commands::Decode(args) => handle_decode(args),
        Commands::Capacity(args) => handle_capacity(args),
    }
}
