//! ログ初期化（log + env_logger）
//!
//! 優先順位:
//! 1. `RUST_LOG` 環境変数
//! 2. `-q`（error のみ）/ `-v` の回数
//! 3. 既定は warn（進捗表示は println! で行うため）

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// ログを初期化（プロセス内で1回だけ呼ぶ）
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    });

    // テストなどで二重初期化されても落とさない
    if builder.try_init().is_err() {
        log::debug!("Logger war bereits initialisiert");
    }
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
