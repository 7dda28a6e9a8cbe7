use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 输出
///
/// `RUST_LOG` 优先；否则按 verbose 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n图片清洗任务日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 图片清洗客户端");
    info!("🌐 服务地址: {}", config.server_url);
    info!("📁 任务目录: {}", config.job_folder);
    info!("{}", "=".repeat(60));
}

/// 记录任务加载信息
///
/// # 参数
/// - `files`: 任务文件数量
/// - `batch`: 批量任务数量
/// - `compare`: 对比任务数量
pub fn log_jobs_loaded(files: usize, batch: usize, compare: usize) {
    info!("✓ 找到 {} 个任务文件", files);
    info!("📋 批量任务: {} 个, 对比任务: {} 个\n", batch, compare);
}

/// 记录单个任务结束
pub fn log_job_finished(kind: &str, index: usize, total: usize, detail: &str, succeeded: bool) {
    let mark = if succeeded { "✓" } else { "✗" };
    info!("\n{}", "─".repeat(60));
    info!("📦 [{} {}/{}] {} {}", kind, index, total, mark, detail);
}

/// 打印最终统计信息
///
/// # 参数
/// - `lines`: (标题, 成功, 总数) 列表
/// - `alerts`: 用户提示次数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(lines: &[(&str, usize, usize)], alerts: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for (title, success, total) in lines {
        info!("✅ {}: 成功 {}/{}", title, success, total);
    }
    info!("🔔 提示次数: {}", alerts);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
