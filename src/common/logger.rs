use colored::*;

use crate::parser::models::StreamEncoding;

/// 漂亮的日志输出工具
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示成功消息
    pub fn success(message: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), message.as_ref());
    }

    /// 显示信息消息
    pub fn info(message: impl AsRef<str>) {
        println!("{} {}", "ℹ".blue().bold(), message.as_ref());
    }

    /// 显示警告消息
    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    /// 显示错误消息
    pub fn error(message: impl AsRef<str>) {
        println!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 显示文件信息
    pub fn file_info(label: impl AsRef<str>, path: impl AsRef<str>) {
        println!("{} {}: {}", "📁".blue().bold(), label.as_ref().bold(), path.as_ref());
    }

    /// 显示视频标题，带批次序号
    pub fn video_info(index: usize, total: usize, title: impl AsRef<str>) {
        println!(
            "\n{} [{}/{}] {}",
            "🎥".magenta().bold(),
            index,
            total,
            title.as_ref().bold()
        );
    }

    /// 显示计划下载的分辨率
    pub fn resolution(chosen: Option<&StreamEncoding>) {
        match chosen.and_then(StreamEncoding::resolution_label) {
            Some(label) => println!("{} 预计下载分辨率: {}", "📏".cyan().bold(), label.cyan()),
            None => println!(
                "{} {}",
                "📏".cyan().bold(),
                "未找到分辨率信息（使用 best 格式）".bright_black()
            ),
        }
    }

    /// 显示完成总结
    pub fn completion_summary(items: Vec<impl AsRef<str>>) {
        println!("\n{}", "🎉 所有下载处理已完成！".green().bold());
        for item in items {
            println!("  {}", item.as_ref());
        }
    }

    /// 显示取消消息
    pub fn cancelled() {
        println!("\n{}", "⏹ 已取消".yellow().bold());
    }
}

/// 便捷宏用于漂亮的日志输出
#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::success(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}
