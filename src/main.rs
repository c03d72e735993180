use clap::Parser;
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use dl4k::Result;
use dl4k::cli::Cli;
use dl4k::common::config::Settings;
use dl4k::common::logger::PrettyLogger;
use dl4k::downloader::BatchDownloader;
use dl4k::downloader::models::BatchReport;
use dl4k::downloader::ytdlp::YtDlp;

/// 没有给出任何 URL 来源时的提示
fn print_usage_hint() {
    println!("{}", "❗ 没有指定 URL。".yellow().bold());
    println!("   例) dl4k <URL>");
    println!("       dl4k --url-file urls.txt");
    println!("       dl4k --url-yaml urls.yaml");
}

/// 准备设置：读取文件并应用命令行覆盖
async fn prepare_settings(args: &Cli) -> Result<Settings> {
    let settings = Settings::load(&args.config).await?.apply(args.overrides());
    settings.validate()?;
    debug!("最终设置: {:?}", settings);
    Ok(settings)
}

fn print_summary(report: &BatchReport) {
    if report.interrupted {
        // 取消前已失败的 URL 仍然要列出来
        for line in report.failure_lines() {
            println!("  {}", line);
        }
        PrettyLogger::cancelled();
        return;
    }

    let mut items = vec![format!("成功: {}", report.succeeded.len())];
    items.extend(report.failure_lines());
    PrettyLogger::completion_summary(items);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // 初始化日志
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let settings = prepare_settings(&args).await.map_err(|e| {
        error!("设置无效: {}", e);
        e
    })?;

    let Some(source) = args.url_source() else {
        print_usage_hint();
        return Ok(());
    };

    let urls = source.load().await.map_err(|e| {
        error!("读取 URL 失败: {}", e);
        e
    })?;

    let ytdlp = YtDlp::from_env();
    match ytdlp.check_available().await {
        Some(version) => info!("yt-dlp 版本: {}", version),
        None => {
            error!("❌ 未检测到 yt-dlp，请确保已安装并加入 PATH。");
            error!("或者设置环境变量 YTDLP_PATH 指向 yt-dlp 可执行文件路径");
        }
    }

    // Ctrl-C 只取消剩余任务，不视为异常退出
    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到 Ctrl-C，正在取消...");
            cancel_on_signal.cancel();
        }
    });

    let downloader = BatchDownloader::new(ytdlp, settings)?;
    let report = downloader.run(&urls, &cancel).await?;
    print_summary(&report);
    Ok(())
}
