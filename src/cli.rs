use clap::Parser;
use std::path::PathBuf;

use crate::common::config::{DEFAULT_CONFIG_PATH, SettingsOverrides};
use crate::parser::url_source::UrlSource;

/// 高分辨率视频批量下载器（4K 优先，自动回退）
#[derive(Parser, Debug)]
#[command(name = "dl4k")]
#[command(version)]
#[command(about = "高分辨率视频批量下载器（4K 优先，自动回退）", long_about = None)]
pub struct Cli {
    /// 单个视频链接 (指定时优先使用)
    #[arg(value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,

    /// 每行一个 URL 的文本文件
    #[arg(long, alias = "url_file", value_name = "FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub url_file: Option<PathBuf>,

    /// 包含 URL 列表的 YAML 文件
    #[arg(long, alias = "url_yaml", value_name = "FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub url_yaml: Option<PathBuf>,

    /// 设置文件路径
    #[arg(long, value_name = "FILE")]
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// 覆盖设置中的保存目录
    #[arg(long, value_name = "DIR")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// 覆盖设置中的目标高度
    #[arg(long, value_name = "PIXELS")]
    #[arg(help = "目标最低高度: 2160=4K, 1440=2K, 1080=FHD")]
    pub min_height: Option<u32>,

    /// 覆盖选择视频流时优先的容器
    #[arg(long, value_name = "EXT")]
    pub preferred_container: Option<String>,

    /// 覆盖设置中的输出容器
    #[arg(long, value_name = "FORMAT")]
    pub merge_output_format: Option<String>,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn url_source(&self) -> Option<UrlSource> {
        UrlSource::from_cli(
            self.url.as_deref(),
            self.url_file.as_deref(),
            self.url_yaml.as_deref(),
        )
    }

    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            output_dir: self.output_dir.clone(),
            min_height: self.min_height,
            preferred_container: self.preferred_container.clone(),
            merge_output_format: self.merge_output_format.clone(),
        }
    }
}
