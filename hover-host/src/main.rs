//! hover-host - 浮动图片组件的 headless 宿主
//!
//! 在没有浏览器的环境下注册元素、应用配置并输出结果：
//!
//! ```text
//! hover-host resolve --images '[{"src":"a.png","direction":"x"}]'
//! hover-host render --markup children.html --config hover.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use hover_core::{AnimationDescriptor, MotionVector};
use hover_host::cli::{EXIT_HOST_ERROR, InputArgs, exit_status};
use hover_host::{ElementRegistry, HostConfig, HostError, HostResult, logging};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "hover-host", version, about = "浮动图片组件的 headless 宿主")]
struct Cli {
    /// 配置文件路径（读取或解析失败时退出码为 2）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 覆盖配置中的日志级别
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 输出归一化后的描述（JSON）
    Resolve(InputArgs),
    /// 输出影子根标记（HTML）
    Render(InputArgs),
}

/// `resolve` 的输出项
#[derive(Serialize)]
struct ResolvedItem<'a> {
    #[serde(flatten)]
    descriptor: &'a AnimationDescriptor,
    motion: MotionVector,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("hover-host error: {e}");
            ExitCode::from(EXIT_HOST_ERROR)
        }
    }
}

fn real_main() -> HostResult<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    config.validate()?;
    logging::init(&config.log.level)?;
    if let Some(path) = &cli.config {
        info!(path = ?path, "配置文件加载成功");
    }

    let config = Arc::new(config);
    let mut registry = ElementRegistry::new();
    registry.define(Arc::clone(&config))?;

    let (input, output) = match &cli.command {
        Command::Resolve(input) => (input, Output::Descriptors),
        Command::Render(input) => (input, Output::Html),
    };

    let mut element = registry.create(&config.tag_name)?;
    input.apply(&mut element)?;
    element.connected();
    info!(
        count = element.rendered().len(),
        renders = element.render_count(),
        "配置解析完成"
    );

    match output {
        Output::Descriptors => {
            let items: Vec<_> = element
                .rendered()
                .iter()
                .map(|image| ResolvedItem {
                    descriptor: &image.descriptor,
                    motion: image.descriptor.motion(),
                })
                .collect();
            let json = serde_json::to_string_pretty(&items)
                .map_err(|e| HostError::SerializationFailed(e.to_string()))?;
            println!("{json}");
        }
        Output::Html => print!("{}", element.shadow_html()),
    }

    Ok(ExitCode::from(exit_status(&element)))
}

enum Output {
    Descriptors,
    Html,
}
