//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `config-check`: 检查组件配置文件（`.json` 特性值、`.html` 子元素标记）

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hover_core::{DiagnosticResult, parse_children, resolve_report};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

#[derive(Parser)]
#[command(name = "xtask", about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 检查配置文件
    ///
    /// 不带参数：检查 assets/hover/ 下所有 .json 与 .html 文件
    ConfigCheck {
        /// 指定文件或目录
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Task::CheckAll => check_all(),
        Task::ConfigCheck { path } => config_check(path.as_deref()),
    }
}

fn check_all() -> anyhow::Result<()> {
    let sh = Shell::new()?;

    eprintln!("\n==> cargo fmt --all -- --check");
    cmd!(sh, "cargo fmt --all -- --check").run()?;

    eprintln!("\n==> cargo clippy --workspace --all-targets");
    cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

    eprintln!("\n==> cargo test --workspace");
    cmd!(sh, "cargo test --workspace").run()?;

    Ok(())
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 默认配置目录（相对于 workspace root）
const DEFAULT_CONFIG_DIR: &str = "assets/hover";

/// 配置文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFileKind {
    /// `images` 特性值
    Json,
    /// 子元素标记
    Markup,
}

impl ConfigFileKind {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Markup),
            _ => None,
        }
    }
}

/// 检查结果
#[derive(Default)]
struct ConfigCheckResult {
    files_checked: usize,
    read_errors: usize,
    items_resolved: usize,
    /// 所有文件的诊断汇总
    diagnostics: DiagnosticResult,
}

impl ConfigCheckResult {
    /// 记录单个文件的检查结果（逐条输出后并入汇总）
    fn record(&mut self, file_id: &str, items: usize, diagnostics: DiagnosticResult) {
        self.items_resolved += items;
        for diag in &diagnostics.diagnostics {
            eprintln!("{}: {}", file_id, diag);
        }
        self.diagnostics.merge(diagnostics);
    }

    fn error_count(&self) -> usize {
        self.read_errors + self.diagnostics.error_count()
    }

    fn warn_count(&self) -> usize {
        self.diagnostics.warn_count()
    }
}

/// 执行配置检查
fn config_check(path: Option<&Path>) -> anyhow::Result<()> {
    let root = path.unwrap_or(Path::new(DEFAULT_CONFIG_DIR));
    if !root.exists() {
        anyhow::bail!(
            "路径不存在: {}\n请在 workspace 根目录运行，或指定配置路径",
            root.display()
        );
    }

    let files = collect_config_files(root)?;
    if files.is_empty() {
        eprintln!("未找到配置文件（.json / .html）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut result = ConfigCheckResult::default();
    for (file, kind) in &files {
        check_config_file(file, *kind, &mut result);
    }

    print_check_result(&result);

    if result.error_count() > 0 {
        anyhow::bail!("配置检查发现错误");
    }
    Ok(())
}

/// 收集配置文件（按路径排序）
fn collect_config_files(root: &Path) -> anyhow::Result<Vec<(PathBuf, ConfigFileKind)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(kind) = ConfigFileKind::from_path(entry.path()) {
            files.push((entry.into_path(), kind));
        }
    }
    Ok(files)
}

/// 检查单个配置文件
fn check_config_file(file: &Path, kind: ConfigFileKind, result: &mut ConfigCheckResult) {
    let file_id = file.display().to_string();
    result.files_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}: 无法读取文件 - {}", file_id, e);
            result.read_errors += 1;
            return;
        }
    };

    let report = match kind {
        ConfigFileKind::Json => resolve_report(Some(content.trim()), None, &[]),
        ConfigFileKind::Markup => resolve_report(None, None, &parse_children(&content)),
    };

    result.record(&file_id, report.descriptors.len(), report.diagnostics);
}

/// 输出检查结果
fn print_check_result(result: &ConfigCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!(
        "检查完成: {} 个文件, {} 张图片",
        result.files_checked, result.items_resolved
    );

    let error_count = result.error_count();
    let warn_count = result.warn_count();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
