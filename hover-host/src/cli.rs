//! # CLI 模块
//!
//! headless 命令行的输入参数与退出状态，供 `hover-host` 二进制使用。

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use tracing::debug;

use crate::element::HoveringImages;
use crate::error::{HostError, HostResult};

/// 配置解析完成但出现错误诊断时的退出码
pub const EXIT_DIAGNOSTIC_ERROR: u8 = 1;

/// 宿主错误（配置文件、输入文件、参数）的退出码
pub const EXIT_HOST_ERROR: u8 = 2;

/// 组件输入
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// `images` 特性值（JSON 字符串）
    #[arg(long)]
    pub images: Option<String>,

    /// `images` 属性值（任意 JSON 值）
    #[arg(long)]
    pub property: Option<String>,

    /// 子元素标记文件
    #[arg(long)]
    pub markup: Option<PathBuf>,
}

impl InputArgs {
    /// 把输入应用到元素上
    ///
    /// 应在元素接入文档之前调用：此时不观察子树，
    /// 接入时只做一次完整渲染。
    pub fn apply(&self, element: &mut HoveringImages) -> HostResult<()> {
        if let Some(path) = &self.markup {
            let markup = std::fs::read_to_string(path)
                .map_err(|e| HostError::Io(format!("{}: {e}", path.display())))?;
            element.set_children_markup(&markup);
            debug!(path = ?path, children = element.children().len(), "已读取子元素标记");
        }

        if let Some(text) = &self.property {
            let value: Value =
                serde_json::from_str(text).map_err(|e| HostError::InvalidArgument {
                    name: "property".to_string(),
                    message: e.to_string(),
                })?;
            element.set_images(value);
        }

        if let Some(images) = &self.images {
            let attribute = element.config().observed_attribute.clone();
            element.set_attribute(&attribute, images.as_str());
        }

        Ok(())
    }
}

/// 根据最近一次渲染的诊断计算退出码
pub fn exit_status(element: &HoveringImages) -> u8 {
    if element.diagnostics().has_errors() {
        EXIT_DIAGNOSTIC_ERROR
    } else {
        0
    }
}
