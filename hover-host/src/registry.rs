//! # Registry 模块
//!
//! 自定义元素注册表。注册在初始化时进行一次，
//! 重复注册同名元素不会报错，也不会覆盖已有定义。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{HostConfig, is_valid_element_name};
use crate::element::HoveringImages;
use crate::error::{HostError, HostResult};

/// 已注册的元素定义
#[derive(Debug, Clone)]
pub struct ElementDefinition {
    pub config: Arc<HostConfig>,
}

/// 元素注册表
#[derive(Debug, Default)]
pub struct ElementRegistry {
    definitions: HashMap<String, ElementDefinition>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以 `config.tag_name` 注册元素
    ///
    /// 返回 `true` 表示本次新注册，`false` 表示已存在（保持原定义）。
    pub fn define(&mut self, config: Arc<HostConfig>) -> HostResult<bool> {
        let name = config.tag_name.clone();
        if !is_valid_element_name(&name) {
            return Err(HostError::InvalidElementName { name });
        }

        if self.definitions.contains_key(&name) {
            debug!(tag = %name, "元素已注册，跳过");
            return Ok(false);
        }

        info!(tag = %name, "注册自定义元素");
        self.definitions.insert(name, ElementDefinition { config });
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// 创建已注册元素的新实例
    pub fn create(&self, name: &str) -> HostResult<HoveringImages> {
        let definition = self.get(name).ok_or_else(|| HostError::UndefinedElement {
            name: name.to_string(),
        })?;
        Ok(HoveringImages::new(Arc::clone(&definition.config)))
    }
}
