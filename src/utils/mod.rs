//! # 工具模块
//!
//! ## 依赖关系
//! - 被 `commands/`, `models/` 使用
//! - 子模块: name, output

pub mod name;
pub mod output;
