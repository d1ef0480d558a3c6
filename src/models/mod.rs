//! # 数据模型模块
//!
//! 定义构建目标和构建产物的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `compose/`, `commands/` 使用
//! - 子模块: target, artifact

pub mod artifact;
pub mod target;

pub use artifact::BuildArtifact;
pub use target::{Machine, MpiKind, MpiTarget, MpiVersion};
