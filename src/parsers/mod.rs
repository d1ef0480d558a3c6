//! # 解析器模块
//!
//! 解析配置中的原始目标标识符。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: mpi_name

pub mod mpi_name;

pub use mpi_name::parse_mpi_name;
