//! # 文本组装模块
//!
//! 把 (machine, MPI) 目标组装成 Dockerfile 和 sbatch 脚本文本。
//! 输出对相同输入是字节级确定的：固定的自动生成头部，没有时间戳。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/`, `config.rs`
//! - 子模块: dockerfile, batch

pub mod batch;
pub mod dockerfile;

pub use batch::{batch_file_name, compose_batch_script};
pub use dockerfile::{compose_dockerfile, dockerfile_name, image_name};
