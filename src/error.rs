//! # 统一错误处理模块
//!
//! 定义 mpimage 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mpimage 统一错误类型
#[derive(Error, Debug)]
pub enum MpimageError {
    // ─────────────────────────────────────────────────────────────
    // 校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid MPI target '{name}': {reason}")]
    InvalidMpiName { name: String, reason: String },

    #[error("Unknown machine: '{0}' (expected 'generic' or a known cluster name)")]
    InvalidMachineName(String),

    #[error("Machine '{machine}' has a fixed MPI configuration, but MPI targets were listed for it")]
    UnexpectedMpiList { machine: String },

    #[error("Machine 'generic' requires at least one MPI target")]
    MissingMpiList,

    #[error("Build artifact is incomplete: {field} is empty")]
    ArtifactIncomplete { field: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Recipe file not found: {path} (was it persisted before building?)")]
    ArtifactMissing { path: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' could not be started")]
    CommandNotFound {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External command failed: {command}\nExit status: {status}")]
    CommandFailed { command: String, status: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MpimageError>;
