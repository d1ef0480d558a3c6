//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 运行模式
//! - 默认：写出 Dockerfile 和 sbatch 脚本，docker 命令只显示不执行
//! - `--image` / `-i`：真正执行 docker build
//! - `--show_targets_only` / `-s`：只列出配置的目标，不生成任何文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/mod.rs`

use clap::Parser;

/// mpimage - MPI 容器镜像与批处理脚本生成工具
#[derive(Parser, Debug)]
#[command(name = "mpimage")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Generate Dockerfiles and SLURM batch scripts for an MPI test matrix",
    long_about = None
)]
pub struct Cli {
    /// Build Docker images instead of only printing the build commands
    #[arg(short = 'i', long = "image")]
    pub image: bool,

    /// List the configured targets and exit without generating anything
    #[arg(short = 's', long = "show_targets_only")]
    pub show_targets_only: bool,
}
