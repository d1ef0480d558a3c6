//! # mpimage - MPI 容器镜像与批处理脚本生成工具
//!
//! 为一组 (machine, MPI 实现, 版本) 目标生成 Dockerfile 和
//! SLURM sbatch 脚本，并可选地调用 docker build。
//!
//! ## 运行模式
//! - 默认 - 写出文件，docker 命令只显示不执行
//! - `--image` - 真正执行 docker build
//! - `--show_targets_only` - 只列出配置的目标
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── compose/   (Dockerfile 与 sbatch 文本组装)
//!   │     ├── parsers/   (目标标识符解析)
//!   │     └── models/    (数据模型)
//!   ├── config.rs   (加载期常量配置)
//!   ├── utils/      (名称校验、终端输出)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod compose;
mod config;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;
use config::GeneratorConfig;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    let config = GeneratorConfig::default();

    if let Err(e) = commands::run(cli, &config) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
