//! # 目标列表命令实现
//!
//! 列出配置的全部目标及其派生的镜像名和文件名，不生成任何文件。
//! 无效条目以警告形式显示，退出码保持 0。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `compose/`, `utils/output.rs`
//! - 使用 `tabled` crate

use crate::commands::resolve_targets;
use crate::compose::{batch_file_name, dockerfile_name, image_name};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Machine")]
    machine: String,
    #[tabled(rename = "MPI")]
    mpi: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Dockerfile")]
    dockerfile: String,
    #[tabled(rename = "Batch script")]
    batch: String,
}

/// 执行目标列表命令
pub fn execute(config: &GeneratorConfig) -> Result<()> {
    output::print_header("Configured Targets");

    let mut rows = Vec::new();
    let mut invalid = 0usize;

    for (label, result) in resolve_targets(config) {
        // 名称派生的失败与解析失败同等对待：
        // 警告一条，列表照常输出，退出码保持 0
        let row = result.and_then(|target| {
            let mpi = target.mpi.as_ref();
            let mpi_column = match mpi {
                Some(t) => t.identifier(),
                // 具名集群：MPI 由基础镜像固定
                None => match target.machine.fixed_mpi() {
                    Some(kind) => format!("{} (fixed)", kind),
                    None => "-".to_string(),
                },
            };

            Ok(TargetRow {
                machine: target.machine.to_string(),
                mpi: mpi_column,
                image: image_name(target.machine, mpi, config)?,
                dockerfile: dockerfile_name(target.machine, mpi)?,
                batch: batch_file_name(target.machine, mpi, config)?,
            })
        });

        match row {
            Ok(r) => rows.push(r),
            Err(e) => {
                output::print_warning(&format!("{}: {}", label, e));
                invalid += 1;
            }
        }
    }

    println!("{}", Table::new(&rows));

    if invalid > 0 {
        output::print_warning(&format!("{} invalid entries not shown", invalid));
    }
    output::print_info(&format!("{} valid targets", rows.len()));

    Ok(())
}
