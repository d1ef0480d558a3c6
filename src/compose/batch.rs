//! # SLURM 批处理脚本组装器
//!
//! 为每个目标生成 sbatch 提交脚本，在集群上通过容器运行测试程序。
//!
//! ## 文件名约定
//! `{前缀或机器名}-{MPI 标识符}.sbatch`，如 "mpitest-openmpi-4.0.2.sbatch"、
//! "galaxy-mpich.sbatch"。
//!
//! 无版本号统一表示为显式的 absent 值，与解析器约定一致，
//! 不存在按空字符串或 None 各自判断的分叉。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/targets.rs` 使用
//! - 使用 `models/target.rs`, `config.rs`

use crate::config::GeneratorConfig;
use crate::error::{MpimageError, Result};
use crate::models::{Machine, MpiTarget};

/// 机器上需要加载的环境模块
fn machine_modules(machine: Machine) -> &'static [&'static str] {
    match machine {
        Machine::Generic => &["singularity"],
        Machine::Galaxy => &["singularity", "mpich/3.1.4"],
        Machine::Pearcey => &["singularity", "openmpi/3.1.4"],
    }
}

/// 批处理文件名前缀：generic 用配置前缀，具名集群用机器名
fn batch_prefix<'a>(machine: Machine, config: &'a GeneratorConfig) -> &'a str {
    if machine.is_generic() {
        &config.batch.prefix
    } else {
        machine.name()
    }
}

/// 目标在批处理文件名与作业名中使用的 MPI 标识符
fn batch_mpi_identifier(machine: Machine, mpi: Option<&MpiTarget>) -> Result<String> {
    match (machine, mpi) {
        (Machine::Generic, Some(target)) => Ok(target.identifier()),
        (Machine::Generic, None) => Err(MpimageError::MissingMpiList),
        (named, None) => {
            // 具名集群的 MPI 由基础镜像固定
            match named.fixed_mpi() {
                Some(kind) => Ok(kind.keyword().to_string()),
                None => Err(MpimageError::InvalidMachineName(named.name().to_string())),
            }
        }
        (named, Some(_)) => Err(MpimageError::UnexpectedMpiList {
            machine: named.name().to_string(),
        }),
    }
}

/// 批处理文件名，如 "mpitest-mpich.sbatch"
pub fn batch_file_name(
    machine: Machine,
    mpi: Option<&MpiTarget>,
    config: &GeneratorConfig,
) -> Result<String> {
    Ok(format!(
        "{}-{}.sbatch",
        batch_prefix(machine, config),
        batch_mpi_identifier(machine, mpi)?
    ))
}

/// 组装 sbatch 脚本文本
pub fn compose_batch_script(
    machine: Machine,
    mpi: Option<&MpiTarget>,
    image: &str,
    config: &GeneratorConfig,
) -> Result<String> {
    let job_name = format!(
        "{}-{}",
        batch_prefix(machine, config),
        batch_mpi_identifier(machine, mpi)?
    );

    let module_loads = machine_modules(machine)
        .iter()
        .map(|m| format!("module load {}", m))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "#!/bin/bash -l\n\
         # This file is automatically generated by mpimage. Do not edit.\n\
         #SBATCH --job-name={job_name}\n\
         #SBATCH --ntasks={ntasks}\n\
         #SBATCH --time={time_limit}\n\
         #SBATCH --export=NONE\n\
         \n\
         {module_loads}\n\
         \n\
         mpirun -n {ntasks} singularity exec docker://{image} {binary}\n",
        ntasks = config.batch.ntasks,
        time_limit = config.batch.time_limit,
        binary = config.batch.binary,
    ))
}
