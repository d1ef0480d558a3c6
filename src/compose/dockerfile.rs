//! # Dockerfile 组装器
//!
//! 按 (machine, MPI) 目标生成 Dockerfile 文本和镜像名。
//!
//! ## 组装规则
//! - 具名集群（galaxy, pearcey）：固定基础镜像 + 固定工具链 +
//!   固定源码检出构建，没有 MPI 分支
//! - generic：公共工具链引导 + MPI 专属块 + 公共收尾块
//! - MPI 无版本号走包管理器安装，有版本号走源码下载构建
//!
//! 规范形式：每步一条 `RUN`，解压统一用 `tar -zxf`。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/targets.rs` 使用
//! - 使用 `models/target.rs`, `config.rs`

use crate::config::GeneratorConfig;
use crate::error::{MpimageError, Result};
use crate::models::{Machine, MpiKind, MpiTarget};

/// 自动生成文件头，保持静态以保证输出可复现
const GENERATED_HEADER: &str = "# This file is automatically generated by mpimage. Do not edit.\n";

/// 测试程序仓库
const TEST_REPO_URL: &str = "https://github.com/prlahur/testmpi.git";

/// 目标的规范标识符：generic 用 MPI 标识符（一台 generic 机器
/// 会产出多个镜像），具名集群用机器名
pub fn target_identifier(machine: Machine, mpi: Option<&MpiTarget>) -> Result<String> {
    match (machine, mpi) {
        (Machine::Generic, Some(target)) => Ok(target.identifier()),
        (Machine::Generic, None) => Err(MpimageError::MissingMpiList),
        (named, None) => Ok(named.name().to_string()),
        (named, Some(_)) => Err(MpimageError::UnexpectedMpiList {
            machine: named.name().to_string(),
        }),
    }
}

/// Dockerfile 文件名，如 "Dockerfile-openmpi-4.0.2"
pub fn dockerfile_name(machine: Machine, mpi: Option<&MpiTarget>) -> Result<String> {
    Ok(format!("Dockerfile-{}", target_identifier(machine, mpi)?))
}

/// 镜像名，如 "testmpi/openmpi-4.0.2:latest"
pub fn image_name(
    machine: Machine,
    mpi: Option<&MpiTarget>,
    config: &GeneratorConfig,
) -> Result<String> {
    Ok(format!(
        "{}{}{}",
        config.image_prefix,
        target_identifier(machine, mpi)?,
        config.image_suffix
    ))
}

/// 组装完整的 Dockerfile 文本
pub fn compose_dockerfile(
    machine: Machine,
    mpi: Option<&MpiTarget>,
    config: &GeneratorConfig,
) -> Result<String> {
    match (machine, mpi) {
        (Machine::Generic, Some(target)) => Ok(generic_dockerfile(target, config)),
        (Machine::Generic, None) => Err(MpimageError::MissingMpiList),
        (named, None) => Ok(fixed_dockerfile(named, config)),
        (named, Some(_)) => Err(MpimageError::UnexpectedMpiList {
            machine: named.name().to_string(),
        }),
    }
}

/// generic 机器：工具链引导 + MPI 专属块 + 收尾块
fn generic_dockerfile(mpi: &MpiTarget, config: &GeneratorConfig) -> String {
    let mut text = String::from(GENERATED_HEADER);

    text.push_str(
        "FROM ubuntu:18.04\n\
         RUN apt-get update\n\
         RUN apt-get upgrade -y\n\
         RUN apt-get autoremove -y\n\
         RUN apt-get install -y git make g++ wget\n",
    );

    if let Some(ref cmake_version) = config.cmake_version {
        text.push_str(&cmake_part(cmake_version, config.build_jobs));
    }

    text.push_str(&mpi_part(mpi, config.build_jobs));
    text.push_str(&common_bottom_part(config.build_jobs));
    text
}

/// 具名集群：固定基础镜像，MPI 已内置
fn fixed_dockerfile(machine: Machine, config: &GeneratorConfig) -> String {
    let base_image = match machine {
        Machine::Galaxy => "pawsey/mpich-base:3.1.4_ubuntu18.04",
        Machine::Pearcey => "csiro-hpc/pearcey-openmpi:3.1.4",
        // target_identifier 已拒绝 generic
        Machine::Generic => unreachable!("generic machine has no fixed base image"),
    };

    let mut text = String::from(GENERATED_HEADER);
    text.push_str(&format!("FROM {}\n", base_image));
    text.push_str(
        "RUN apt-get update\n\
         RUN apt-get install -y git make g++\n",
    );
    text.push_str(&common_bottom_part(config.build_jobs));
    text
}

/// 从源码构建较新的 CMake（发行版自带的版本太旧）
fn cmake_part(version: &str, jobs: u32) -> String {
    format!(
        "WORKDIR /home\n\
         RUN wget https://github.com/Kitware/CMake/releases/download/v{version}/cmake-{version}.tar.gz\n\
         RUN tar -zxf cmake-{version}.tar.gz\n\
         WORKDIR /home/cmake-{version}\n\
         RUN ./bootstrap\n\
         RUN make -j{jobs}\n\
         RUN make install\n"
    )
}

/// MPI 专属块
fn mpi_part(mpi: &MpiTarget, jobs: u32) -> String {
    match (mpi.kind, mpi.version) {
        // 无版本号：发行版打包的开发库
        (MpiKind::Mpich, None) => "RUN apt-get install -y mpich libmpich-dev\n".to_string(),
        (MpiKind::Openmpi, None) => {
            "RUN apt-get install -y openmpi-bin libopenmpi-dev\n".to_string()
        }

        (MpiKind::Mpich, Some(version)) => {
            let name = mpi.identifier();
            format!(
                "WORKDIR /home\n\
                 RUN wget http://www.mpich.org/static/downloads/{version}/{name}.tar.gz\n\
                 RUN tar -zxf {name}.tar.gz\n\
                 WORKDIR /home/{name}\n\
                 RUN ./configure --prefix=/home/$USER/mpich\n\
                 RUN make -j{jobs}\n\
                 RUN make install\n\
                 ENV PATH=$PATH:/home/$USER/mpich/bin\n\
                 ENV LD_LIBRARY_PATH=$LD_LIBRARY_PATH:/home/$USER/mpich/lib:/usr/local/lib\n"
            )
        }

        (MpiKind::Openmpi, Some(version)) => {
            // 下载目录由版本的前两个分量决定
            let name = mpi.identifier();
            let minor_dir = version.minor_dir();
            format!(
                "WORKDIR /home\n\
                 RUN wget https://download.open-mpi.org/release/open-mpi/v{minor_dir}/{name}.tar.gz\n\
                 RUN tar -zxf {name}.tar.gz\n\
                 WORKDIR /home/{name}\n\
                 RUN ./configure --prefix=/home/$USER/.openmpi\n\
                 RUN make -j{jobs} all install\n\
                 ENV PATH=$PATH:/home/$USER/.openmpi/bin\n\
                 ENV LD_LIBRARY_PATH=$LD_LIBRARY_PATH:/home/$USER/.openmpi/lib:/usr/local/lib\n"
            )
        }
    }
}

/// 公共收尾块：检出测试仓库、构建、非 root 用户
fn common_bottom_part(jobs: u32) -> String {
    format!(
        "WORKDIR /home\n\
         RUN git clone {TEST_REPO_URL}\n\
         WORKDIR /home/testmpi\n\
         RUN make -j{jobs}\n\
         ENV PATH=$PATH:/home/testmpi\n\
         RUN useradd -ms /bin/bash mpiuser\n\
         USER mpiuser\n"
    )
}
