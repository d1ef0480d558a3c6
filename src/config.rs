//! # 生成器配置
//!
//! 所有目标与命名约定都是加载期常量：在 `main` 构造一次，
//! 按引用传给各命令，运行期间不再修改。
//! 目标列表保持原始字符串形式，逐个目标在运行时解析，
//! 这样一条写错的配置只会让它自己的目标失败，不会拖垮整批。
//!
//! ## 依赖关系
//! - 被 `main.rs` 构造
//! - 被 `commands/`, `compose/` 读取

use std::path::PathBuf;

/// 一台机器及其请求的 MPI 目标
///
/// `machine == "generic"` 时 `mpi_targets` 必须非空；
/// 具名集群的 MPI 由基础镜像固定，`mpi_targets` 必须为空。
#[derive(Debug, Clone)]
pub struct MachineSpec {
    pub machine: String,
    pub mpi_targets: Vec<String>,
}

impl MachineSpec {
    pub fn generic(mpi_targets: &[&str]) -> Self {
        MachineSpec {
            machine: "generic".to_string(),
            mpi_targets: mpi_targets.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn named(machine: &str) -> Self {
        MachineSpec {
            machine: machine.to_string(),
            mpi_targets: Vec::new(),
        }
    }
}

/// 批处理脚本的资源请求默认值
#[derive(Debug, Clone)]
pub struct BatchDefaults {
    /// 通用机器批处理文件名与作业名前缀
    pub prefix: String,
    /// MPI 进程数
    pub ntasks: u32,
    /// 墙钟时间限制
    pub time_limit: String,
    /// 容器内测试程序路径
    pub binary: String,
}

/// 生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 要处理的 (machine, MPI) 目标，按声明顺序处理
    pub machine_targets: Vec<MachineSpec>,
    /// 镜像名前缀，如 "testmpi/"
    pub image_prefix: String,
    /// 镜像名后缀，如 ":latest"
    pub image_suffix: String,
    /// 镜像内 make 的并行度
    pub build_jobs: u32,
    /// 从源码构建的 CMake 版本；None 表示用发行版自带的
    pub cmake_version: Option<String>,
    /// 生成文件的输出目录；空表示当前目录
    pub output_dir: PathBuf,
    pub batch: BatchDefaults,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            machine_targets: vec![
                MachineSpec::generic(&[
                    "mpich",
                    "openmpi-4.0.2",
                    "openmpi-3.1.4",
                    "openmpi-2.1.6",
                ]),
                MachineSpec::named("galaxy"),
                MachineSpec::named("pearcey"),
            ],
            image_prefix: "testmpi/".to_string(),
            image_suffix: ":latest".to_string(),
            build_jobs: 4,
            cmake_version: Some("3.15.4".to_string()),
            output_dir: PathBuf::new(),
            batch: BatchDefaults {
                prefix: "mpitest".to_string(),
                ntasks: 4,
                time_limit: "00:10:00".to_string(),
                binary: "/home/testmpi/mpi_hello_world".to_string(),
            },
        }
    }
}
