//! # 构建目标数据模型
//!
//! 表示一个 (machine, MPI 实现, 版本) 构建目标。
//!
//! ## 目标约定
//! - MPICH 无版本号 ("mpich") 表示安装发行版自带的包
//! - 带版本号 ("mpich-3.3.2", "openmpi-4.0.2") 表示从源码构建
//! - 机器为 "generic" 时必须显式给出 MPI 目标列表；
//!   具名集群（galaxy, pearcey）的 MPI 配置由基础镜像固定
//!
//! ## 依赖关系
//! - 被 `parsers/mpi_name.rs` 构造
//! - 被 `compose/` 和 `commands/` 使用

use crate::error::MpimageError;
use std::fmt;
use std::str::FromStr;

/// MPI 实现类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpiKind {
    Mpich,
    Openmpi,
}

impl MpiKind {
    /// 目标字符串中使用的关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            MpiKind::Mpich => "mpich",
            MpiKind::Openmpi => "openmpi",
        }
    }
}

impl fmt::Display for MpiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// MPI 版本号 (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl MpiVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        MpiVersion {
            major,
            minor,
            patch,
        }
    }

    /// OpenMPI 下载目录使用的 "major.minor" 形式
    pub fn minor_dir(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for MpiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// 一个 MPI 构建目标
///
/// 版本号缺失是有意义的配置：表示通过包管理器安装，
/// 而非从源码构建。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpiTarget {
    pub kind: MpiKind,
    pub version: Option<MpiVersion>,
}

impl MpiTarget {
    pub fn new(kind: MpiKind, version: Option<MpiVersion>) -> Self {
        MpiTarget { kind, version }
    }

    /// 规范化标识符，如 "mpich" 或 "openmpi-4.0.2"
    ///
    /// 用于镜像名、文件名和下载 URL；与解析器的输入语法一致，
    /// 因此 identifier -> parse 可以往返。
    pub fn identifier(&self) -> String {
        match self.version {
            Some(v) => format!("{}-{}", self.kind, v),
            None => self.kind.to_string(),
        }
    }
}

impl fmt::Display for MpiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// 目标机器
///
/// 封闭集合：generic 加上已知集群名。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
    /// 通用机器，需要显式选择 MPI
    Generic,
    /// Galaxy 集群（基础镜像内置 MPI）
    Galaxy,
    /// Pearcey 集群（基础镜像内置 MPI）
    Pearcey,
}

impl Machine {
    /// 配置与文件名中使用的名字
    pub fn name(&self) -> &'static str {
        match self {
            Machine::Generic => "generic",
            Machine::Galaxy => "galaxy",
            Machine::Pearcey => "pearcey",
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Machine::Generic)
    }

    /// 具名集群基础镜像内置的 MPI 实现；generic 没有
    pub fn fixed_mpi(&self) -> Option<MpiKind> {
        match self {
            Machine::Generic => None,
            Machine::Galaxy => Some(MpiKind::Mpich),
            Machine::Pearcey => Some(MpiKind::Openmpi),
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Machine {
    type Err = MpimageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(Machine::Generic),
            "galaxy" => Ok(Machine::Galaxy),
            "pearcey" => Ok(Machine::Pearcey),
            other => Err(MpimageError::InvalidMachineName(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpi_identifier_without_version() {
        let target = MpiTarget::new(MpiKind::Mpich, None);
        assert_eq!(target.identifier(), "mpich");
    }

    #[test]
    fn test_mpi_identifier_with_version() {
        let target = MpiTarget::new(MpiKind::Openmpi, Some(MpiVersion::new(4, 0, 2)));
        assert_eq!(target.identifier(), "openmpi-4.0.2");
    }

    #[test]
    fn test_minor_dir() {
        let version = MpiVersion::new(3, 1, 4);
        assert_eq!(version.minor_dir(), "3.1");
        assert_eq!(version.to_string(), "3.1.4");
    }

    #[test]
    fn test_machine_from_str() {
        assert_eq!("generic".parse::<Machine>().unwrap(), Machine::Generic);
        assert_eq!("galaxy".parse::<Machine>().unwrap(), Machine::Galaxy);
        assert_eq!("pearcey".parse::<Machine>().unwrap(), Machine::Pearcey);
        assert!("magnus".parse::<Machine>().is_err());
        assert!("".parse::<Machine>().is_err());
    }
}
