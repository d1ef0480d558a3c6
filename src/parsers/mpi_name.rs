//! # MPI 目标标识符解析器
//!
//! 把原始字符串分解为 (实现类型, 可选版本号)。
//!
//! ## 标识符语法
//! ```text
//! "mpich"           -> MPICH，包管理器安装
//! "mpich-3.3.2"     -> MPICH 3.3.2，源码构建
//! "openmpi"         -> OpenMPI，包管理器安装
//! "openmpi-4.0.2"   -> OpenMPI 4.0.2，源码构建
//! ```
//! 版本后缀通过提取所有连续数字串解析，必须恰好得到 3 个整数。
//! 这里的输入最终会拼入 shell 命令，所以解析必须严格：
//! 不认识的输入一律报错，绝不猜测。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/target.rs`
//! - 使用 `regex` crate

use crate::error::{MpimageError, Result};
use crate::models::{MpiKind, MpiTarget, MpiVersion};
use regex::Regex;

/// 解析 MPI 目标标识符
pub fn parse_mpi_name(raw: &str) -> Result<MpiTarget> {
    let kind = if raw.starts_with(MpiKind::Openmpi.keyword()) {
        MpiKind::Openmpi
    } else if raw.starts_with(MpiKind::Mpich.keyword()) {
        MpiKind::Mpich
    } else {
        return Err(invalid(
            raw,
            "unrecognized implementation (expected 'mpich' or 'openmpi')",
        ));
    };

    let rest = &raw[kind.keyword().len()..];
    if rest.is_empty() {
        // 无版本号：包管理器安装
        return Ok(MpiTarget::new(kind, None));
    }

    let version_str = match rest.strip_prefix('-') {
        Some(s) => s,
        None => {
            return Err(invalid(
                raw,
                "expected '-' between implementation and version",
            ))
        }
    };

    let version = parse_version(raw, version_str)?;
    Ok(MpiTarget::new(kind, Some(version)))
}

/// 从版本后缀中提取所有连续数字串，要求恰好 3 个
fn parse_version(raw: &str, version_str: &str) -> Result<MpiVersion> {
    let digit_run = Regex::new(r"\d+").unwrap();

    let mut numbers = Vec::new();
    for m in digit_run.find_iter(version_str) {
        let n: u32 = m
            .as_str()
            .parse()
            .map_err(|_| invalid(raw, "version component out of range"))?;
        numbers.push(n);
    }

    if numbers.len() != 3 {
        return Err(invalid(
            raw,
            "version must have exactly 3 numeric components (major.minor.patch)",
        ));
    }

    Ok(MpiVersion::new(numbers[0], numbers[1], numbers[2]))
}

fn invalid(raw: &str, reason: &str) -> MpimageError {
    MpimageError::InvalidMpiName {
        name: raw.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_mpich() {
        let target = parse_mpi_name("mpich").unwrap();
        assert_eq!(target.kind, MpiKind::Mpich);
        assert_eq!(target.version, None);
    }

    #[test]
    fn test_parse_bare_openmpi() {
        let target = parse_mpi_name("openmpi").unwrap();
        assert_eq!(target.kind, MpiKind::Openmpi);
        assert_eq!(target.version, None);
    }

    #[test]
    fn test_parse_mpich_with_version() {
        let target = parse_mpi_name("mpich-3.3.2").unwrap();
        assert_eq!(target.kind, MpiKind::Mpich);
        assert_eq!(target.version, Some(MpiVersion::new(3, 3, 2)));
    }

    #[test]
    fn test_parse_openmpi_with_version() {
        let target = parse_mpi_name("openmpi-4.0.2").unwrap();
        assert_eq!(target.kind, MpiKind::Openmpi);
        assert_eq!(target.version, Some(MpiVersion::new(4, 0, 2)));
    }

    #[test]
    fn test_identifier_round_trip() {
        for raw in ["mpich", "mpich-3.3.2", "openmpi", "openmpi-4.0.2"] {
            let target = parse_mpi_name(raw).unwrap();
            assert_eq!(target.identifier(), raw);
            assert_eq!(parse_mpi_name(&target.identifier()).unwrap(), target);
        }
    }

    #[test]
    fn test_unknown_implementation_rejected() {
        assert!(parse_mpi_name("lammpi").is_err());
        assert!(parse_mpi_name("intelmpi-2019.0.1").is_err());
        assert!(parse_mpi_name("").is_err());
        assert!(parse_mpi_name("mpi").is_err());
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(parse_mpi_name("mpich3.3.2").is_err());
        assert!(parse_mpi_name("openmpi4.0.2").is_err());
        assert!(parse_mpi_name("mpichx").is_err());
    }

    #[test]
    fn test_wrong_component_count_rejected() {
        assert!(parse_mpi_name("mpich-").is_err());
        assert!(parse_mpi_name("mpich-3").is_err());
        assert!(parse_mpi_name("mpich-3.3").is_err());
        assert!(parse_mpi_name("openmpi-4.0.2.1").is_err());
        assert!(parse_mpi_name("openmpi-4.0.x").is_err());
    }

    #[test]
    fn test_version_with_odd_separators_still_three_runs() {
        // 数字串提取对分隔符不敏感，只要恰好 3 个
        let target = parse_mpi_name("openmpi-4_0_2").unwrap();
        assert_eq!(target.version, Some(MpiVersion::new(4, 0, 2)));
    }

    #[test]
    fn test_huge_component_rejected() {
        assert!(parse_mpi_name("mpich-99999999999.0.0").is_err());
    }
}
