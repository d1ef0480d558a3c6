//! # 命令执行模块
//!
//! 实现各运行模式的业务逻辑，并提供配置目标的展开。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `models/`, `parsers/`
//! - 子模块: generate, targets

pub mod generate;
pub mod targets;

use crate::cli::Cli;
use crate::config::GeneratorConfig;
use crate::error::{MpimageError, Result};
use crate::models::{Machine, MpiTarget};
use crate::parsers::parse_mpi_name;

/// 执行命令
pub fn run(cli: Cli, config: &GeneratorConfig) -> Result<()> {
    if cli.show_targets_only {
        targets::execute(config)
    } else {
        generate::execute(config, cli.image)
    }
}

/// 一个展开并解析完成的目标
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub machine: Machine,
    pub mpi: Option<MpiTarget>,
}

/// 把配置展开成逐个目标的解析结果
///
/// 每个元素是 (显示用的原始标识, 解析结果)。解析失败不会中断
/// 展开：坏条目只影响它自己，批处理语义由调用方保证。
pub fn resolve_targets(
    config: &GeneratorConfig,
) -> Vec<(String, Result<ResolvedTarget>)> {
    let mut resolved = Vec::new();

    for spec in &config.machine_targets {
        let machine = match spec.machine.parse::<Machine>() {
            Ok(m) => m,
            Err(e) => {
                resolved.push((spec.machine.clone(), Err(e)));
                continue;
            }
        };

        if machine.is_generic() {
            if spec.mpi_targets.is_empty() {
                resolved.push((spec.machine.clone(), Err(MpimageError::MissingMpiList)));
                continue;
            }
            for raw in &spec.mpi_targets {
                let label = format!("{}/{}", spec.machine, raw);
                let result = parse_mpi_name(raw).map(|mpi| ResolvedTarget {
                    machine,
                    mpi: Some(mpi),
                });
                resolved.push((label, result));
            }
        } else {
            let result = if spec.mpi_targets.is_empty() {
                Ok(ResolvedTarget { machine, mpi: None })
            } else {
                Err(MpimageError::UnexpectedMpiList {
                    machine: spec.machine.clone(),
                })
            };
            resolved.push((spec.machine.clone(), result));
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineSpec;

    #[test]
    fn test_resolve_default_config() {
        let config = GeneratorConfig::default();
        let resolved = resolve_targets(&config);

        // 4 个 generic MPI 目标 + galaxy + pearcey
        assert_eq!(resolved.len(), 6);
        assert!(resolved.iter().all(|(_, r)| r.is_ok()));
        assert_eq!(resolved[0].0, "generic/mpich");
        assert_eq!(resolved[4].0, "galaxy");
    }

    #[test]
    fn test_bad_entry_does_not_block_others() {
        let mut config = GeneratorConfig::default();
        config.machine_targets = vec![
            MachineSpec::generic(&["mpich", "notanmpi-1.2.3", "openmpi-4.0.2"]),
            MachineSpec::named("magnus"),
            MachineSpec::named("galaxy"),
        ];

        let resolved = resolve_targets(&config);
        assert_eq!(resolved.len(), 5);

        let ok_count = resolved.iter().filter(|(_, r)| r.is_ok()).count();
        assert_eq!(ok_count, 3);
        assert!(resolved[1].1.is_err());
        assert!(resolved[3].1.is_err());
        assert!(resolved[4].1.is_ok());
    }

    #[test]
    fn test_named_machine_with_mpi_list_rejected() {
        let mut config = GeneratorConfig::default();
        config.machine_targets = vec![MachineSpec {
            machine: "galaxy".to_string(),
            mpi_targets: vec!["mpich".to_string()],
        }];

        let resolved = resolve_targets(&config);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(
            resolved[0].1,
            Err(MpimageError::UnexpectedMpiList { .. })
        ));
    }

    #[test]
    fn test_generic_without_mpi_list_rejected() {
        let mut config = GeneratorConfig::default();
        config.machine_targets = vec![MachineSpec::generic(&[])];

        let resolved = resolve_targets(&config);
        assert_eq!(resolved.len(), 1);
        assert!(matches!(resolved[0].1, Err(MpimageError::MissingMpiList)));
    }
}
