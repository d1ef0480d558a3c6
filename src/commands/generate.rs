//! # 生成命令实现
//!
//! 逐个目标组装 Dockerfile 与 sbatch 脚本并写盘，
//! 然后按运行模式显示或执行 docker build。
//!
//! ## 批处理语义
//! - 目标按配置声明顺序处理
//! - 单个目标的校验、写盘或构建失败只上报该目标，循环继续
//! - 不重试，外部构建不设超时
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `compose/`, `models/artifact.rs`, `utils/`

use crate::commands::{resolve_targets, ResolvedTarget};
use crate::compose::{batch_file_name, compose_batch_script, compose_dockerfile, dockerfile_name, image_name};
use crate::config::GeneratorConfig;
use crate::error::{MpimageError, Result};
use crate::models::BuildArtifact;
use crate::utils::name::check_name;
use crate::utils::output;

use std::fs;

/// 执行生成（以及可选的构建）
pub fn execute(config: &GeneratorConfig, build: bool) -> Result<()> {
    output::print_header("MPI Container Image Generation");

    let dry_run = !build;
    if dry_run {
        output::print_info("Dry run: docker build commands will be shown, not executed");
    }

    let resolved = resolve_targets(config);
    output::print_info(&format!("There are {} configured targets", resolved.len()));

    let mut generated = 0usize;
    let mut built = 0usize;
    let mut failed = 0usize;

    for (label, result) in resolved {
        let target = match result {
            Ok(t) => t,
            Err(e) => {
                output::print_error(&format!("{}: {}", label, e));
                failed += 1;
                continue;
            }
        };

        match process_target(&target, config, dry_run) {
            Ok(()) => {
                generated += 1;
                if !dry_run {
                    built += 1;
                }
            }
            Err(e) => {
                output::print_error(&format!("{}: {}", label, e));
                failed += 1;
            }
        }
    }

    output::print_separator();
    if failed > 0 {
        output::print_warning(&format!("{} targets failed", failed));
    }
    output::print_done(&format!(
        "Generated {} targets, built {} images",
        generated, built
    ));

    Ok(())
}

/// 处理单个目标：组装、写盘、显示或执行构建
fn process_target(target: &ResolvedTarget, config: &GeneratorConfig, dry_run: bool) -> Result<()> {
    let mpi = target.mpi.as_ref();

    let image = image_name(target.machine, mpi, config)?;
    let recipe_file = dockerfile_name(target.machine, mpi)?;
    let recipe_path = config
        .output_dir
        .join(&recipe_file)
        .to_string_lossy()
        .into_owned();
    let content = compose_dockerfile(target.machine, mpi, config)?;

    // 工厂校验所有名称段，坏名称在拼入任何命令前被拒绝
    let artifact = BuildArtifact::new(recipe_path, content, image)?;

    artifact.persist()?;
    output::print_success(&format!("Wrote {}", artifact.recipe_file()));

    write_batch_script(target, artifact.image(), config)?;

    artifact.execute_build(dry_run)?;
    if !dry_run {
        output::print_success(&format!("Built image {}", artifact.image()));
    }

    Ok(())
}

/// 生成并写出该目标的 sbatch 脚本
fn write_batch_script(
    target: &ResolvedTarget,
    image: &str,
    config: &GeneratorConfig,
) -> Result<()> {
    let mpi = target.mpi.as_ref();

    let file_name = batch_file_name(target.machine, mpi, config)?;
    check_name(&file_name, "batch file name")?;

    let path = config.output_dir.join(&file_name);
    let script = compose_batch_script(target.machine, mpi, image, config)?;
    fs::write(&path, script).map_err(|e| MpimageError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    output::print_success(&format!("Wrote {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineSpec;
    use std::path::PathBuf;

    fn temp_config(dir_name: &str) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.output_dir = std::env::temp_dir().join(dir_name);
        config
    }

    #[test]
    fn test_bad_middle_target_still_writes_others() {
        let mut config = temp_config("mpimage-test-generate-batch");
        config.machine_targets = vec![MachineSpec::generic(&[
            "mpich",
            "lammpi-1.2.3",
            "openmpi-4.0.2",
        ])];
        fs::create_dir_all(&config.output_dir).unwrap();

        // dry-run：写文件，不碰 docker
        execute(&config, false).unwrap();

        assert!(config.output_dir.join("Dockerfile-mpich").exists());
        assert!(config.output_dir.join("Dockerfile-openmpi-4.0.2").exists());
        assert!(config.output_dir.join("mpitest-mpich.sbatch").exists());
        assert!(config
            .output_dir
            .join("mpitest-openmpi-4.0.2.sbatch")
            .exists());
        assert!(!config.output_dir.join("Dockerfile-lammpi-1.2.3").exists());

        fs::remove_dir_all(&config.output_dir).ok();
    }

    #[test]
    fn test_written_recipe_matches_composed_text() {
        let mut config = temp_config("mpimage-test-generate-content");
        config.machine_targets = vec![MachineSpec::named("galaxy")];
        fs::create_dir_all(&config.output_dir).unwrap();

        execute(&config, false).unwrap();

        let written = fs::read_to_string(config.output_dir.join("Dockerfile-galaxy")).unwrap();
        let composed = compose_dockerfile(crate::models::Machine::Galaxy, None, &config).unwrap();
        assert_eq!(written, composed);

        fs::remove_dir_all(&config.output_dir).ok();
    }

    #[test]
    fn test_persist_failure_does_not_abort_batch() {
        let mut config = GeneratorConfig::default();
        config.output_dir = PathBuf::from("/nonexistent-dir/mpimage-generate");
        config.machine_targets = vec![MachineSpec::generic(&["mpich", "openmpi-4.0.2"])];

        // 每个目标的写盘都失败，但批处理照常跑完
        assert!(execute(&config, false).is_ok());
    }
}
