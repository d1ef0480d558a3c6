//! # 构建产物
//!
//! 绑定一个目标的 Dockerfile 文件名、文本内容和镜像名。
//! 通过校验工厂函数构造：要么得到完整、字段合法的产物，
//! 要么构造失败，不存在半初始化状态。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `utils/name.rs` 校验、`utils/output.rs` 显示 dry-run 命令

use crate::error::{MpimageError, Result};
use crate::utils::name::check_name;
use crate::utils::output;

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// 一个目标的构建产物
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    recipe_file: String,
    content: String,
    image: String,
}

impl BuildArtifact {
    /// 校验并构造
    ///
    /// 三个字段都必须非空；文件名和镜像名还要通过名称合法性检查，
    /// 因为它们会拼入 docker 命令。
    pub fn new(recipe_file: String, content: String, image: String) -> Result<Self> {
        if recipe_file.is_empty() {
            return Err(MpimageError::ArtifactIncomplete {
                field: "recipe file name".to_string(),
            });
        }
        if content.is_empty() {
            return Err(MpimageError::ArtifactIncomplete {
                field: "recipe content".to_string(),
            });
        }
        if image.is_empty() {
            return Err(MpimageError::ArtifactIncomplete {
                field: "image name".to_string(),
            });
        }

        check_name(&recipe_file, "recipe file name")?;
        check_name(&image, "image name")?;

        Ok(BuildArtifact {
            recipe_file,
            content,
            image,
        })
    }

    pub fn recipe_file(&self) -> &str {
        &self.recipe_file
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// 把 Dockerfile 内容写入磁盘
    ///
    /// 文件句柄在所有退出路径上都会关闭（RAII）。
    pub fn persist(&self) -> Result<()> {
        let mut file = File::create(&self.recipe_file).map_err(|e| MpimageError::FileWriteError {
            path: self.recipe_file.clone(),
            source: e,
        })?;

        file.write_all(self.content.as_bytes())
            .map_err(|e| MpimageError::FileWriteError {
                path: self.recipe_file.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// docker 构建命令（纯函数，不产生副作用）
    ///
    /// 字段在构造时已校验非空，这里不会失败。
    pub fn build_command(&self) -> String {
        format!("docker build -t {} -f {} .", self.image, self.recipe_file)
    }

    /// 执行（或在 dry-run 下只显示）docker 构建
    ///
    /// dry-run 只打印命令，从不失败；真实构建前先确认 Dockerfile
    /// 在磁盘上存在，防止调用方跳过了 `persist`。
    /// 不重试，不设超时，外部命令的失败按原样上报。
    pub fn execute_build(&self, dry_run: bool) -> Result<()> {
        let command = self.build_command();

        if dry_run {
            output::print_dry(&command);
            return Ok(());
        }

        if !Path::new(&self.recipe_file).exists() {
            return Err(MpimageError::ArtifactMissing {
                path: self.recipe_file.clone(),
            });
        }

        let status = Command::new("docker")
            .args(["build", "-t", &self.image, "-f", &self.recipe_file, "."])
            .status()
            .map_err(|e| MpimageError::CommandNotFound {
                command: command.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(MpimageError::CommandFailed {
                command,
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
