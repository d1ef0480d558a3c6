//! # 名称合法性检查
//!
//! 所有用户可控的名称段（机器名、MPI 标识符、文件名、镜像名）
//! 在拼入 shell 命令之前都必须通过这里的检查。
//! 这是对命令注入的唯一防线：非法名称直接报错，绝不静默清洗。
//!
//! ## 依赖关系
//! - 被 `models/artifact.rs`, `commands/generate.rs` 使用

use crate::error::{MpimageError, Result};

/// shell 元字符与其他危险字符
///
/// 注意 `/`、`:`、`.`、`-`、`_` 是合法的：
/// 镜像标签（repo/name:tag）和文件名需要它们。
const FORBIDDEN_CHARS: &[char] = &[
    ';', '|', '&', '$', '>', '<', '`', '\'', '"', '\\', '*', '?', '(', ')', '{', '}', '[', ']',
    '~', '!', '#', '^',
];

/// 名称是否可以安全地拼入 shell 命令
///
/// 合法名称非空，不含空白、控制字符和 shell 元字符。
pub fn is_proper_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(&c))
}

/// 检查名称，非法时返回带原因的错误
pub fn check_name(name: &str, what: &str) -> Result<()> {
    if is_proper_name(name) {
        return Ok(());
    }

    if name.is_empty() {
        return Err(MpimageError::InvalidName {
            name: name.to_string(),
            reason: format!("{} must not be empty", what),
        });
    }

    let bad = name
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(c))
        .unwrap_or('?');
    Err(MpimageError::InvalidName {
        name: name.to_string(),
        reason: format!("{} contains forbidden character {:?}", what, bad),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proper_names() {
        assert!(is_proper_name("mpich"));
        assert!(is_proper_name("openmpi-4.0.2"));
        assert!(is_proper_name("testmpi/openmpi-4.0.2:latest"));
        assert!(is_proper_name("Dockerfile-galaxy"));
        assert!(is_proper_name("pearcey-mpich.sbatch"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(!is_proper_name(""));
        assert!(check_name("", "image name").is_err());
    }

    #[test]
    fn test_shell_metacharacters_rejected() {
        assert!(!is_proper_name("mpich; rm -rf /"));
        assert!(!is_proper_name("mpich|cat"));
        assert!(!is_proper_name("mpich&"));
        assert!(!is_proper_name("$(whoami)"));
        assert!(!is_proper_name("mpich`id`"));
        assert!(!is_proper_name("open mpi"));
        assert!(!is_proper_name("mpich\n"));
        assert!(!is_proper_name("mpich\t4"));
    }

    #[test]
    fn test_check_name_reports_character() {
        let err = check_name("bad;name", "file name").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("';'"));
        assert!(msg.contains("file name"));
    }
}
