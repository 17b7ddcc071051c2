// crates/pf_config/src/error.rs

//! 配置层错误类型

use pf_foundation::PfError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },
}

impl ConfigError {
    /// 无效值
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for PfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Parse(msg) => PfError::serialization(msg),
            other => PfError::config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_value("rules[0].region1", "0", "区域号从 1 开始");
        assert!(err.to_string().contains("rules[0].region1"));
    }

    #[test]
    fn test_conversion_to_pf_error() {
        let err = ConfigError::Parse("unexpected token".into());
        let pf: PfError = err.into();
        assert!(matches!(pf, PfError::Serialization { .. }));
    }
}
