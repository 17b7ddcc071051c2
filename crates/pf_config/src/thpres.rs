// crates/pf_config/src/thpres.rs

//! 阈值压力选项（全 f64）
//!
//! 对应甲板文件中 EQLDIMS / THPRES / THPRESFT 关键字携带的数据。
//! 甲板解析由外部完成，这里只接收解析结果并提供规则查询。
//!
//! 区域号沿用甲板的 1 基约定，查询接口对区域对的顺序不敏感；
//! 同一区域对出现多条规则时，后出现的记录覆盖先出现的。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::precision::Precision;

/// 平衡区域维度声明 (EQLDIMS)
///
/// 只保留阈值压力子系统需要的第一项：声明的平衡区域数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquilDims {
    /// 声明的平衡区域数
    #[serde(default = "default_num_equil_regions")]
    pub num_equil_regions: usize,
}

fn default_num_equil_regions() -> usize {
    1
}

impl Default for EquilDims {
    fn default() -> Self {
        Self {
            num_equil_regions: default_num_equil_regions(),
        }
    }
}

/// 区域对障壁规则 (THPRES 记录)
///
/// 声明两个平衡区域之间存在阈值压力障壁。`value` 缺省时
/// 该区域对使用模拟器估算的默认阈值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionPairRule {
    /// 第一个平衡区域号（1 基）
    pub region1: usize,
    /// 第二个平衡区域号（1 基）
    pub region2: usize,
    /// 显式阈值压力 [Pa]
    #[serde(default)]
    pub value: Option<f64>,
}

impl RegionPairRule {
    /// 带显式值的规则
    pub fn with_value(region1: usize, region2: usize, value: f64) -> Self {
        Self {
            region1,
            region2,
            value: Some(value),
        }
    }

    /// 使用默认估算值的规则
    pub fn defaulted(region1: usize, region2: usize) -> Self {
        Self {
            region1,
            region2,
            value: None,
        }
    }

    /// 归一化的无序区域对
    #[inline]
    fn key(&self) -> (usize, usize) {
        normalize_pair(self.region1, self.region2)
    }
}

#[inline]
fn normalize_pair(r1: usize, r2: usize) -> (usize, usize) {
    (r1.min(r2), r1.max(r2))
}

/// 断层阈值记录 (THPRESFT 记录，实验特性)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultThresholdRecord {
    /// 断层名，与断层集合中的名字精确匹配（大小写敏感）
    pub fault_name: String,
    /// 该断层的阈值压力 [Pa]
    pub value: f64,
}

impl FaultThresholdRecord {
    /// 创建断层阈值记录
    pub fn new(fault_name: impl Into<String>, value: f64) -> Self {
        Self {
            fault_name: fault_name.into(),
            value,
        }
    }
}

/// 阈值压力选项（全 f64）
///
/// 包含子系统的全部甲板输入，使用 f64 存储以便 JSON 序列化。
/// 构建查询表时根据 `precision` 字段转换到 f32 或 f64。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThresholdPressureOptions {
    /// 矩阵存储精度
    #[serde(default)]
    pub precision: Precision,

    /// 是否启用阈值压力（甲板中出现 THPRES）
    #[serde(default)]
    pub active: bool,

    /// 是否为重启运行（矩阵由重启文件注入，跳过估算与覆盖）
    #[serde(default)]
    pub restart: bool,

    /// 是否启用实验特性（断层阈值）
    #[serde(default)]
    pub experimental: bool,

    /// 区域对障壁规则
    #[serde(default)]
    pub rules: Vec<RegionPairRule>,

    /// 断层阈值记录，仅在 `experimental` 开启时生效
    #[serde(default)]
    pub fault_rules: Vec<FaultThresholdRecord>,
}

impl ThresholdPressureOptions {
    /// 子系统是否启用
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 区域对（1 基，顺序不敏感）之间是否声明了障壁
    pub fn has_region_barrier(&self, r1: usize, r2: usize) -> bool {
        self.find_rule(r1, r2).is_some()
    }

    /// 区域对的显式阈值；规则存在但值缺省时返回 None
    pub fn explicit_value(&self, r1: usize, r2: usize) -> Option<f64> {
        self.find_rule(r1, r2).and_then(|rule| rule.value)
    }

    /// 后出现的记录覆盖先出现的
    fn find_rule(&self, r1: usize, r2: usize) -> Option<&RegionPairRule> {
        let key = normalize_pair(r1, r2);
        self.rules.iter().rev().find(|rule| rule.key() == key)
    }

    /// 验证选项有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.region1 == 0 || rule.region2 == 0 {
                return Err(ConfigError::invalid_value(
                    format!("rules[{}]", i),
                    format!("({}, {})", rule.region1, rule.region2),
                    "区域号从 1 开始",
                ));
            }
            if rule.region1 == rule.region2 {
                return Err(ConfigError::invalid_value(
                    format!("rules[{}]", i),
                    rule.region1.to_string(),
                    "障壁必须声明在两个不同的区域之间",
                ));
            }
            if let Some(v) = rule.value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::invalid_value(
                        format!("rules[{}].value", i),
                        v.to_string(),
                        "阈值压力必须为非负的有限值",
                    ));
                }
            }
        }

        for (i, record) in self.fault_rules.iter().enumerate() {
            if !record.value.is_finite() || record.value < 0.0 {
                return Err(ConfigError::invalid_value(
                    format!("fault_rules[{}].value", i),
                    record.value.to_string(),
                    "阈值压力必须为非负的有限值",
                ));
            }
        }

        Ok(())
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// 序列化为 JSON 字符串
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_inactive() {
        let options = ThresholdPressureOptions::default();
        assert!(!options.is_active());
        assert!(!options.restart);
        assert!(options.validate().is_ok());
        assert_eq!(options.precision, Precision::F64);
    }

    #[test]
    fn test_barrier_lookup_is_order_insensitive() {
        let options = ThresholdPressureOptions {
            active: true,
            rules: vec![RegionPairRule::with_value(1, 2, 1e5)],
            ..Default::default()
        };

        assert!(options.has_region_barrier(1, 2));
        assert!(options.has_region_barrier(2, 1));
        assert_eq!(options.explicit_value(2, 1), Some(1e5));
        assert!(!options.has_region_barrier(1, 3));
    }

    #[test]
    fn test_defaulted_rule_has_no_explicit_value() {
        let options = ThresholdPressureOptions {
            active: true,
            rules: vec![RegionPairRule::defaulted(1, 2)],
            ..Default::default()
        };

        assert!(options.has_region_barrier(1, 2));
        assert_eq!(options.explicit_value(1, 2), None);
    }

    #[test]
    fn test_later_rule_overrides_earlier() {
        let options = ThresholdPressureOptions {
            active: true,
            rules: vec![
                RegionPairRule::with_value(1, 2, 1e5),
                RegionPairRule::with_value(2, 1, 3e5),
            ],
            ..Default::default()
        };

        assert_eq!(options.explicit_value(1, 2), Some(3e5));
    }

    #[test]
    fn test_validate_rejects_zero_region() {
        let options = ThresholdPressureOptions {
            rules: vec![RegionPairRule::defaulted(0, 2)],
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_same_region_pair() {
        let options = ThresholdPressureOptions {
            rules: vec![RegionPairRule::defaulted(3, 3)],
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_value() {
        let options = ThresholdPressureOptions {
            rules: vec![RegionPairRule::with_value(1, 2, -5.0)],
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = ThresholdPressureOptions {
            fault_rules: vec![FaultThresholdRecord::new("F1", f64::NAN)],
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let options = ThresholdPressureOptions {
            precision: Precision::F32,
            active: true,
            experimental: true,
            rules: vec![RegionPairRule::with_value(1, 2, 2.5e5)],
            fault_rules: vec![FaultThresholdRecord::new("MAIN_FAULT", 7.0)],
            ..Default::default()
        };

        let json = options.to_json_string().unwrap();
        let parsed = ThresholdPressureOptions::from_json_str(&json).unwrap();
        assert_eq!(parsed.precision, Precision::F32);
        assert_eq!(parsed.rules, options.rules);
        assert_eq!(parsed.fault_rules, options.fault_rules);
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let parsed = ThresholdPressureOptions::from_json_str(r#"{ "active": true }"#).unwrap();
        assert!(parsed.is_active());
        assert!(parsed.rules.is_empty());
        assert_eq!(parsed.precision, Precision::F64);
    }

    #[test]
    fn test_equil_dims_default() {
        let dims = EquilDims::default();
        assert_eq!(dims.num_equil_regions, 1);
    }
}
