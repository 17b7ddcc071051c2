// crates/pf_thpres/tests/threshold_init.rs

//! 阈值压力初始化端到端测试
//! 覆盖默认估算、显式覆盖、重启注入与配置校验

use pf_config::{EquilDims, RegionPairRule, ThresholdPressureOptions};
use pf_foundation::PfError;
use pf_grid::CartesianGrid;
use pf_runtime::{cell, FaceIndex};
use pf_thpres::{InitSummary, InitialFlowState, ThresholdPressureBuilder, ThresholdPressureTable};

/// 所有面上物性一致的流动状态
struct UniformFlowState {
    /// 每相 (上游流度, 相压差)
    phases: Vec<(f64, f64)>,
    trans: f64,
}

impl UniformFlowState {
    fn single_phase() -> Self {
        Self {
            phases: vec![(0.8, 2.5e5)],
            trans: 1e-3,
        }
    }
}

impl InitialFlowState for UniformFlowState {
    fn n_phases(&self) -> usize {
        self.phases.len()
    }

    fn transmissibility(&self, _face: FaceIndex) -> f64 {
        self.trans
    }

    fn upstream_mobility(&self, _face: FaceIndex, phase: usize) -> f64 {
        self.phases[phase].0
    }

    fn pressure_difference(&self, _face: FaceIndex, phase: usize) -> f64 {
        self.phases[phase].1
    }
}

fn active_options(rules: Vec<RegionPairRule>) -> ThresholdPressureOptions {
    ThresholdPressureOptions {
        active: true,
        rules,
        ..Default::default()
    }
}

/// 2x1 网格, 左右单元各属一个区域
fn build_two_cell(
    state: &UniformFlowState,
    options: ThresholdPressureOptions,
) -> (ThresholdPressureTable<f64>, InitSummary) {
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    ThresholdPressureBuilder::new(options)
        .with_grid(&grid)
        .with_flow_state(state)
        .with_region_attributes(&[1, 2])
        .with_equil_dims(EquilDims {
            num_equil_regions: 2,
        })
        .build::<f64>()
        .unwrap()
}

/// 测试默认估算贯通到查询: |面积 x 传导率| = 1e-3, 流度 0.8, |压差| = 2.5e5
#[test]
fn test_default_estimate_reaches_query() {
    let state = UniformFlowState::single_phase();
    let (table, summary) = build_two_cell(&state, active_options(vec![RegionPairRule::defaulted(1, 2)]));

    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 2.5e5);
    assert_eq!(table.threshold_pressure(cell(1), cell(0)), 2.5e5, "查询方向无关");
    assert_eq!(table.data(), &[0.0, 2.5e5, 2.5e5, 0.0]);

    assert!(summary.enabled);
    assert_eq!(summary.n_regions, 2);
    assert_eq!(summary.faces_visited, 1);
    assert_eq!(summary.faces_negligible, 0);
    assert_eq!(summary.region_pairs_touched, 1);
    assert_eq!(summary.barrier_rules_applied, 1);
    assert!(!summary.restart_pending);
}

/// 测试显式规则值优先于估算默认值
#[test]
fn test_explicit_rule_overrides_estimate() {
    let state = UniformFlowState::single_phase();
    let (table, _) = build_two_cell(&state, active_options(vec![RegionPairRule::with_value(1, 2, 5e4)]));

    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 5e4);
}

/// 测试流动可忽略的面不产生默认值
#[test]
fn test_negligible_face_leaves_default_zero() {
    let state = UniformFlowState {
        phases: vec![(0.8, 2.5e5)],
        trans: 1e-20,
    };
    let (table, summary) = build_two_cell(&state, active_options(vec![RegionPairRule::defaulted(1, 2)]));

    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 0.0);
    assert_eq!(summary.faces_negligible, 1);
    assert_eq!(summary.region_pairs_touched, 0);
    assert_eq!(summary.barrier_rules_applied, 1, "规则仍然落盘, 只是默认值为零");
}

/// 测试零流度的相不贡献压差
#[test]
fn test_zero_mobility_contributes_nothing() {
    let state = UniformFlowState {
        phases: vec![(0.0, 2.5e5)],
        trans: 1e-3,
    };
    let (table, _) = build_two_cell(&state, active_options(vec![RegionPairRule::defaulted(1, 2)]));

    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 0.0);
}

/// 测试同区域单元之间无障壁
#[test]
fn test_same_region_query_is_zero() {
    let state = UniformFlowState::single_phase();
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    let (table, summary) = ThresholdPressureBuilder::new(active_options(vec![
        RegionPairRule::defaulted(1, 2),
    ]))
    .with_grid(&grid)
    .with_flow_state(&state)
    .with_region_attributes(&[1, 1])
    .with_equil_dims(EquilDims {
        num_equil_regions: 2,
    })
    .build::<f64>()
    .unwrap();

    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 0.0);
    assert_eq!(summary.faces_visited, 1);
    assert_eq!(summary.region_pairs_touched, 0);
    assert_eq!(summary.barrier_rules_applied, 0, "没有面连接区域对 (1,2)");
}

/// 测试声明了障壁但没有面连接的区域对保持零
#[test]
fn test_barrier_without_connecting_face_stays_zero() {
    let state = UniformFlowState::single_phase();
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    let (table, _) = ThresholdPressureBuilder::new(active_options(vec![
        RegionPairRule::defaulted(1, 2),
        RegionPairRule::defaulted(1, 3),
    ]))
    .with_grid(&grid)
    .with_flow_state(&state)
    .with_region_attributes(&[1, 2])
    .with_equil_dims(EquilDims {
        num_equil_regions: 3,
    })
    .build::<f64>()
    .unwrap();

    // 行优先 3x3 矩阵: (0,1) 有连接面, (0,2) 没有
    assert_eq!(table.data()[1], 2.5e5);
    assert_eq!(table.data()[2], 0.0);
}

/// 测试未启用的子系统给出零障壁
#[test]
fn test_disabled_subsystem_answers_zero() {
    let (table, summary) = ThresholdPressureBuilder::new(ThresholdPressureOptions::default())
        .build::<f64>()
        .unwrap();

    assert!(!table.is_enabled());
    assert!(table.data().is_empty());
    assert_eq!(table.threshold_pressure(cell(0), cell(7)), 0.0);
    assert_eq!(summary, InitSummary::default());
}

/// 测试重启构建跳过估算, 矩阵等待注入
#[test]
fn test_restart_defers_matrix_to_injection() {
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    let options = ThresholdPressureOptions {
        active: true,
        restart: true,
        rules: vec![RegionPairRule::defaulted(1, 2)],
        ..Default::default()
    };

    // 重启路径不需要流动状态
    let (mut table, summary) = ThresholdPressureBuilder::new(options)
        .with_grid(&grid)
        .with_region_attributes(&[1, 2])
        .with_equil_dims(EquilDims {
            num_equil_regions: 2,
        })
        .build::<f64>()
        .unwrap();

    assert!(summary.restart_pending);
    assert_eq!(summary.faces_visited, 0);
    assert!(table.is_restart_pending());
    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 0.0);

    table.set_from_restart(&[0.0, 1e5, 1e5, 0.0]).unwrap();

    assert!(!table.is_restart_pending());
    assert_eq!(table.threshold_pressure(cell(0), cell(1)), 1e5);
    assert_eq!(table.threshold_pressure(cell(1), cell(0)), 1e5);
}

/// 测试查询表数据经检查点序列化后能注入重启表
#[test]
fn test_restart_checkpoint_round_trip() {
    let state = UniformFlowState::single_phase();
    let (original, _) = build_two_cell(&state, active_options(vec![RegionPairRule::with_value(1, 2, 5e4)]));

    let encoded = serde_json::to_string(original.data()).unwrap();
    let decoded: Vec<f64> = serde_json::from_str(&encoded).unwrap();

    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    let options = ThresholdPressureOptions {
        active: true,
        restart: true,
        ..Default::default()
    };
    let (mut restored, _) = ThresholdPressureBuilder::new(options)
        .with_grid(&grid)
        .with_region_attributes(&[1, 2])
        .with_equil_dims(EquilDims {
            num_equil_regions: 2,
        })
        .build::<f64>()
        .unwrap();
    restored.set_from_restart(&decoded).unwrap();

    assert_eq!(restored.data(), original.data());
    assert_eq!(restored.threshold_pressure(cell(0), cell(1)), 5e4);
}

/// 测试重启注入校验矩阵长度
#[test]
fn test_restart_injection_size_checked() {
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    let options = ThresholdPressureOptions {
        active: true,
        restart: true,
        ..Default::default()
    };
    let (mut table, _) = ThresholdPressureBuilder::new(options)
        .with_grid(&grid)
        .with_region_attributes(&[1, 2])
        .with_equil_dims(EquilDims {
            num_equil_regions: 2,
        })
        .build::<f64>()
        .unwrap();

    let err = table.set_from_restart(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(
        err,
        PfError::SizeMismatch {
            expected: 4,
            actual: 2,
            ..
        }
    ));
    assert!(table.is_restart_pending(), "失败的注入不消耗等待状态");

    table.set_from_restart(&[0.0; 4]).unwrap();
    let err = table.set_from_restart(&[0.0; 4]).unwrap_err();
    assert!(matches!(err, PfError::Internal { .. }), "二次注入被拒绝");
}

/// 测试非重启构建的表拒绝注入
#[test]
fn test_injection_without_restart_rejected() {
    let state = UniformFlowState::single_phase();
    let (mut table, _) = build_two_cell(&state, active_options(vec![RegionPairRule::defaulted(1, 2)]));

    let err = table.set_from_restart(&[0.0; 4]).unwrap_err();
    assert!(matches!(err, PfError::Internal { .. }));
}

/// 测试启用时缺少区域属性是配置错误
#[test]
fn test_missing_attributes_is_config_error() {
    let state = UniformFlowState::single_phase();
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
    let err = ThresholdPressureBuilder::new(active_options(vec![RegionPairRule::defaulted(1, 2)]))
        .with_grid(&grid)
        .with_flow_state(&state)
        .build::<f64>()
        .unwrap_err();

    assert!(matches!(err, PfError::Config { .. }));
}

/// 测试区域属性校验贯通构建器
#[test]
fn test_invalid_region_attributes_rejected() {
    let state = UniformFlowState::single_phase();
    let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();

    let err = ThresholdPressureBuilder::new(active_options(vec![RegionPairRule::defaulted(1, 2)]))
        .with_grid(&grid)
        .with_flow_state(&state)
        .with_region_attributes(&[1, 7])
        .with_equil_dims(EquilDims {
            num_equil_regions: 2,
        })
        .build::<f64>()
        .unwrap_err();

    assert!(matches!(err, PfError::InvalidInput { .. }));
}

/// 测试多面网格上的摘要计数
#[test]
fn test_summary_counts_multi_face() {
    let state = UniformFlowState::single_phase();
    let grid = CartesianGrid::new(4, 1, 1.0, 1.0).unwrap();
    let (_, summary) = ThresholdPressureBuilder::new(active_options(vec![
        RegionPairRule::defaulted(1, 2),
    ]))
    .with_grid(&grid)
    .with_flow_state(&state)
    .with_region_attributes(&[1, 1, 2, 2])
    .with_equil_dims(EquilDims {
        num_equil_regions: 2,
    })
    .build::<f64>()
    .unwrap();

    assert_eq!(summary.n_partitions, 1);
    assert_eq!(summary.faces_visited, 3);
    assert_eq!(summary.faces_negligible, 0);
    assert_eq!(summary.region_pairs_touched, 1, "只有中间的面跨区域");
    assert_eq!(summary.barrier_rules_applied, 1);
}
