// crates/pf_config/src/fault.rs

//! 断层集合
//!
//! 对应甲板 FAULTS 关键字展开后的结果：每条断层有一个名字和
//! 一组全局单元编号。展开（面段到单元的投影）由甲板解析层完成，
//! 这里只保存与查询。

use serde::{Deserialize, Serialize};

/// 命名断层
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// 断层名
    pub name: String,
    /// 断层经过的全局单元编号
    pub cells: Vec<usize>,
}

impl Fault {
    /// 创建断层
    pub fn new(name: impl Into<String>, cells: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// 断层集合，保持甲板中的声明顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultCollection {
    faults: Vec<Fault>,
}

impl FaultCollection {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条断层
    pub fn add(&mut self, name: impl Into<String>, cells: Vec<usize>) {
        self.faults.push(Fault::new(name, cells));
    }

    /// 断层数量
    pub fn len(&self) -> usize {
        self.faults.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// 按序号取断层
    pub fn get(&self, idx: usize) -> Option<&Fault> {
        self.faults.get(idx)
    }

    /// 按名字查找断层序号（大小写敏感）
    pub fn position(&self, name: &str) -> Option<usize> {
        self.faults.iter().position(|f| f.name == name)
    }

    /// 遍历断层
    pub fn iter(&self) -> impl Iterator<Item = &Fault> {
        self.faults.iter()
    }
}
