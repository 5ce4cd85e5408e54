use crate::cell::CellValue;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

/// 列过滤条件（按列 PID）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub pid: u32,
    pub operator: ComparisonOperator,
    pub value: String,
}

impl ColumnFilter {
    pub fn equal(pid: u32, value: impl ToString) -> Self {
        Self {
            pid,
            operator: ComparisonOperator::Equal,
            value: value.to_string(),
        }
    }

    pub fn new(pid: u32, operator: ComparisonOperator, value: impl ToString) -> Self {
        Self {
            pid,
            operator,
            value: value.to_string(),
        }
    }

    /// 两边都是数字时按数值比较，否则按字符串比较。
    pub fn matches(&self, cell: &CellValue) -> bool {
        let ordering = match (cell.as_f64(), self.value.trim().parse::<f64>().ok()) {
            (Some(left), Some(right)) => left.partial_cmp(&right),
            _ => Some(cell.as_text().as_str().cmp(self.value.as_str())),
        };
        let Some(ordering) = ordering else {
            return false;
        };
        match self.operator {
            ComparisonOperator::Equal => ordering == Ordering::Equal,
            ComparisonOperator::NotEqual => ordering != Ordering::Equal,
            ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
            ComparisonOperator::GreaterThanOrEqual => ordering != Ordering::Less,
            ComparisonOperator::LessThan => ordering == Ordering::Less,
            ComparisonOperator::LessThanOrEqual => ordering != Ordering::Greater,
        }
    }
}
