use serde::{Deserialize, Serialize};

/// 表格单元值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

/// 一行（按列索引排列）。
pub type Row = Vec<CellValue>;

impl CellValue {
    /// 文本形式；整数值不带小数部分。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(value) => match integral(*value) {
                Some(int) => int.to_string(),
                None => value.to_string(),
            },
            CellValue::Text(value) => value.clone(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(value) => value.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        }
    }

    /// 整数形式；非整数或非数字返回 None。
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Text(value) => match value.trim().parse::<i64>() {
                Ok(int) => Some(int),
                Err(_) => self.as_f64().and_then(integral),
            },
            _ => self.as_f64().and_then(integral),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(531.0).as_text(), "531");
        assert_eq!(CellValue::Number(1.5).as_text(), "1.5");
        assert_eq!(CellValue::Empty.as_text(), "");
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(CellValue::from(" 675 ").as_i64(), Some(675));
        assert_eq!(CellValue::from("20.0").as_i64(), Some(20));
        assert_eq!(CellValue::from("A1").as_i64(), None);
        assert_eq!(CellValue::Number(2.5).as_i64(), None);
    }

    #[test]
    fn cells_deserialize_untagged() {
        let row: Row = serde_json::from_str(r#"["1", 531, null]"#).expect("row");
        assert_eq!(
            row,
            vec![
                CellValue::Text("1".to_string()),
                CellValue::Number(531.0),
                CellValue::Empty
            ]
        );
    }
}
