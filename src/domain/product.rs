// ==========================================
// 检验排班系统 - 产品领域模型
// ==========================================
// 用途: 导入层写入,引擎层只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Product - 产品主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    // ===== 主键 =====
    pub product_code: String, // 产品编码

    // ===== 基础信息 =====
    pub name: Option<String>,     // 品名
    pub process_no: Option<i32>,  // 工序号
    pub category: Option<String>, // 类别

    // ===== 检验参数 =====
    // 单件检验时间（小时）。主数据行存在但时间缺失/非法时为 None,
    // 此类产品属"已登记但不可解算",由引擎按 UnresolvedProduct 上报。
    pub unit_inspection_hours: Option<f64>,
}

// ==========================================
// ProductIndex - 产品索引
// ==========================================
// 用途: 引擎按产品编码查询单件检验时间; 判定新品（编码不存在 = 新品）
#[derive(Debug, Clone, Default)]
pub struct ProductIndex {
    products: HashMap<String, Product>,
}

impl ProductIndex {
    /// 从主数据列表构建索引
    ///
    /// 同一编码多条记录（多工序）时取单件检验时间的平均值,
    /// 与主数据文件的重复工序行处理口径一致。
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut merged: HashMap<String, (Product, Vec<f64>)> = HashMap::new();

        for product in products {
            let code = product.product_code.trim().to_string();
            if code.is_empty() {
                continue;
            }

            let entry = merged
                .entry(code.clone())
                .or_insert_with(|| (Product { product_code: code, ..product.clone() }, Vec::new()));

            if let Some(hours) = product.unit_inspection_hours {
                if hours.is_finite() && hours > 0.0 {
                    entry.1.push(hours);
                }
            }
        }

        let products = merged
            .into_iter()
            .map(|(code, (mut product, times))| {
                product.unit_inspection_hours = if times.is_empty() {
                    None
                } else {
                    Some(times.iter().sum::<f64>() / times.len() as f64)
                };
                (code, product)
            })
            .collect();

        Self { products }
    }

    /// 产品编码是否已登记
    pub fn contains(&self, product_code: &str) -> bool {
        self.products.contains_key(product_code.trim())
    }

    /// 查询产品主数据
    pub fn get(&self, product_code: &str) -> Option<&Product> {
        self.products.get(product_code.trim())
    }

    /// 查询单件检验时间（小时）
    ///
    /// None 表示编码未登记,或已登记但无可用时间
    pub fn unit_hours(&self, product_code: &str) -> Option<f64> {
        self.get(product_code).and_then(|p| p.unit_inspection_hours)
    }

    /// 已登记产品数
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// 索引是否为空
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, hours: Option<f64>) -> Product {
        Product {
            product_code: code.to_string(),
            name: None,
            process_no: Some(0),
            category: None,
            unit_inspection_hours: hours,
        }
    }

    #[test]
    fn test_duplicate_codes_average_unit_hours() {
        // 同编码多工序行取平均
        let index = ProductIndex::from_products(vec![
            product("P001", Some(0.2)),
            product("P001", Some(0.4)),
        ]);

        assert_eq!(index.len(), 1);
        assert!((index.unit_hours("P001").unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_registered_without_usable_hours() {
        let index = ProductIndex::from_products(vec![product("P002", None)]);

        // 已登记但不可解算
        assert!(index.contains("P002"));
        assert_eq!(index.unit_hours("P002"), None);
    }

    #[test]
    fn test_lookup_trims_code() {
        let index = ProductIndex::from_products(vec![product("P003", Some(1.0))]);
        assert!(index.contains("  P003 "));
    }

    #[test]
    fn test_invalid_hours_discarded() {
        let index = ProductIndex::from_products(vec![
            product("P004", Some(-1.0)),
            product("P004", Some(f64::NAN)),
        ]);
        assert!(index.contains("P004"));
        assert_eq!(index.unit_hours("P004"), None);
    }
}
