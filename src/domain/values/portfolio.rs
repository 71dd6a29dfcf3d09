//! Portfolio analytics.
//!
//! Totals, per-row ROI and asset-type diversification computed from the
//! holdings a user uploaded. The analysis is recomputed on every request;
//! nothing here holds state between calls.
//!
//! Ratios whose denominator is zero (ROI of a row with nothing invested,
//! portfolio ROI with nothing invested, diversification of a portfolio
//! worth nothing) are reported as `None`, serialized as `null`.

use crate::domain::entities::holding::{Holding, HoldingRecord};
use crate::domain::error::DomainError;
use serde::Serialize;
use std::collections::HashMap;

/// Field injected into every detailed asset row.
pub const ROI_FIELD: &str = "ROI (%)";

/// Share of the portfolio's current value held in one asset type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetAllocation {
    #[serde(rename = "Asset_Type")]
    pub asset_type: String,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Percentage")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioAnalysis {
    #[serde(rename = "Total_Invested")]
    pub total_invested: f64,
    #[serde(rename = "Total_Current")]
    pub total_current: f64,
    #[serde(rename = "Total_Profit_Loss")]
    pub total_profit_loss: f64,
    #[serde(rename = "Portfolio_ROI")]
    pub portfolio_roi: Option<f64>,
    #[serde(rename = "Asset_Diversification")]
    pub asset_diversification: Vec<AssetAllocation>,
    /// Input rows, every original field preserved, plus `ROI (%)`.
    #[serde(rename = "Detailed_Assets")]
    pub detailed_assets: Vec<HoldingRecord>,
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator * 100` rounded to 2dp, `None` when the
/// denominator is zero.
pub fn percent_of(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(round2(numerator / denominator * 100.0))
    }
}

/// Return on investment in percent for a single position.
pub fn roi(invested: f64, current: f64) -> Option<f64> {
    percent_of(current - invested, invested)
}

impl PortfolioAnalysis {
    /// Validate raw records and analyze them. Fails on the first row with a
    /// missing or non-numeric required field.
    pub fn from_records(records: Vec<HoldingRecord>) -> Result<Self, DomainError> {
        let holdings = Holding::from_records(records)?;
        Ok(Self::from_holdings(&holdings))
    }

    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let mut total_invested = 0.0_f64;
        let mut total_current = 0.0_f64;
        let mut detailed_assets = Vec::with_capacity(holdings.len());

        // Group by asset type, remembering first-seen order
        let mut type_index: HashMap<&str, usize> = HashMap::new();
        let mut type_totals: Vec<(&str, f64)> = Vec::new();

        for holding in holdings {
            total_invested += holding.invested_amount;
            total_current += holding.current_value;

            let mut row = holding.record.clone();
            row.insert(
                ROI_FIELD.to_string(),
                serde_json::json!(roi(holding.invested_amount, holding.current_value)),
            );
            detailed_assets.push(row);

            match type_index.get(holding.asset_type.as_str()) {
                Some(&i) => type_totals[i].1 += holding.current_value,
                None => {
                    type_index.insert(holding.asset_type.as_str(), type_totals.len());
                    type_totals.push((holding.asset_type.as_str(), holding.current_value));
                }
            }
        }

        let asset_diversification = type_totals
            .into_iter()
            .map(|(asset_type, value)| AssetAllocation {
                asset_type: asset_type.to_string(),
                value,
                percentage: percent_of(value, total_current),
            })
            .collect();

        PortfolioAnalysis {
            total_invested,
            total_current,
            total_profit_loss: total_current - total_invested,
            portfolio_roi: percent_of(total_current - total_invested, total_invested),
            asset_diversification,
            detailed_assets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(v: Value) -> Vec<HoldingRecord> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    fn stock_and_bond() -> Vec<HoldingRecord> {
        records(json!([
            {"Type": "Stock", "Invested_Amount": 1000, "Current_Value": 1200, "Name": "ACME"},
            {"Type": "Bond", "Invested_Amount": 500, "Current_Value": 450, "Name": "T-Bill"}
        ]))
    }

    #[test]
    fn test_stock_and_bond_scenario() {
        let a = PortfolioAnalysis::from_records(stock_and_bond()).unwrap();
        assert_eq!(a.total_invested, 1500.0);
        assert_eq!(a.total_current, 1650.0);
        assert_eq!(a.total_profit_loss, 150.0);
        assert_eq!(a.portfolio_roi, Some(10.0));
        assert_eq!(
            a.asset_diversification,
            vec![
                AssetAllocation { asset_type: "Stock".into(), value: 1200.0, percentage: Some(72.73) },
                AssetAllocation { asset_type: "Bond".into(), value: 450.0, percentage: Some(27.27) },
            ]
        );
    }

    #[test]
    fn test_roi_sign() {
        assert_eq!(roi(100.0, 150.0), Some(50.0));
        assert_eq!(roi(100.0, 80.0), Some(-20.0));
        assert_eq!(roi(3.0, 4.0), Some(33.33));
    }

    #[test]
    fn test_detailed_assets_keep_passthrough_fields() {
        let a = PortfolioAnalysis::from_records(stock_and_bond()).unwrap();
        assert_eq!(a.detailed_assets.len(), 2);
        let first = &a.detailed_assets[0];
        assert_eq!(first["Name"], json!("ACME"));
        assert_eq!(first["Invested_Amount"], json!(1000));
        assert_eq!(first[ROI_FIELD], json!(20.0));
        assert_eq!(a.detailed_assets[1][ROI_FIELD], json!(-10.0));
    }

    #[test]
    fn test_same_type_accumulates() {
        let a = PortfolioAnalysis::from_records(records(json!([
            {"Type": "Stock", "Invested_Amount": 10, "Current_Value": 30},
            {"Type": "Cash", "Invested_Amount": 50, "Current_Value": 50},
            {"Type": "Stock", "Invested_Amount": 10, "Current_Value": 20}
        ])))
        .unwrap();
        assert_eq!(a.asset_diversification.len(), 2);
        assert_eq!(a.asset_diversification[0].asset_type, "Stock");
        assert_eq!(a.asset_diversification[0].value, 50.0);
        assert_eq!(a.asset_diversification[0].percentage, Some(50.0));
    }

    #[test]
    fn test_diversification_sums_to_hundred() {
        let a = PortfolioAnalysis::from_records(records(json!([
            {"Type": "A", "Invested_Amount": 1, "Current_Value": 1},
            {"Type": "B", "Invested_Amount": 1, "Current_Value": 1},
            {"Type": "C", "Invested_Amount": 1, "Current_Value": 1},
            {"Type": "D", "Invested_Amount": 7, "Current_Value": 13.37}
        ])))
        .unwrap();
        let sum: f64 = a
            .asset_diversification
            .iter()
            .map(|d| d.percentage.unwrap())
            .sum();
        let tolerance = 0.01 * a.asset_diversification.len() as f64;
        assert!((sum - 100.0).abs() <= tolerance, "sum was {sum}");
    }

    #[test]
    fn test_idempotent() {
        let first = PortfolioAnalysis::from_records(stock_and_bond()).unwrap();
        let second = PortfolioAnalysis::from_records(stock_and_bond()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_zero_invested_row_has_null_roi() {
        let a = PortfolioAnalysis::from_records(records(json!([
            {"Type": "Gift", "Invested_Amount": 0, "Current_Value": 25},
            {"Type": "Stock", "Invested_Amount": 100, "Current_Value": 110}
        ])))
        .unwrap();
        assert_eq!(a.detailed_assets[0][ROI_FIELD], Value::Null);
        assert_eq!(a.detailed_assets[1][ROI_FIELD], json!(10.0));
        assert_eq!(a.portfolio_roi, Some(35.0));
    }

    #[test]
    fn test_zero_totals_yield_null_ratios() {
        let a = PortfolioAnalysis::from_records(records(json!([
            {"Type": "Gift", "Invested_Amount": 0, "Current_Value": 0}
        ])))
        .unwrap();
        assert_eq!(a.portfolio_roi, None);
        assert_eq!(a.asset_diversification[0].percentage, None);

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["Portfolio_ROI"], Value::Null);
        assert_eq!(json["Asset_Diversification"][0]["Percentage"], Value::Null);
    }

    #[test]
    fn test_empty_portfolio() {
        let a = PortfolioAnalysis::from_holdings(&[]);
        assert_eq!(a.total_invested, 0.0);
        assert!(a.asset_diversification.is_empty());
        assert!(a.detailed_assets.is_empty());
        assert_eq!(a.portfolio_roi, None);
    }

    #[test]
    fn test_bad_row_rejects_whole_request() {
        let err = PortfolioAnalysis::from_records(records(json!([
            {"Type": "Stock", "Invested_Amount": 1, "Current_Value": 2},
            {"Type": "Stock", "Invested_Amount": "n/a", "Current_Value": 2}
        ])))
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_serialized_field_names() {
        let a = PortfolioAnalysis::from_records(stock_and_bond()).unwrap();
        let json = serde_json::to_value(&a).unwrap();
        for key in [
            "Total_Invested",
            "Total_Current",
            "Total_Profit_Loss",
            "Portfolio_ROI",
            "Asset_Diversification",
            "Detailed_Assets",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["Asset_Diversification"][0]["Asset_Type"], "Stock");
    }

    #[test]
    fn test_detailed_assets_keep_column_order() {
        let rows = records(json!([
            {"Name": "ACME", "Type": "Stock", "Invested_Amount": 1000, "Current_Value": 1200, "Broker": "Fidelity"}
        ]));
        let a = PortfolioAnalysis::from_records(rows).unwrap();
        let keys: Vec<&str> = a.detailed_assets[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["Name", "Type", "Invested_Amount", "Current_Value", "Broker", ROI_FIELD]);

        let text = serde_json::to_string(&a).unwrap();
        let name = text.find("\"Name\"").unwrap();
        let broker = text.find("\"Broker\"").unwrap();
        assert!(name < broker);
    }
}
