use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Spend within one budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct BudgetCategory {
    pub name: String,
    pub allocated: f64,
    pub spent: f64,
}

/// Budget summary for the farm. Success payload of
/// `GET /api/financial/budget`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct BudgetData {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub currency: Option<String>,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
}
