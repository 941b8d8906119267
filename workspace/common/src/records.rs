//! Row records for the table-driven dashboard pages.
//!
//! Field names follow the latest revision of the API. Each collection endpoint wraps
//! its rows in a named field (`{"opportunities": [...]}`), mirrored here by the
//! `*List` envelopes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ===================== Pipeline =====================

/// One open or closed opportunity in the sales pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opportunity {
    pub opportunity_id: i32,
    #[serde(default)]
    pub opportunity_name: String,
    pub client_name: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_category: String,
    pub forecast_category: String,
    pub sales_stage: String,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpportunityList {
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

// ===================== Revenue =====================

/// Recognized revenue for one client and product category in a fiscal quarter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueRecord {
    #[serde(default)]
    pub revenue_id: Option<i32>,
    pub client_name: String,
    #[serde(default)]
    pub industry: String,
    pub product_category: String,
    pub amount: Decimal,
    pub fiscal_year: i32,
    pub fiscal_quarter: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueList {
    pub revenue: Vec<RevenueRecord>,
}

// ===================== Signings =====================

/// A signed contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signing {
    pub signing_id: i32,
    pub client_name: String,
    #[serde(default)]
    pub product_name: String,
    pub product_category: String,
    #[serde(default)]
    pub total_contract_value: Option<Decimal>,
    #[serde(default)]
    pub incremental_acv: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub signing_date: Option<NaiveDate>,
    pub fiscal_year: i32,
    pub fiscal_quarter: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SigningList {
    pub signings: Vec<Signing>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

// ===================== Wins =====================

/// A technical win.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Win {
    pub win_id: i32,
    pub client_name: String,
    pub client_industry: String,
    #[serde(default)]
    pub win_level: String,
    pub win_category: String,
    pub fiscal_year: i32,
    pub fiscal_quarter: u8,
}

impl Win {
    /// Category as displayed and filtered on: upper-cased.
    pub fn display_category(&self) -> String {
        self.win_category.to_uppercase()
    }

    /// Fiscal period label, e.g. `2024 Q3`.
    pub fn win_date(&self) -> String {
        format!("{} Q{}", self.fiscal_year, self.fiscal_quarter)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WinList {
    pub wins: Vec<Win>,
}

// ===================== Clients =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub client_id: i32,
    #[serde(alias = "company")]
    pub client_name: String,
    pub industry: String,
    #[serde(alias = "province")]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "accountexec_id")]
    pub account_executive_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientList {
    pub clients: Vec<Client>,
}

/// Request body for creating a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateClientRequest {
    pub client_name: String,
    pub industry: String,
    pub location: String,
    pub email: String,
}

// ===================== Account executives =====================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountExecutive {
    #[serde(alias = "executive_id")]
    pub user_id: i32,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: String,
}

impl AccountExecutive {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountExecutiveList {
    pub account_executives: Vec<AccountExecutive>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Request body for creating an account executive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateExecutiveRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
