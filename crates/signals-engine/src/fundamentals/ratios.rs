//! Year-by-year financial ratios from annual statements
//!
//! Each family reads up to `year_range` fiscal years, newest first. Reports
//! of different statements are paired by position, so index `i` of the
//! balance sheet and the income statement describe the same fiscal year.
//! Families needing a prior year (efficiency, growth) read one report past
//! the last year they emit.

use super::{Earnings, Statement};
use crate::error::{EngineError, Result};
use crate::stats::{percent_change, ratio_or, round2};
use serde::{Deserialize, Serialize};

/// Ratios for consecutive fiscal years, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioSeries<T> {
    pub year_range: usize,
    pub years: Vec<T>,
}

impl<T> RatioSeries<T> {
    fn new(years: Vec<T>) -> Self {
        Self {
            year_range: years.len(),
            years,
        }
    }
}

/// Margins and returns, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityYear {
    pub fiscal_year: String,
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
    pub return_on_equity: f64,
    pub return_on_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityYear {
    pub fiscal_year: String,
    pub current_ratio: f64,
    pub quick_ratio: f64,
    pub cash_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageYear {
    pub fiscal_year: String,
    pub debt_to_equity: f64,
    pub interest_coverage: f64,
    pub debt_to_ebitda: f64,
}

/// Turnover against the average of the opening and closing balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyYear {
    pub fiscal_year: String,
    pub inventory_turnover: f64,
    pub asset_turnover: f64,
    pub receivable_turnover: f64,
}

/// Year-over-year growth, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub fiscal_year: String,
    pub revenue_growth: f64,
    pub eps_growth: f64,
    pub operating_income_growth: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    round2(ratio_or(numerator, denominator, 0.0))
}

fn percent(numerator: f64, denominator: f64) -> f64 {
    round2(ratio_or(numerator, denominator, 0.0) * 100.0)
}

fn turnover(flow: f64, opening: f64, closing: f64) -> f64 {
    ratio(flow, (opening + closing) / 2.0)
}

fn growth(previous: f64, current: f64) -> f64 {
    round2(percent_change(previous, current))
}

/// Number of years to emit given `available` reports; at least one is required
fn years_to_read(year_range: usize, available: usize, required: usize, actual: usize) -> Result<usize> {
    match year_range.max(1).min(available) {
        0 => Err(EngineError::InsufficientData { required, actual }),
        years => Ok(years),
    }
}

pub fn profitability_ratios(
    income: &Statement,
    balance: &Statement,
    year_range: usize,
) -> Result<RatioSeries<ProfitabilityYear>> {
    let available = income.annual_reports.len().min(balance.annual_reports.len());
    let years = years_to_read(year_range, available, 1, available)?;

    income
        .annual_reports
        .iter()
        .zip(&balance.annual_reports)
        .take(years)
        .map(|(is, bs)| {
            let revenue = is.number_or("totalRevenue", 1.0)?;
            let net_income = is.number_or("netIncome", 0.0)?;
            Ok(ProfitabilityYear {
                fiscal_year: is.fiscal_date_ending.clone(),
                gross_margin: percent(is.number_or("grossProfit", 0.0)?, revenue),
                operating_margin: percent(is.number_or("operatingIncome", 0.0)?, revenue),
                net_margin: percent(net_income, revenue),
                return_on_equity: percent(net_income, bs.number_or("totalShareholderEquity", 1.0)?),
                return_on_assets: percent(net_income, bs.number_or("totalAssets", 1.0)?),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(RatioSeries::new)
}

pub fn liquidity_ratios(balance: &Statement, year_range: usize) -> Result<RatioSeries<LiquidityYear>> {
    let available = balance.annual_reports.len();
    let years = years_to_read(year_range, available, 1, available)?;

    balance
        .annual_reports
        .iter()
        .take(years)
        .map(|bs| {
            let current_assets = bs.number_or("totalCurrentAssets", 0.0)?;
            let current_liabilities = bs.number_or("totalCurrentLiabilities", 1.0)?;
            let inventory = bs.number_or("inventory", 0.0)?;
            let cash = bs.number_or("cashAndCashEquivalentsAtCarryingValue", 0.0)?;
            Ok(LiquidityYear {
                fiscal_year: bs.fiscal_date_ending.clone(),
                current_ratio: ratio(current_assets, current_liabilities),
                quick_ratio: ratio(current_assets - inventory, current_liabilities),
                cash_ratio: ratio(cash, current_liabilities),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(RatioSeries::new)
}

pub fn leverage_ratios(
    balance: &Statement,
    income: &Statement,
    year_range: usize,
) -> Result<RatioSeries<LeverageYear>> {
    let available = balance.annual_reports.len().min(income.annual_reports.len());
    let years = years_to_read(year_range, available, 1, available)?;

    balance
        .annual_reports
        .iter()
        .zip(&income.annual_reports)
        .take(years)
        .map(|(bs, is)| {
            let total_debt = bs.number_or("shortLongTermDebtTotal", 0.0)?;
            Ok(LeverageYear {
                fiscal_year: bs.fiscal_date_ending.clone(),
                debt_to_equity: ratio(total_debt, bs.number_or("totalShareholderEquity", 1.0)?),
                interest_coverage: ratio(
                    is.number_or("operatingIncome", 0.0)?,
                    is.number_or("interestExpense", 1.0)?,
                ),
                debt_to_ebitda: ratio(total_debt, is.number_or("ebitda", 1.0)?),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(RatioSeries::new)
}

/// Turnover ratios; every figure is required and a zero average yields `0.0`
pub fn efficiency_ratios(
    balance: &Statement,
    income: &Statement,
    year_range: usize,
) -> Result<RatioSeries<EfficiencyYear>> {
    let reports = &balance.annual_reports;
    let available = reports
        .len()
        .saturating_sub(1)
        .min(income.annual_reports.len());
    let years = years_to_read(year_range, available, 2, reports.len())?;

    reports
        .windows(2)
        .zip(&income.annual_reports)
        .take(years)
        .map(|(pair, is)| {
            let (closing, opening) = (&pair[0], &pair[1]);
            let revenue = is.number("totalRevenue")?;
            Ok(EfficiencyYear {
                fiscal_year: closing.fiscal_date_ending.clone(),
                inventory_turnover: turnover(
                    is.number("costofGoodsAndServicesSold")?,
                    opening.number("inventory")?,
                    closing.number("inventory")?,
                ),
                asset_turnover: turnover(
                    revenue,
                    opening.number("totalAssets")?,
                    closing.number("totalAssets")?,
                ),
                receivable_turnover: turnover(
                    revenue,
                    opening.number("currentNetReceivables")?,
                    closing.number("currentNetReceivables")?,
                ),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(RatioSeries::new)
}

/// Growth against the prior fiscal year
///
/// Years without reported EPS for both fiscal years are skipped; when none
/// remain the earnings data is treated as unavailable.
pub fn growth_metrics(
    income: &Statement,
    earnings: &Earnings,
    year_range: usize,
) -> Result<RatioSeries<GrowthYear>> {
    let reports = &income.annual_reports;
    let years = years_to_read(year_range, reports.len().saturating_sub(1), 2, reports.len())?;

    let mut rows = Vec::with_capacity(years);
    for pair in reports.windows(2).take(years) {
        let (current, previous) = (&pair[0], &pair[1]);
        let (Some(eps_current), Some(eps_previous)) = (
            earnings.for_fiscal_year(&current.fiscal_date_ending),
            earnings.for_fiscal_year(&previous.fiscal_date_ending),
        ) else {
            tracing::debug!(fiscal_year = %current.fiscal_date_ending, "No matching earnings, skipping year");
            continue;
        };

        rows.push(GrowthYear {
            fiscal_year: current.fiscal_date_ending.clone(),
            revenue_growth: growth(previous.number("totalRevenue")?, current.number("totalRevenue")?),
            eps_growth: growth(eps_previous.number("reportedEPS")?, eps_current.number("reportedEPS")?),
            operating_income_growth: growth(
                previous.number("operatingIncome")?,
                current.number("operatingIncome")?,
            ),
        });
    }

    if rows.is_empty() {
        return Err(EngineError::DataUnavailable {
            symbol: income.symbol.clone(),
            reason: "no annual earnings match the income statement fiscal years".to_string(),
        });
    }
    Ok(RatioSeries::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fundamentals::fixtures::{balance, earnings, income, report, statement};
    use serde_json::json;

    #[test]
    fn test_profitability_per_year() {
        let series = profitability_ratios(&income(), &balance(), 5).unwrap();
        assert_eq!(series.year_range, 2);

        let latest = &series.years[0];
        assert_eq!(latest.fiscal_year, "2023-12-31");
        assert_eq!(latest.gross_margin, 40.0);
        assert_eq!(latest.operating_margin, 15.0);
        assert_eq!(latest.net_margin, 10.0);
        assert_eq!(latest.return_on_equity, 20.0);
        assert_eq!(latest.return_on_assets, 5.0);

        let prior = &series.years[1];
        assert_eq!(prior.gross_margin, 37.5);
        assert_eq!(prior.operating_margin, 12.5);
        assert_eq!(prior.return_on_equity, 17.78);
        assert_eq!(prior.return_on_assets, 4.44);
    }

    #[test]
    fn test_year_range_defaults_to_latest_year() {
        let series = profitability_ratios(&income(), &balance(), 1).unwrap();
        assert_eq!(series.year_range, 1);
        assert_eq!(series.years[0].fiscal_year, "2023-12-31");

        let zero = profitability_ratios(&income(), &balance(), 0).unwrap();
        assert_eq!(zero, series);
    }

    #[test]
    fn test_profitability_zero_denominators() {
        let income = statement(vec![report(
            "2023-12-31",
            json!({"totalRevenue": "0", "grossProfit": "10", "netIncome": "5"}),
        )]);
        let balance = statement(vec![report(
            "2023-12-31",
            json!({"totalShareholderEquity": "-40", "totalAssets": "0"}),
        )]);

        let year = &profitability_ratios(&income, &balance, 1).unwrap().years[0];
        assert_eq!(year.gross_margin, 0.0);
        assert_eq!(year.net_margin, 0.0);
        assert_eq!(year.return_on_equity, 0.0);
        assert_eq!(year.return_on_assets, 0.0);
    }

    #[test]
    fn test_empty_statement_is_insufficient() {
        let err = profitability_ratios(&statement(vec![]), &balance(), 1).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { required: 1, actual: 0 }));
    }

    #[test]
    fn test_liquidity() {
        let series = liquidity_ratios(&balance(), 2).unwrap();
        let latest = &series.years[0];
        assert_eq!(latest.current_ratio, 1.5);
        assert_eq!(latest.quick_ratio, 1.25);
        assert_eq!(latest.cash_ratio, 0.5);

        let prior = &series.years[1];
        assert_eq!(prior.current_ratio, 1.0);
        assert_eq!(prior.quick_ratio, 0.72);
        assert_eq!(prior.cash_ratio, 0.3);
    }

    #[test]
    fn test_liquidity_without_liabilities() {
        let zero = statement(vec![report(
            "2023-12-31",
            json!({"totalCurrentAssets": "600", "totalCurrentLiabilities": "0"}),
        )]);
        let year = &liquidity_ratios(&zero, 1).unwrap().years[0];
        assert_eq!((year.current_ratio, year.quick_ratio, year.cash_ratio), (0.0, 0.0, 0.0));

        // absent liabilities fall back to a unit denominator
        let absent = statement(vec![report("2023-12-31", json!({"totalCurrentAssets": "3"}))]);
        assert_eq!(liquidity_ratios(&absent, 1).unwrap().years[0].current_ratio, 3.0);
    }

    #[test]
    fn test_leverage() {
        let series = leverage_ratios(&balance(), &income(), 2).unwrap();
        let latest = &series.years[0];
        assert_eq!(latest.debt_to_equity, 1.5);
        assert_eq!(latest.interest_coverage, 5.0);
        assert_eq!(latest.debt_to_ebitda, 3.0);
        assert_eq!(series.years[1].interest_coverage, 4.0);
    }

    #[test]
    fn test_leverage_zero_denominators() {
        let balance = statement(vec![report(
            "2023-12-31",
            json!({"shortLongTermDebtTotal": "100", "totalShareholderEquity": "0"}),
        )]);
        let income = statement(vec![report(
            "2023-12-31",
            json!({"operatingIncome": "50", "interestExpense": "0", "ebitda": "-5"}),
        )]);

        let year = &leverage_ratios(&balance, &income, 1).unwrap().years[0];
        assert_eq!(year.debt_to_equity, 0.0);
        assert_eq!(year.interest_coverage, 0.0);
        assert_eq!(year.debt_to_ebitda, 0.0);
    }

    #[test]
    fn test_efficiency_uses_average_balances() {
        let series = efficiency_ratios(&balance(), &income(), 3).unwrap();
        assert_eq!(series.year_range, 1);

        let year = &series.years[0];
        assert_eq!(year.fiscal_year, "2023-12-31");
        assert_eq!(year.inventory_turnover, 5.0);
        assert_eq!(year.asset_turnover, 0.53);
        assert_eq!(year.receivable_turnover, 5.0);
    }

    #[test]
    fn test_efficiency_needs_two_years() {
        let single = statement(balance().annual_reports.into_iter().take(1).collect());
        let err = efficiency_ratios(&single, &income(), 1).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { required: 2, actual: 1 }));
    }

    #[test]
    fn test_efficiency_zero_average_and_missing_field() {
        let balance = statement(vec![
            report(
                "2023-12-31",
                json!({"inventory": "0", "totalAssets": "10", "currentNetReceivables": "0"}),
            ),
            report(
                "2022-12-31",
                json!({"inventory": "0", "totalAssets": "10", "currentNetReceivables": "0"}),
            ),
        ]);
        let year = &efficiency_ratios(&balance, &income(), 1).unwrap().years[0];
        assert_eq!(year.inventory_turnover, 0.0);
        assert_eq!(year.receivable_turnover, 0.0);
        assert_eq!(year.asset_turnover, 100.0);

        let mut gappy = balance;
        gappy.annual_reports[1].fields.remove("totalAssets");
        let err = efficiency_ratios(&gappy, &income(), 1).unwrap_err();
        assert!(matches!(err, EngineError::MissingField { field } if field == "totalAssets"));
    }

    #[test]
    fn test_growth_against_prior_year() {
        let series = growth_metrics(&income(), &earnings(), 1).unwrap();
        let year = &series.years[0];
        assert_eq!(year.fiscal_year, "2023-12-31");
        assert_eq!(year.revenue_growth, 25.0);
        assert_eq!(year.operating_income_growth, 50.0);
        assert_eq!(year.eps_growth, 25.0);
    }

    #[test]
    fn test_growth_without_matching_earnings() {
        let mut earnings = earnings();
        earnings.annual_earnings.truncate(1);

        let err = growth_metrics(&income(), &earnings, 1).unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable { symbol, .. } if symbol == "IBM"));
    }

    #[test]
    fn test_growth_from_zero_base() {
        let income = statement(vec![
            report("2023-12-31", json!({"totalRevenue": "50", "operatingIncome": "5"})),
            report("2022-12-31", json!({"totalRevenue": "0", "operatingIncome": "-5"})),
        ]);
        let year = &growth_metrics(&income, &earnings(), 1).unwrap().years[0];
        assert_eq!(year.revenue_growth, 0.0);
        assert_eq!(year.operating_income_growth, -200.0);
    }
}
