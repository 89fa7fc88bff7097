use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub const ENV_PERCENT_DP: &str = "TRADE_CALC_PERCENT_DP";
pub const ENV_ROUNDING: &str = "TRADE_CALC_ROUNDING";
pub const ENV_CASH_FLOW_CONVENTION: &str = "TRADE_CALC_CASH_FLOW_CONVENTION";
pub const ENV_STRICT_CASH_FLOWS: &str = "TRADE_CALC_STRICT_CASH_FLOWS";

/// Settings shared by both calculators.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Decimal places kept on a profit percentage.
    pub percent_dp: u32,

    /// How a profit percentage is rounded to `percent_dp`.
    pub rounding: RoundingMode,

    /// Sign convention the caller writes cash flows in.
    pub cash_flow_convention: CashFlowConvention,

    /// Reject cash flows whose sign contradicts `cash_flow_convention`.
    pub strict_cash_flows: bool,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            percent_dp: 2,
            rounding: RoundingMode::AwayFromZero,
            cash_flow_convention: CashFlowConvention::Signed,
            strict_cash_flows: false,
        }
    }
}

impl CalcConfig {
    /// Reads overrides from the process environment:
    /// - TRADE_CALC_PERCENT_DP
    /// - TRADE_CALC_ROUNDING (`away_from_zero` | `half_even`)
    /// - TRADE_CALC_CASH_FLOW_CONVENTION (`signed` | `magnitude`)
    /// - TRADE_CALC_STRICT_CASH_FLOWS (`true` | `false`)
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_PERCENT_DP) {
            config.percent_dp = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", ENV_PERCENT_DP, value))?;
        }

        if let Some(value) = lookup(ENV_ROUNDING) {
            config.rounding = RoundingMode::from_str(value.trim())
                .with_context(|| format!("Invalid {} '{}'", ENV_ROUNDING, value))?;
        }

        if let Some(value) = lookup(ENV_CASH_FLOW_CONVENTION) {
            config.cash_flow_convention = CashFlowConvention::from_str(value.trim())
                .with_context(|| format!("Invalid {} '{}'", ENV_CASH_FLOW_CONVENTION, value))?;
        }

        if let Some(value) = lookup(ENV_STRICT_CASH_FLOWS) {
            config.strict_cash_flows = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", ENV_STRICT_CASH_FLOWS, value))?;
        }

        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoundingMode {
    AwayFromZero,
    HalfEven,
}

impl RoundingMode {
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::AwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CashFlowConvention {
    /// Negative when buying, positive when selling.
    Signed,
    /// Every amount is a positive magnitude.
    Magnitude,
}
