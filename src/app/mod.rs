pub mod calc;
pub mod config;
pub mod utils;

pub use calc::{
    Calculator, profit_percent, replay, replay_trades, running_average_cost,
    running_average_costs,
};
pub use config::{CalcConfig, CashFlowConvention, RoundingMode};
