pub mod app;
pub mod error;
pub mod models;

#[cfg(test)]
mod test;

pub use app::{
    CalcConfig, Calculator, CashFlowConvention, RoundingMode, profit_percent, replay,
    replay_trades, running_average_cost, running_average_costs,
};
pub use error::CalcError;
pub use models::{PositionState, Trade, TradeSide};
