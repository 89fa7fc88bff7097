pub mod position_state;
pub mod trade;

pub use position_state::PositionState;
pub use trade::{Trade, TradeSide};
