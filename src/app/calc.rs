use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    app::{CalcConfig, CashFlowConvention, utils::ensure_same_len},
    error::CalcError,
    models::{PositionState, Trade, TradeSide},
};

/// Both sheet calculations bound to one [`CalcConfig`].
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    config: CalcConfig,
}

impl Calculator {
    pub fn new(config: CalcConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Percentage gained on a closed position.
    ///
    /// Returns `0` when either side is zero. `spent` may be given signed or as a
    /// magnitude. Fails only when the percentage does not fit in a `Decimal`.
    pub fn profit_percent(&self, spent: Decimal, received: Decimal) -> Result<Decimal, CalcError> {
        if spent.is_zero() || received.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let cost = spent.abs();
        let profit_percent = received
            .checked_sub(cost)
            .and_then(|profit| profit.checked_div(cost))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| CalcError::overflow("profit percent"))?;

        Ok(profit_percent
            .round_dp_with_strategy(self.config.percent_dp, self.config.rounding.strategy()))
    }

    /// Replays the sheet rows oldest first and returns what is left.
    pub fn replay(
        &self,
        quantities: &[Decimal],
        cash_flows: &[Decimal],
    ) -> Result<PositionState, CalcError> {
        self.fold(quantities, cash_flows, |_| Ok(()))
    }

    /// Average cost per held share after the last row, `0` when flat.
    pub fn running_average_cost(
        &self,
        quantities: &[Decimal],
        cash_flows: &[Decimal],
    ) -> Result<Decimal, CalcError> {
        self.replay(quantities, cash_flows)?.average_cost()
    }

    /// Average cost per held share after every row.
    pub fn running_average_costs(
        &self,
        quantities: &[Decimal],
        cash_flows: &[Decimal],
    ) -> Result<Vec<Decimal>, CalcError> {
        let mut averages = Vec::with_capacity(quantities.len());
        self.fold(quantities, cash_flows, |state| {
            averages.push(state.average_cost()?);
            Ok(())
        })?;

        Ok(averages)
    }

    /// Replays typed trades. Trades are put in date order when every one of
    /// them is dated, otherwise the given order is used. Rows in errors and
    /// warnings refer to the given order.
    pub fn replay_trades(&self, trades: &[Trade]) -> Result<PositionState, CalcError> {
        let mut ordered: Vec<(usize, &Trade)> = trades.iter().enumerate().collect();
        if ordered.iter().all(|(_, trade)| trade.date().is_some()) {
            ordered.sort_by_key(|(_, trade)| *trade.date());
        } else if ordered.iter().any(|(_, trade)| trade.date().is_some()) {
            debug!("Some trades are undated, replaying in the given order");
        }

        let mut state = PositionState::default();
        for (idx, trade) in ordered {
            self.apply(&mut state, idx, *trade.quantity(), *trade.cash_flow())?;
        }

        Ok(state)
    }

    fn fold<F>(
        &self,
        quantities: &[Decimal],
        cash_flows: &[Decimal],
        mut after_row: F,
    ) -> Result<PositionState, CalcError>
    where
        F: FnMut(&PositionState) -> Result<(), CalcError>,
    {
        ensure_same_len(quantities, cash_flows)?;

        let mut state = PositionState::default();
        for (idx, (quantity, cash_flow)) in quantities.iter().zip(cash_flows).enumerate() {
            self.apply(&mut state, idx, *quantity, *cash_flow)?;
            after_row(&state).map_err(|err| err.at_row(idx + 1))?;
        }

        debug!(
            rows = quantities.len(),
            total_shares = %state.total_shares(),
            total_cost = %state.total_cost(),
            "Replayed trades"
        );

        Ok(state)
    }

    fn apply(
        &self,
        state: &mut PositionState,
        idx: usize,
        quantity: Decimal,
        cash_flow: Decimal,
    ) -> Result<(), CalcError> {
        let side = TradeSide::of(quantity);
        if side == TradeSide::Empty {
            if !cash_flow.is_zero() {
                warn!(row = idx + 1, %cash_flow, "Skipping row with zero quantity");
            }
            return Ok(());
        }

        if self.config.strict_cash_flows {
            self.check_cash_flow(idx, side, cash_flow)?;
        }

        match side {
            TradeSide::Buy => state
                .buy(quantity, cash_flow)
                .map_err(|err| err.at_row(idx + 1))?,
            TradeSide::Sell => {
                let sold = -quantity;
                let held = *state.total_shares();
                state.sell(sold).map_err(|err| err.at_row(idx + 1))?;
                if state.is_short() {
                    warn!(row = idx + 1, %sold, %held, "Selling more shares than held");
                }
            }
            TradeSide::Empty => {}
        }

        Ok(())
    }

    fn check_cash_flow(
        &self,
        idx: usize,
        side: TradeSide,
        cash_flow: Decimal,
    ) -> Result<(), CalcError> {
        let valid = match (self.config.cash_flow_convention, side) {
            (CashFlowConvention::Signed, TradeSide::Buy) => cash_flow <= Decimal::ZERO,
            (CashFlowConvention::Signed, _) => cash_flow >= Decimal::ZERO,
            (CashFlowConvention::Magnitude, _) => cash_flow >= Decimal::ZERO,
        };

        if valid {
            Ok(())
        } else {
            Err(CalcError::invalid(format!(
                "Cash flow {} at row {} does not match the {} convention for a {}",
                cash_flow,
                idx + 1,
                self.config.cash_flow_convention,
                side
            )))
        }
    }
}

/// `((received - |spent|) / |spent|) * 100`, rounded to 2 places; `0` when
/// either amount is zero.
pub fn profit_percent(spent: Decimal, received: Decimal) -> Result<Decimal, CalcError> {
    Calculator::default().profit_percent(spent, received)
}

/// Weighted average cost per share still held after replaying `quantities`
/// (positive buys, negative sells) against their `cash_flows`.
pub fn running_average_cost(
    quantities: &[Decimal],
    cash_flows: &[Decimal],
) -> Result<Decimal, CalcError> {
    Calculator::default().running_average_cost(quantities, cash_flows)
}

pub fn running_average_costs(
    quantities: &[Decimal],
    cash_flows: &[Decimal],
) -> Result<Vec<Decimal>, CalcError> {
    Calculator::default().running_average_costs(quantities, cash_flows)
}

pub fn replay(quantities: &[Decimal], cash_flows: &[Decimal]) -> Result<PositionState, CalcError> {
    Calculator::default().replay(quantities, cash_flows)
}

pub fn replay_trades(trades: &[Trade]) -> Result<PositionState, CalcError> {
    Calculator::default().replay_trades(trades)
}
