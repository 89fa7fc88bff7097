use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Shares still held and the pooled cost basis of those shares.
#[derive(Clone, Debug, Default, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct PositionState {
    total_shares: Decimal,
    total_cost: Decimal,
}

impl PositionState {
    /// Weighted average cost per held share, `0` once nothing is held.
    pub fn average_cost(&self) -> Result<Decimal, CalcError> {
        if self.total_shares > Decimal::ZERO {
            self.total_cost
                .checked_div(self.total_shares)
                .ok_or_else(|| CalcError::overflow("average cost"))
        } else {
            Ok(Decimal::ZERO)
        }
    }

    pub fn buy(&mut self, quantity: Decimal, cash_flow: Decimal) -> Result<(), CalcError> {
        let total_shares = self
            .total_shares
            .checked_add(quantity)
            .ok_or_else(|| CalcError::overflow("total shares"))?;
        let total_cost = self
            .total_cost
            .checked_add(cash_flow.abs())
            .ok_or_else(|| CalcError::overflow("total cost"))?;

        self.total_shares = total_shares;
        self.total_cost = total_cost;
        Ok(())
    }

    /// Removes `sold` shares at the current average. Selling from an empty or
    /// short position uses an average of `0`.
    pub fn sell(&mut self, sold: Decimal) -> Result<(), CalcError> {
        let avg_price = self.average_cost()?;
        let total_shares = self
            .total_shares
            .checked_sub(sold)
            .ok_or_else(|| CalcError::overflow("total shares"))?;
        let total_cost = sold
            .checked_mul(avg_price)
            .and_then(|cost_of_sold| self.total_cost.checked_sub(cost_of_sold))
            .ok_or_else(|| CalcError::overflow("total cost"))?;

        self.total_shares = total_shares;
        self.total_cost = total_cost;
        Ok(())
    }

    pub fn is_short(&self) -> bool {
        self.total_shares < Decimal::ZERO
    }
}
