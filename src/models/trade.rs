use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One row of the trade sheet.
///
/// `quantity` is positive for a buy and negative for a sale. `cash_flow`
/// follows the signed convention: negative when money is spent, positive
/// when it is received. Only the magnitude of a buy's cash flow is used for
/// the cost basis, so rows written with all-positive amounts replay the same.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, new)]
pub struct Trade {
    quantity: Decimal,
    cash_flow: Decimal,
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl Trade {
    pub fn buy(shares: Decimal, spend: Decimal) -> Self {
        Self::new(shares.abs(), -spend.abs(), None)
    }

    pub fn sell(shares: Decimal, proceeds: Decimal) -> Self {
        Self::new(-shares.abs(), proceeds.abs(), None)
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn side(&self) -> TradeSide {
        TradeSide::of(self.quantity)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize)]
pub enum TradeSide {
    Buy,
    Sell,
    /// Zero quantity, e.g. a blank sheet row. Skipped on replay.
    Empty,
}

impl TradeSide {
    pub fn of(quantity: Decimal) -> TradeSide {
        if quantity > Decimal::ZERO {
            TradeSide::Buy
        } else if quantity < Decimal::ZERO {
            TradeSide::Sell
        } else {
            TradeSide::Empty
        }
    }
}
