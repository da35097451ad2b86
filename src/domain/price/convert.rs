//! Conversions from wire types to domain types for prices.

use super::wire::{PriceEntry, PricesResponse};
use super::{PricePoint, PriceSeries};
use crate::error::FetchError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

impl TryFrom<PriceEntry> for PricePoint {
    type Error = FetchError;

    fn try_from(entry: PriceEntry) -> Result<Self, Self::Error> {
        let price = Decimal::from_f64(entry.price).ok_or_else(|| {
            FetchError::InvalidPrice(format!("{} at {}", entry.price, entry.reading_date))
        })?;
        Ok(PricePoint::new(entry.reading_date, price))
    }
}

impl TryFrom<PricesResponse> for PriceSeries {
    type Error = FetchError;

    fn try_from(resp: PricesResponse) -> Result<Self, Self::Error> {
        resp.prices
            .into_iter()
            .map(PricePoint::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(PriceSeries::from_points)
    }
}
