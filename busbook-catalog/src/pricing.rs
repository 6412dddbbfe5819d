use busbook_shared::{Money, Route};

/// Fare for `seat_count` seats on `route`; zero until a route is confirmed.
pub fn total_price(route: Option<&Route>, seat_count: usize) -> Money {
    match route {
        Some(route) => route
            .price_per_seat
            .saturating_mul(Money::try_from(seat_count).unwrap_or(Money::MAX)),
        None => 0,
    }
}
