use busbook_shared::{Gender, HeadPassenger, PassengerRecord, SeatId};
use std::collections::{BTreeMap, BTreeSet};

/// Passenger details for a frozen seat selection
#[derive(Debug, Clone, Default)]
pub struct PassengerRoster {
    seats: BTreeSet<SeatId>,
    passengers: BTreeMap<SeatId, PassengerRecord>,
    head: Option<HeadPassenger>,
}

impl PassengerRoster {
    pub fn new(seats: BTreeSet<SeatId>) -> Self {
        Self {
            seats,
            passengers: BTreeMap::new(),
            head: None,
        }
    }

    /// Record the occupant of `seat`. A second record for the same seat replaces the first.
    pub fn record_passenger(
        &mut self,
        seat: SeatId,
        name: impl Into<String>,
        gender: Gender,
        age: u32,
    ) -> Result<&PassengerRecord, RosterError> {
        if !self.seats.contains(&seat) {
            return Err(RosterError::UnknownSeat(seat));
        }

        let record = PassengerRecord {
            seat,
            name: name.into(),
            gender,
            age,
        };
        tracing::debug!(%seat, "Passenger recorded");
        self.passengers.insert(seat, record);
        Ok(&self.passengers[&seat])
    }

    pub fn record_head_passenger(
        &mut self,
        name: impl Into<String>,
        mobile: impl Into<String>,
        email: impl Into<String>,
    ) -> &HeadPassenger {
        self.head.insert(HeadPassenger::new(name, mobile, email))
    }

    pub fn seats(&self) -> &BTreeSet<SeatId> {
        &self.seats
    }

    pub fn passenger(&self, seat: &SeatId) -> Option<&PassengerRecord> {
        self.passengers.get(seat)
    }

    /// Records in seat order
    pub fn passengers(&self) -> impl Iterator<Item = &PassengerRecord> {
        self.passengers.values()
    }

    pub fn head_passenger(&self) -> Option<&HeadPassenger> {
        self.head.as_ref()
    }

    pub fn missing_seats(&self) -> Vec<SeatId> {
        self.seats
            .iter()
            .filter(|s| !self.passengers.contains_key(s))
            .copied()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.head.is_some() && self.missing_seats().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Seat {0} is not part of this booking")]
    UnknownSeat(SeatId),
}
