use crate::fulfillment;
use crate::models::BookingStage;
use crate::roster::{PassengerRoster, RosterError};
use busbook_catalog::{total_price, CatalogError, RouteCatalog, SeatMap, SeatMapError};
use busbook_core::{PaymentProfile, PaymentRequest};
use busbook_shared::{Gender, Money, Route, SeatId, Ticket};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// The one in-progress booking of a run.
///
/// Every operation either succeeds or returns an error and leaves the
/// session exactly as it was.
#[derive(Debug, Clone)]
pub struct BookingSession {
    id: Uuid,
    catalog: RouteCatalog,
    seat_map: SeatMap,
    payment: PaymentProfile,
    stage: BookingStage,
    route: Option<Route>,
    date: Option<NaiveDate>,
    roster: Option<PassengerRoster>,
    ticket: Option<Ticket>,
    created_at: DateTime<Utc>,
}

impl BookingSession {
    pub fn new(catalog: RouteCatalog, seat_map: SeatMap, payment: PaymentProfile) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, routes = catalog.len(), "Booking session opened");
        Self {
            id,
            catalog,
            seat_map,
            payment,
            stage: BookingStage::default(),
            route: None,
            date: None,
            roster: None,
            ticket: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn stage(&self) -> BookingStage {
        self.stage
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn roster(&self) -> Option<&PassengerRoster> {
        self.roster.as_ref()
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    /// Set route and travel date, replacing any earlier confirmation.
    ///
    /// Already selected seats are kept and re-priced at the new route's fare.
    pub fn confirm_route(&mut self, name: &str, date: NaiveDate) -> Result<&Route, BookingError> {
        if !self.stage.accepts_seat_changes() {
            return Err(BookingError::InvalidTransition {
                from: self.stage,
                to: BookingStage::SeatSelection,
            });
        }

        let route = self.catalog.get(name)?.clone();
        tracing::info!(
            session = %self.id,
            route = %route.name,
            %date,
            price_per_seat = route.price_per_seat,
            "Route confirmed"
        );

        self.date = Some(date);
        self.stage = BookingStage::SeatSelection;
        Ok(self.route.insert(route))
    }

    /// Toggle a seat; returns whether it is selected afterwards
    pub fn toggle_seat(&mut self, seat: SeatId) -> Result<bool, BookingError> {
        let selected = self.seat_map.toggle(seat).map_err(|e| {
            tracing::debug!(session = %self.id, %seat, error = %e, "Seat toggle rejected");
            BookingError::from(e)
        })?;
        tracing::debug!(session = %self.id, total = self.recompute_total(), "Total recomputed");
        Ok(selected)
    }

    pub fn selected_seats(&self) -> &BTreeSet<SeatId> {
        self.seat_map.selected_seats()
    }

    /// Current fare: selected seat count times the confirmed route's price, or 0
    pub fn recompute_total(&self) -> Money {
        total_price(self.route.as_ref(), self.seat_map.selected_seats().len())
    }

    /// Close seat selection and open the passenger roster for the chosen seats
    pub fn proceed_to_checkout(&mut self) -> Result<BTreeSet<SeatId>, BookingError> {
        if !self.stage.accepts_seat_changes() {
            return Err(BookingError::InvalidTransition {
                from: self.stage,
                to: BookingStage::PassengerDetails,
            });
        }
        if self.seat_map.selected_seats().is_empty() {
            return Err(BookingError::NoSeatsSelected);
        }
        if self.route.is_none() {
            return Err(BookingError::RouteNotConfirmed);
        }

        let seats = self.seat_map.freeze();
        self.roster = Some(PassengerRoster::new(seats.clone()));
        self.stage = BookingStage::PassengerDetails;
        tracing::info!(
            session = %self.id,
            seats = seats.len(),
            total = self.recompute_total(),
            "Seat selection frozen"
        );

        Ok(seats)
    }

    pub fn record_passenger(
        &mut self,
        seat: SeatId,
        name: impl Into<String>,
        gender: Gender,
        age: u32,
    ) -> Result<(), BookingError> {
        self.roster_mut("record passenger")?
            .record_passenger(seat, name, gender, age)?;
        Ok(())
    }

    pub fn record_head_passenger(
        &mut self,
        name: impl Into<String>,
        mobile: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), BookingError> {
        let head = self
            .roster_mut("record head passenger")?
            .record_head_passenger(name, mobile, email);
        tracing::debug!(head = ?head, "Head passenger recorded");
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.roster.as_ref().is_some_and(PassengerRoster::is_complete)
    }

    /// Payment request for the current total
    pub fn payment_request(&self) -> PaymentRequest {
        self.payment.request(self.recompute_total())
    }

    /// Move to payment and return the request to show the payer.
    ///
    /// Roster completeness is not checked here; callers gate on
    /// [`BookingSession::is_complete`] before calling.
    pub fn begin_payment(&mut self) -> Result<PaymentRequest, BookingError> {
        if self.stage != BookingStage::PassengerDetails {
            return Err(BookingError::InvalidTransition {
                from: self.stage,
                to: BookingStage::Payment,
            });
        }

        self.stage = BookingStage::Payment;
        let request = self.payment_request();
        tracing::info!(session = %self.id, amount = request.amount, currency = %request.currency, "Awaiting payment");
        Ok(request)
    }

    /// Record that the payer has paid and issue the ticket snapshot
    pub fn confirm_payment(&mut self) -> Result<Ticket, BookingError> {
        if self.stage != BookingStage::Payment {
            return Err(BookingError::InvalidTransition {
                from: self.stage,
                to: BookingStage::TicketIssued,
            });
        }

        let (Some(route), Some(date)) = (self.route.clone(), self.date) else {
            return Err(BookingError::RouteNotConfirmed);
        };
        let roster = match self.roster.as_ref() {
            Some(roster) if roster.is_complete() => roster,
            Some(roster) => {
                return Err(BookingError::RosterIncomplete {
                    missing_seats: roster.missing_seats(),
                    head_missing: roster.head_passenger().is_none(),
                })
            }
            None => {
                return Err(BookingError::RosterIncomplete {
                    missing_seats: Vec::new(),
                    head_missing: true,
                })
            }
        };
        let Some(head_passenger) = roster.head_passenger().cloned() else {
            return Err(BookingError::RosterIncomplete {
                missing_seats: Vec::new(),
                head_missing: true,
            });
        };

        let ticket = Ticket {
            reference: fulfillment::generate_reference(&self.id),
            route,
            date,
            seats: roster.seats().iter().copied().collect(),
            total_price: self.recompute_total(),
            head_passenger,
            passengers: roster.passengers().cloned().collect(),
            issued_at: Utc::now(),
        };

        self.stage = BookingStage::TicketIssued;
        self.ticket = Some(ticket.clone());
        tracing::info!(session = %self.id, reference = %ticket.reference, total = ticket.total_price, "Ticket issued");

        Ok(ticket)
    }

    fn roster_mut(&mut self, operation: &'static str) -> Result<&mut PassengerRoster, BookingError> {
        if !self.stage.accepts_passenger_details() {
            return Err(BookingError::WrongStage {
                operation,
                stage: self.stage,
            });
        }
        let stage = self.stage;
        self.roster
            .as_mut()
            .ok_or(BookingError::WrongStage { operation, stage })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Seat {0} is already booked")]
    SeatUnavailable(SeatId),

    #[error("Seat {0} is not part of this coach")]
    OutsideLayout(SeatId),

    #[error("Seat selection is closed for this booking")]
    SelectionFrozen,

    #[error("No seats selected")]
    NoSeatsSelected,

    #[error("No route has been confirmed")]
    RouteNotConfirmed,

    #[error("Seat {0} is not part of this booking")]
    UnknownSeat(SeatId),

    #[error("Passenger details incomplete: {} seat(s) without a passenger, head passenger missing: {head_missing}", .missing_seats.len())]
    RosterIncomplete {
        missing_seats: Vec<SeatId>,
        head_missing: bool,
    },

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: BookingStage, to: BookingStage },

    #[error("Cannot {operation} during {stage}")]
    WrongStage {
        operation: &'static str,
        stage: BookingStage,
    },

    #[error("Seat map error: {0}")]
    SeatMap(SeatMapError),

    #[error("Catalog error: {0}")]
    Catalog(CatalogError),
}

impl From<SeatMapError> for BookingError {
    fn from(err: SeatMapError) -> Self {
        match err {
            SeatMapError::SeatUnavailable(seat) => BookingError::SeatUnavailable(seat),
            SeatMapError::OutsideLayout(seat) => BookingError::OutsideLayout(seat),
            SeatMapError::SelectionFrozen => BookingError::SelectionFrozen,
            other => BookingError::SeatMap(other),
        }
    }
}

impl From<CatalogError> for BookingError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownRoute(name) => BookingError::UnknownRoute(name),
            other => BookingError::Catalog(other),
        }
    }
}

impl From<RosterError> for BookingError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::UnknownSeat(seat) => BookingError::UnknownSeat(seat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busbook_catalog::SeatLayout;
    use proptest::prelude::*;

    fn seat(id: &str) -> SeatId {
        id.parse().unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
    }

    fn session_with_booked(booked: &[&str]) -> BookingSession {
        let seat_map = SeatMap::new(SeatLayout::default(), booked.iter().map(|s| seat(s))).unwrap();
        BookingSession::new(
            RouteCatalog::reference(),
            seat_map,
            PaymentProfile::new("merchant@bank", "BusBooking", "INR"),
        )
    }

    fn session() -> BookingSession {
        session_with_booked(&[])
    }

    #[test]
    fn test_toggle_and_checkout_scenario() {
        let mut session = session();
        session.confirm_route("Delhi to Mumbai", day()).unwrap();

        assert!(session.toggle_seat(seat("A1")).unwrap());
        assert!(session.toggle_seat(seat("B2")).unwrap());
        assert_eq!(session.recompute_total(), 3000);
        assert!(!session.toggle_seat(seat("A1")).unwrap());
        assert_eq!(session.recompute_total(), 1500);

        let frozen = session.proceed_to_checkout().unwrap();
        assert_eq!(frozen, BTreeSet::from([seat("B2")]));
        assert_eq!(session.stage(), BookingStage::PassengerDetails);
        assert_eq!(session.toggle_seat(seat("C1")), Err(BookingError::SelectionFrozen));
        assert_eq!(session.selected_seats(), &frozen);
    }

    #[test]
    fn test_unknown_route_is_a_no_op() {
        let mut session = session();
        session.confirm_route("Delhi to Mumbai", day()).unwrap();
        session.toggle_seat(seat("A1")).unwrap();

        let result = session.confirm_route("Select Route", day());
        assert_eq!(result, Err(BookingError::UnknownRoute("Select Route".to_string())));
        assert_eq!(session.route().unwrap().name, "Delhi to Mumbai");
        assert_eq!(session.recompute_total(), 1500);
    }

    #[test]
    fn test_reconfirming_route_reprices_selection() {
        let mut session = session();
        session.toggle_seat(seat("A1")).unwrap();
        session.toggle_seat(seat("A2")).unwrap();
        assert_eq!(session.recompute_total(), 0);

        session.confirm_route("Delhi to Mumbai", day()).unwrap();
        assert_eq!(session.recompute_total(), 3000);

        let later = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
        session.confirm_route("Delhi to Bangalore", later).unwrap();
        assert_eq!(session.recompute_total(), 4000);
        assert_eq!(session.date(), Some(later));
        assert_eq!(session.selected_seats().len(), 2);
    }

    #[test]
    fn test_booked_seat_rejected() {
        let mut session = session_with_booked(&["B2"]);
        session.confirm_route("Hyderabad to Pune", day()).unwrap();
        assert_eq!(session.toggle_seat(seat("B2")), Err(BookingError::SeatUnavailable(seat("B2"))));
        assert!(session.selected_seats().is_empty());
        assert_eq!(session.recompute_total(), 0);
    }

    #[test]
    fn test_checkout_requires_seats_then_route() {
        let mut session = session();
        assert_eq!(session.proceed_to_checkout(), Err(BookingError::NoSeatsSelected));
        assert_eq!(session.stage(), BookingStage::RouteSelection);
        assert!(!session.seat_map().is_frozen());

        session.toggle_seat(seat("A1")).unwrap();
        assert_eq!(session.proceed_to_checkout(), Err(BookingError::RouteNotConfirmed));
        assert!(!session.seat_map().is_frozen());
    }

    #[test]
    fn test_route_locked_after_checkout() {
        let mut session = session();
        session.confirm_route("Delhi to Mumbai", day()).unwrap();
        session.toggle_seat(seat("A1")).unwrap();
        session.proceed_to_checkout().unwrap();

        let result = session.confirm_route("Delhi to Bangalore", day());
        assert_eq!(
            result,
            Err(BookingError::InvalidTransition {
                from: BookingStage::PassengerDetails,
                to: BookingStage::SeatSelection,
            })
        );
        assert_eq!(session.recompute_total(), 1500);
    }

    #[test]
    fn test_passenger_details_before_checkout() {
        let mut session = session();
        let result = session.record_passenger(seat("A1"), "Ravi", Gender::Male, 30);
        assert!(matches!(result, Err(BookingError::WrongStage { .. })));
    }

    #[test]
    fn test_unknown_seat_in_roster() {
        let mut session = session();
        session.confirm_route("Delhi to Mumbai", day()).unwrap();
        session.toggle_seat(seat("A1")).unwrap();
        session.toggle_seat(seat("B2")).unwrap();
        session.proceed_to_checkout().unwrap();

        let result = session.record_passenger(seat("C3"), "Ravi", Gender::Male, 30);
        assert_eq!(result, Err(BookingError::UnknownSeat(seat("C3"))));
        assert_eq!(session.roster().unwrap().passengers().count(), 0);
    }

    #[test]
    fn test_full_booking_issues_ticket() {
        let mut session = session();
        session.confirm_route("Delhi to Mumbai", day()).unwrap();
        session.toggle_seat(seat("B2")).unwrap();
        session.toggle_seat(seat("A1")).unwrap();
        session.proceed_to_checkout().unwrap();

        session.record_passenger(seat("A1"), "Ravi", Gender::Male, 30).unwrap();
        session.record_head_passenger("Ravi", "9876543210", "ravi@example.com").unwrap();
        assert!(!session.is_complete());
        session.record_passenger(seat("B2"), "Meera", Gender::Female, 28).unwrap();
        assert!(session.is_complete());

        let request = session.begin_payment().unwrap();
        assert_eq!(request.uri(), "upi://pay?pa=merchant@bank&pn=BusBooking&am=3000&cu=INR");

        let ticket = session.confirm_payment().unwrap();
        assert_eq!(session.stage(), BookingStage::TicketIssued);
        assert!(ticket.reference.starts_with("BUS-"));
        assert_eq!(ticket.route.name, "Delhi to Mumbai");
        assert_eq!(ticket.date, day());
        assert_eq!(ticket.seat_list(), "A1, B2");
        assert_eq!(ticket.total_price, 3000);
        assert_eq!(ticket.passengers.len(), 2);
        assert_eq!(ticket.passengers[0].name, "Ravi");
        assert_eq!(session.ticket(), Some(&ticket));
    }

    #[test]
    fn test_ticket_needs_complete_roster() {
        let mut session = session();
        session.confirm_route("Chennai to Hyderabad", day()).unwrap();
        session.toggle_seat(seat("A1")).unwrap();
        session.toggle_seat(seat("A2")).unwrap();
        session.proceed_to_checkout().unwrap();
        session.record_passenger(seat("A1"), "Ravi", Gender::Male, 30).unwrap();
        session.begin_payment().unwrap();

        let result = session.confirm_payment();
        assert_eq!(
            result,
            Err(BookingError::RosterIncomplete {
                missing_seats: vec![seat("A2")],
                head_missing: true,
            })
        );
        assert_eq!(session.stage(), BookingStage::Payment);

        // Details can still be completed while the payment code is shown
        session.record_passenger(seat("A2"), "Meera", Gender::Female, 28).unwrap();
        session.record_head_passenger("Ravi", "9876543210", "ravi@example.com").unwrap();
        assert_eq!(session.confirm_payment().unwrap().total_price, 2400);
    }

    #[test]
    fn test_payment_steps_out_of_order() {
        let mut session = session();
        assert!(matches!(session.begin_payment(), Err(BookingError::InvalidTransition { .. })));
        assert!(matches!(session.confirm_payment(), Err(BookingError::InvalidTransition { .. })));
        assert_eq!(session.stage(), BookingStage::RouteSelection);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Toggle(SeatId),
        Confirm(usize),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0u8..4, 1u16..=3).prop_map(|(r, c)| Action::Toggle(SeatId::new(char::from(b'A' + r), c).unwrap())),
            (0usize..5).prop_map(Action::Confirm),
        ]
    }

    proptest! {
        #[test]
        fn total_tracks_selection_for_any_interleaving(actions in proptest::collection::vec(action(), 0..50)) {
            let mut session = session_with_booked(&["C2"]);
            for action in actions {
                match action {
                    Action::Toggle(s) => {
                        let _ = session.toggle_seat(s);
                    }
                    Action::Confirm(idx) => {
                        let name = session.catalog().routes()[idx].name.clone();
                        session.confirm_route(&name, day()).unwrap();
                    }
                }
                let expected = session
                    .route()
                    .map(|r| r.price_per_seat * session.selected_seats().len() as Money)
                    .unwrap_or(0);
                prop_assert_eq!(session.recompute_total(), expected);
            }
        }

        #[test]
        fn empty_checkout_never_mutates(confirm in proptest::bool::ANY) {
            let mut session = session();
            if confirm {
                session.confirm_route("Delhi to Mumbai", day()).unwrap();
            }
            let stage = session.stage();
            prop_assert_eq!(session.proceed_to_checkout(), Err(BookingError::NoSeatsSelected));
            prop_assert_eq!(session.stage(), stage);
            prop_assert!(session.roster().is_none());
            prop_assert!(!session.seat_map().is_frozen());
        }
    }
}
