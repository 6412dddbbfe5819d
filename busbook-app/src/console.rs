use crate::error::{AppError, AppResult};
use busbook_catalog::SeatStatus;
use busbook_core::PaymentCodeRenderer;
use busbook_order::{BookingError, BookingSession, BookingStage};
use busbook_shared::{Gender, SeatId};
use busbook_store::ReceiptStore;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Line-oriented front end walking one session through every booking stage.
///
/// Rejected input is reported as a notice and the same step is asked again.
pub struct Console<R, W> {
    input: R,
    output: W,
    payment_code: Box<dyn PaymentCodeRenderer>,
    receipts: ReceiptStore,
    currency_symbol: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        input: R,
        output: W,
        payment_code: impl PaymentCodeRenderer + 'static,
        receipts: ReceiptStore,
    ) -> Self {
        Self {
            input,
            output,
            payment_code: Box::new(payment_code),
            receipts,
            currency_symbol: "₹".to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drive the session to an issued ticket and return the written receipt files
    pub fn run(&mut self, session: &mut BookingSession) -> AppResult<Vec<PathBuf>> {
        loop {
            match session.stage() {
                BookingStage::RouteSelection => self.route_step(session)?,
                BookingStage::SeatSelection => self.seat_step(session)?,
                BookingStage::PassengerDetails => self.passenger_step(session)?,
                BookingStage::Payment => self.payment_step(session)?,
                BookingStage::TicketIssued => break,
            }
        }

        let Some(ticket) = session.ticket() else {
            return Err(AppError::Booking(BookingError::InvalidTransition {
                from: session.stage(),
                to: BookingStage::TicketIssued,
            }));
        };
        let paths = self.receipts.save(ticket)?;
        if let Some(receipt) = paths.first() {
            self.notice(
                "Ticket Generated",
                &format!("Your ticket {} has been saved to:\n{}", ticket.reference, receipt.display()),
            )?;
        }
        Ok(paths)
    }

    fn route_step(&mut self, session: &mut BookingSession) -> AppResult<()> {
        writeln!(self.output, "Routes:")?;
        for (i, route) in session.catalog().routes().iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {} ({}{} per seat)",
                i + 1,
                route.name,
                self.currency_symbol,
                route.price_per_seat
            )?;
        }

        let choice = self.prompt("Select route (name or number): ")?;
        let name = match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= session.catalog().len() => session.catalog().routes()[n - 1].name.clone(),
            _ => choice,
        };

        let raw_date = self.prompt("Select date (yyyy-mm-dd): ")?;
        let date = match NaiveDate::parse_from_str(&raw_date, DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => return self.notice("Select Date", &format!("'{}' is not a date like 2026-11-02", raw_date)),
        };

        match session.confirm_route(&name, date) {
            Ok(route) => {
                let body = format!(
                    "Route: {}\nDate: {}\nPrice per Seat: {}{}",
                    route.name,
                    date.format(DATE_FORMAT),
                    self.currency_symbol,
                    route.price_per_seat
                );
                self.notice("Route Confirmed", &body)
            }
            Err(BookingError::UnknownRoute(_)) => self.notice("Select Route", "Please select a valid route!"),
            Err(e) => self.notice("Select Route", &e.to_string()),
        }
    }

    fn seat_step(&mut self, session: &mut BookingSession) -> AppResult<()> {
        self.draw_seats(session)?;
        let input = self.prompt("Seat to toggle ('route' to change route, 'done' to proceed): ")?;

        match input.to_ascii_lowercase().as_str() {
            "done" => match session.proceed_to_checkout() {
                Ok(_) => Ok(()),
                Err(BookingError::NoSeatsSelected) => self.notice("No Seats", "Please select at least one seat!"),
                Err(e) => self.notice("Proceed", &e.to_string()),
            },
            "route" => self.route_step(session),
            _ => {
                let seat = match input.parse::<SeatId>() {
                    Ok(seat) => seat,
                    Err(e) => return self.notice("Select Seat", &e.to_string()),
                };
                match session.toggle_seat(seat) {
                    Ok(_) => Ok(()),
                    Err(BookingError::SeatUnavailable(seat)) => {
                        self.notice("Seat Booked", &format!("Seat {} is already booked!", seat))
                    }
                    Err(e) => self.notice("Select Seat", &e.to_string()),
                }
            }
        }
    }

    fn draw_seats(&mut self, session: &BookingSession) -> AppResult<()> {
        let map = session.seat_map();
        writeln!(self.output, "Seats: [A1] free  (A1) selected  <A1> booked")?;
        for row in map.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|seat| match map.status(seat) {
                    Some(SeatStatus::Selected) => format!("({})", seat),
                    Some(SeatStatus::Booked) => format!("<{}>", seat),
                    _ => format!("[{}]", seat),
                })
                .collect();
            writeln!(self.output, "  {}", cells.join(" "))?;
        }
        writeln!(self.output, "Total Price: {}{}", self.currency_symbol, session.recompute_total())?;
        Ok(())
    }

    fn passenger_step(&mut self, session: &mut BookingSession) -> AppResult<()> {
        let (seats, head_missing) = match session.roster() {
            Some(roster) => (
                roster.seats().iter().copied().collect::<Vec<_>>(),
                roster.head_passenger().is_none(),
            ),
            None => (Vec::new(), true),
        };
        let missing: Vec<SeatId> = session.roster().map(|r| r.missing_seats()).unwrap_or_default();

        writeln!(self.output, "Enter Passenger Details")?;
        for (i, seat) in seats.iter().enumerate() {
            if !missing.contains(seat) {
                continue;
            }
            writeln!(self.output, "Passenger {} (Seat {}):", i + 1, seat)?;
            let name = self.prompt("  Name: ")?;
            let gender = self.read_gender()?;
            let age = self.read_age()?;
            session.record_passenger(*seat, name, gender, age)?;
        }

        if head_missing {
            writeln!(self.output, "Head Passenger:")?;
            let name = self.prompt("  Name: ")?;
            let mobile = self.prompt("  Mobile: ")?;
            let email = self.prompt("  Email: ")?;
            session.record_head_passenger(name, mobile, email)?;
        }

        if !session.is_complete() {
            return self.notice("Passenger Details", "Some passenger details are still missing");
        }

        let request = session.begin_payment()?;
        let code = self.payment_code.render(&request)?;
        writeln!(self.output, "{}", code)?;
        Ok(())
    }

    fn payment_step(&mut self, session: &mut BookingSession) -> AppResult<()> {
        let input = self.prompt("Type 'paid' once the payment is done ('show' to see the code again): ")?;
        match input.to_ascii_lowercase().as_str() {
            "paid" => match session.confirm_payment() {
                Ok(_) => Ok(()),
                Err(e) => self.notice("Payment", &e.to_string()),
            },
            "show" => {
                let code = self.payment_code.render(&session.payment_request())?;
                writeln!(self.output, "{}", code)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn read_gender(&mut self) -> AppResult<Gender> {
        loop {
            let raw = self.prompt("  Gender (Male/Female/Other): ")?;
            match raw.parse::<Gender>() {
                Ok(gender) => return Ok(gender),
                Err(e) => self.notice("Gender", &e.to_string())?,
            }
        }
    }

    fn read_age(&mut self) -> AppResult<u32> {
        loop {
            let raw = self.prompt("  Age: ")?;
            match raw.parse::<u32>() {
                Ok(age) => return Ok(age),
                Err(_) => self.notice("Age", &format!("'{}' is not a whole number", raw))?,
            }
        }
    }

    fn prompt(&mut self, label: &str) -> AppResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn notice(&mut self, title: &str, body: &str) -> AppResult<()> {
        writeln!(self.output, "[{}] {}", title, body)?;
        Ok(())
    }
}
