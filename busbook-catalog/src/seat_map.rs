use busbook_shared::{SeatId, SeatIdError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rectangular seating grid: rows lettered from `A`, columns numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    pub rows: u8,
    pub columns: u16,
}

impl SeatLayout {
    pub const MAX_ROWS: u8 = 26;

    pub fn new(rows: u8, columns: u16) -> Result<Self, SeatMapError> {
        if rows == 0 || rows > Self::MAX_ROWS || columns == 0 {
            return Err(SeatMapError::InvalidLayout { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    /// Seat ids row by row (`A1, A2, A3, B1, ...`)
    pub fn grid(&self) -> Result<Vec<Vec<SeatId>>, SeatMapError> {
        (0..self.rows)
            .map(|r| {
                let letter = char::from(b'A' + r);
                (1..=self.columns)
                    .map(|c| SeatId::new(letter, c).map_err(SeatMapError::from))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        let row = seat.row() as u32;
        row >= 'A' as u32
            && row < 'A' as u32 + u32::from(self.rows)
            && seat.column() <= self.columns
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self { rows: 4, columns: 3 }
    }
}

/// Where a seat stands for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Booked,
    Selected,
}

/// Seat availability for one session.
///
/// `booked` is fixed when the map is built. `selected` changes through
/// [`SeatMap::toggle`] until [`SeatMap::freeze`] is called. The two sets
/// never overlap.
#[derive(Debug, Clone)]
pub struct SeatMap {
    layout: SeatLayout,
    grid: Vec<Vec<SeatId>>,
    booked: BTreeSet<SeatId>,
    selected: BTreeSet<SeatId>,
    frozen: bool,
}

impl SeatMap {
    pub fn new(layout: SeatLayout, booked: impl IntoIterator<Item = SeatId>) -> Result<Self, SeatMapError> {
        let layout = SeatLayout::new(layout.rows, layout.columns)?;
        let booked: BTreeSet<SeatId> = booked.into_iter().collect();
        if let Some(seat) = booked.iter().find(|s| !layout.contains(s)) {
            return Err(SeatMapError::OutsideLayout(*seat));
        }

        Ok(Self {
            layout,
            grid: layout.grid()?,
            booked,
            selected: BTreeSet::new(),
            frozen: false,
        })
    }

    pub fn layout(&self) -> SeatLayout {
        self.layout
    }

    /// Seat ids grouped by row, for display
    pub fn rows(&self) -> &[Vec<SeatId>] {
        &self.grid
    }

    /// Flip a seat in or out of the selection; returns whether it is now selected.
    pub fn toggle(&mut self, seat: SeatId) -> Result<bool, SeatMapError> {
        if !self.layout.contains(&seat) {
            return Err(SeatMapError::OutsideLayout(seat));
        }
        if self.booked.contains(&seat) {
            return Err(SeatMapError::SeatUnavailable(seat));
        }
        if self.frozen {
            return Err(SeatMapError::SelectionFrozen);
        }

        if self.selected.remove(&seat) {
            tracing::debug!(%seat, "Seat deselected");
            Ok(false)
        } else {
            self.selected.insert(seat);
            tracing::debug!(%seat, "Seat selected");
            Ok(true)
        }
    }

    pub fn selected_seats(&self) -> &BTreeSet<SeatId> {
        &self.selected
    }

    pub fn booked_seats(&self) -> &BTreeSet<SeatId> {
        &self.booked
    }

    pub fn status(&self, seat: &SeatId) -> Option<SeatStatus> {
        if !self.layout.contains(seat) {
            None
        } else if self.booked.contains(seat) {
            Some(SeatStatus::Booked)
        } else if self.selected.contains(seat) {
            Some(SeatStatus::Selected)
        } else {
            Some(SeatStatus::Available)
        }
    }

    pub fn available_count(&self) -> usize {
        self.grid.iter().map(Vec::len).sum::<usize>() - self.booked.len() - self.selected.len()
    }

    /// Stop accepting toggles and hand back the final selection
    pub fn freeze(&mut self) -> BTreeSet<SeatId> {
        self.frozen = true;
        self.selected.clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatMapError {
    #[error("Seat {0} is already booked")]
    SeatUnavailable(SeatId),

    #[error("Seat {0} is not part of this coach")]
    OutsideLayout(SeatId),

    #[error("Seat selection is closed for this booking")]
    SelectionFrozen,

    #[error("Invalid seat layout: {rows} rows x {columns} columns")]
    InvalidLayout { rows: u8, columns: u16 },

    #[error(transparent)]
    InvalidSeatId(#[from] SeatIdError),
}
