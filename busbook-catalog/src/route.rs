use busbook_shared::{Money, Route};

/// Static table of sellable routes, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    /// Build a catalog, rejecting zero prices, blank names and duplicates
    pub fn new(routes: Vec<Route>) -> Result<Self, CatalogError> {
        for (idx, route) in routes.iter().enumerate() {
            if route.name.trim().is_empty() {
                return Err(CatalogError::BlankName);
            }
            if route.price_per_seat == 0 {
                return Err(CatalogError::InvalidPrice(route.name.clone()));
            }
            if routes[..idx].iter().any(|r| r.name == route.name) {
                return Err(CatalogError::DuplicateRoute(route.name.clone()));
            }
        }

        Ok(Self { routes })
    }

    /// The reference timetable the booking counter ships with
    pub fn reference() -> Self {
        Self {
            routes: reference_routes(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Route, CatalogError> {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CatalogError::UnknownRoute(name.to_string()))
    }

    pub fn price_of(&self, name: &str) -> Result<Money, CatalogError> {
        self.get(name).map(|r| r.price_per_seat)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

pub fn reference_routes() -> Vec<Route> {
    vec![
        Route::new("Delhi to Mumbai", 1500),
        Route::new("Delhi to Bangalore", 2000),
        Route::new("Mumbai to Bangalore", 1800),
        Route::new("Chennai to Hyderabad", 1200),
        Route::new("Hyderabad to Pune", 1000),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Route '{0}' must have a positive price per seat")]
    InvalidPrice(String),

    #[error("Route '{0}' is listed more than once")]
    DuplicateRoute(String),

    #[error("Route name must not be blank")]
    BlankName,
}
