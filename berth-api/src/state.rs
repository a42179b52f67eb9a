use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use berth_catalog::{FareCalculator, LayoutGenerator, TrainRepository};
use berth_order::{BookingSession, CheckoutFlow, CheckoutOrchestrator, JourneyRepository, MockPaymentGateway, WaitlistRepository};
use berth_store::{Config, EventBus, MemoryCatalog, MemoryJourneyStore, MemoryWaitlist};
use crate::error::AppError;

/// One user's booking in progress.
#[derive(Debug, Default)]
pub struct Session {
    pub booking: BookingSession,
    pub checkout: CheckoutFlow,
    /// Set while a charge is with the gateway. The session lock is not held
    /// for that call, so edits check this instead.
    pub paying: bool,
}

impl Session {
    pub fn new(fares: FareCalculator) -> Self {
        Self {
            booking: BookingSession::new(fares),
            checkout: CheckoutFlow::new(),
            paying: false,
        }
    }

    pub fn ensure_idle(&self) -> Result<(), AppError> {
        if self.paying {
            return Err(AppError::conflict("Payment in progress"));
        }
        Ok(())
    }
}

pub type Sessions = Arc<RwLock<HashMap<Uuid, Session>>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn TrainRepository>,
    pub journeys: Arc<dyn JourneyRepository>,
    pub waitlist: Arc<dyn WaitlistRepository>,
    pub sessions: Sessions,
    pub fares: FareCalculator,
    pub layout: Arc<LayoutGenerator>,
    pub checkout: Arc<CheckoutOrchestrator>,
    pub events: EventBus,
}

impl AppState {
    /// State backed by the in-memory demo stores and the mock gateway.
    pub fn from_config(config: &Config) -> Self {
        Self {
            catalog: Arc::new(MemoryCatalog::new()),
            journeys: Arc::new(MemoryJourneyStore::seeded()),
            waitlist: Arc::new(MemoryWaitlist::seeded()),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            fares: FareCalculator::new(config.fares.to_fare_config()),
            layout: Arc::new(LayoutGenerator::new(config.layout.to_policy())),
            checkout: Arc::new(CheckoutOrchestrator::new(Arc::new(MockPaymentGateway))),
            events: EventBus::default(),
        }
    }

    pub fn new_session(&self) -> Session {
        Session::new(self.fares.clone())
    }
}
