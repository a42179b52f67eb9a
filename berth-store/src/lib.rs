pub mod app_config;
pub mod catalog_repo;
pub mod journey_repo;
pub mod waitlist_repo;
pub mod events;

pub use app_config::Config;
pub use catalog_repo::MemoryCatalog;
pub use journey_repo::MemoryJourneyStore;
pub use waitlist_repo::MemoryWaitlist;
pub use events::EventBus;
