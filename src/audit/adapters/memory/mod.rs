//! In-memory log store.

mod log;

pub use log::InMemoryLogRepository;
