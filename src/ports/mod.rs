//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SlotLedger` - Per-(vendor, date) slot availability state
//! - `BookingStore` - Booking aggregate persistence with atomic slot claims
//! - `MenuReader` - Read-only vendor menu access
//! - `ConversationStore` - Conversations and messages
//!
//! ## Realtime Ports
//!
//! - `EventBroadcaster` - Fire-and-forget fan-out to live connections

mod booking_store;
mod conversation_store;
mod event_broadcaster;
mod menu_reader;
mod slot_ledger;

pub use booking_store::{BookingStore, BookingStoreError};
pub use conversation_store::{ConversationStore, ConversationStoreError, ConversationSummary};
pub use event_broadcaster::{BroadcastEvent, EventBroadcaster};
pub use menu_reader::{MenuReader, MenuReaderError};
pub use slot_ledger::{AvailabilityView, SlotLedger, SlotLedgerError};
