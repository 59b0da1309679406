//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PgSlotLedger` - Per-(vendor, date) availability records with row-lock claims
//! - `PgBookingStore` - Booking aggregates, transactional with their slot claims
//! - `PgMenuReader` - Read-only menu item lookups for selection validation
//! - `PgConversationStore` - Conversations and messages

mod booking_store;
mod conversation_store;
mod menu_reader;
mod slot_ledger;

pub use booking_store::PgBookingStore;
pub use conversation_store::PgConversationStore;
pub use menu_reader::PgMenuReader;
pub use slot_ledger::PgSlotLedger;
