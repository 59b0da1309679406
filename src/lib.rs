//! Vendora - Event-Vendor Marketplace Booking Core
//!
//! This crate implements the booking and availability coordination subsystem
//! of the Vendora marketplace: the per-vendor slot ledger, the transactional
//! booking engine, and the real-time hub that fans out vendor location
//! updates and chat messages to connected clients.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
