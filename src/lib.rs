//! Kanban-style manager for real-estate listings.
//!
//! Listings move through four pipeline columns (paid traffic, premium
//! highlight, general catalog, sold). The [`board::Board`] holds the
//! in-memory state, a [`storage::ListingStore`] persists it and a
//! [`workspace::Workspace`] ties the two together so every change is saved.

pub mod board;
pub mod config;
pub mod generator;
pub mod models;
pub mod storage;
pub mod ui;
pub mod workspace;

pub use board::{Board, ListingForm};
pub use models::{House, MediaItem, MediaKind, Status, COLUMNS};
pub use workspace::Workspace;
