//! # RecordBoard - Paginated Record Dashboard
//!
//! A console client for a remote record store. It lists records one page at
//! a time and lets you create, edit and delete them. The page on screen is
//! always whatever the store last returned: every mutation is followed by a
//! fresh fetch of the current page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  ViewEvents  ┌──────────────────────┐   requests   ┌───────────────┐
//! │ TextRenderer│◄─────────────│  DashboardViewModel  │─────────────▶│ RecordService │
//! └─────────────┘              │                      │◄─────────────│  (HTTP/mock)  │
//!                              │ - PaginationController│ completions  └───────────────┘
//!                              │ - SyncEngine          │
//!                              │ - FormSession         │
//!                              └──────────────────────┘
//!                                        ▲
//!                                        │ commands
//!                               ┌──────────────────┐
//!                               │  AppController   │
//!                               │ - input lines    │
//!                               │ - event loop     │
//!                               └──────────────────┘
//! ```
//!
//! Responses may arrive in any order. Each list fetch carries a ticket and
//! only the latest one is allowed to change the displayed page.

pub mod cmd_args;
pub mod config;
pub mod dashboard;

// Re-export main types for easy access
pub use dashboard::*;
