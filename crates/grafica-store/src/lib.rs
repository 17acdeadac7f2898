//! # grafica-store: Persistence Layer for the Gráfica DTF Console
//!
//! This crate owns the durable state of the console. It loads every
//! collection from local key-value storage at startup (seeding on first run
//! or on unreadable data) and writes each collection back whole after every
//! mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Gráfica DTF Data Flow                             │
//! │                                                                         │
//! │  Frontend command (approve_order_files, add_supply_purchase, ...)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   grafica-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐       │   │
//! │  │   │    Store     │   │   Database   │   │     seed     │       │   │
//! │  │   │  (store/)    │   │   (kv.rs)    │   │  (seed.rs)   │       │   │
//! │  │   │              │   │              │   │              │       │   │
//! │  │   │ collections  │◄──│ SQLite KV    │   │ first-run    │       │   │
//! │  │   │ + contracts  │   │ one row per  │   │ sample data  │       │   │
//! │  │   │              │   │ collection   │   │              │       │   │
//! │  │   └──────────────┘   └──────────────┘   └──────────────┘       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file: collections(key TEXT PRIMARY KEY, value TEXT)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Model
//! Single logical writer, whole-collection writes, last write wins. There is
//! no transactional grouping across collections: an interruption between the
//! supplies write and the orders write of one workflow step can leave them
//! inconsistent. Acceptable for a local single-user tool.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{Database, DbConfig};
pub use store::Store;
