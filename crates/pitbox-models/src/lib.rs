#![deny(missing_docs)]

//! # Pit Box Models
//!
//! Core data types for the Pit Box AI chat client.
//!
//! ## Conversation hierarchy
//!
//! ```text
//! SessionSnapshot
//! ├── SessionId
//! ├── SessionPhase (Idle → Active)
//! ├── pending
//! └── turns: [Turn]
//!     ├── TurnId
//!     ├── Role (User | Assistant)
//!     ├── content / created_at
//!     └── failed
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`turn`] | `Turn`, `NewTurn`, `TurnId`, `Role`, `MessageText` |
//! | [`session`] | `SessionId`, `SessionPhase`, `SessionSnapshot` |
//! | [`connectivity`] | `ConnectivityState` |
//! | [`api`] | JSON bodies exchanged with the assistant backend |

pub mod api;
pub mod connectivity;
pub mod error;
pub mod session;
pub mod turn;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `pitbox_models::Turn` directly.
pub use api::*;
pub use connectivity::*;
pub use error::*;
pub use session::*;
pub use turn::*;
