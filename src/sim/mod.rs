//! Deterministic drop simulation
//!
//! Everything that moves the token lives here. This module must stay pure
//! and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (one jitter sample at launch)
//! - No rendering or platform dependencies
//!
//! Screen coordinates throughout: origin at the top-left corner, y grows
//! downward. Entries sit on the top edge, exits along the bottom.

pub mod board;
pub mod collision;
pub mod tick;
pub mod token;

pub use board::{Board, Exit, ExitTable};
pub use collision::{Contact, boundary_contacts, circle_contact, resolve_contact};
pub use tick::{DropSimulator, ExitHit};
pub use token::Token;
