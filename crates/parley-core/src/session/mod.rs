//! Session domain module.
//!
//! This module contains conversation history types and the explicit turn
//! state used as the session's reentrancy guard.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`Sender`, `Message`, `Annotation`)
//! - `history`: Append-only history with a transient reply placeholder
//! - `turn_phase`: Turn state machine (`TurnPhase`)

mod history;
mod message;
mod turn_phase;

pub use history::{History, PLACEHOLDER_TEXT};
pub use message::{Annotation, Message, Sender, TurnAnalysis};
pub use turn_phase::TurnPhase;
