//! Session runtime: turn orchestration, trainer refresh and replay view.

mod chat_session;
mod factory;
mod state;

pub use chat_session::{ChatSession, TRAINER_CONTEXT, TurnOutcome};
pub use factory::SessionFactory;
pub use state::SessionView;
