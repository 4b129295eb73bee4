pub mod action;
mod results;
mod state;
mod state_store;

pub use self::{
    results::GameResults,
    state::{AnswerState, Screen, ServerConnectionStatus, State},
    state_store::{ConnectionConfig, StateStore},
};
