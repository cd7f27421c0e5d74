//! The pure importer reducer that sequences parse, map, and validate into
//! one lifecycle, plus the final-result assembly step.

#![deny(unsafe_code)]

pub mod result;
pub mod state;

pub use result::{ImportResult, build_import_result};
pub use state::{
    ImporterAction, ImporterState, ImporterStep, can_go_back, can_go_forward, create_initial_state,
    get_back_steps, importer_reducer, is_valid_transition,
};
