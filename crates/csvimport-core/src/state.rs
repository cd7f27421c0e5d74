//! Pure importer state machine: `idle → parsing → mapping → validating →
//! review → complete`, with an `error` sink and a fixed set of back-edges.
//!
//! The reducer never calls into `csvimport-parser`/`csvimport-map`/
//! `csvimport-validate` itself — callers run those engine operations and
//! dispatch the finished value (a `ParsedMatrix`, a `MappingResult`, a
//! `ValidationResult`) as the action's payload. This keeps the reducer a
//! total, side-effect-free function of `(state, action)`.

use csvimport_model::{MappingResult, ParsedMatrix, ValidationResult};

const PREVIEW_ROWS: usize = 10;

/// A step in the importer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImporterStep {
    Idle,
    Parsing,
    Mapping,
    Validating,
    Review,
    Complete,
    Error,
}

/// An event dispatched to [`importer_reducer`].
#[derive(Debug, Clone)]
pub enum ImporterAction {
    LoadFile { file_name: String, file_size: u64 },
    LoadString { text: String },
    ParseStart,
    ParseComplete { matrix: ParsedMatrix },
    ParseError { message: String },
    SetMapping { mapping: MappingResult },
    UpdateMapping { mapping: MappingResult },
    ConfirmMapping,
    SkipMapping,
    ValidateComplete { result: ValidationResult },
    ValidateError { message: String },
    Accept,
    Reset,
    GoBack,
    SetProgress { progress: f64 },
}

/// The importer's full state at a point in time.
#[derive(Debug, Clone)]
pub struct ImporterState {
    pub step: ImporterStep,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub raw_text: Option<String>,
    pub parsed: Option<ParsedMatrix>,
    pub preview: Vec<Vec<String>>,
    pub mapping: Option<MappingResult>,
    pub validation: Option<ValidationResult>,
    pub progress: Option<f64>,
    pub error_message: Option<String>,
}

impl Default for ImporterState {
    fn default() -> Self {
        Self {
            step: ImporterStep::Idle,
            file_name: None,
            file_size: None,
            raw_text: None,
            parsed: None,
            preview: Vec::new(),
            mapping: None,
            validation: None,
            progress: None,
            error_message: None,
        }
    }
}

/// `createInitialState()`.
pub fn create_initial_state() -> ImporterState {
    ImporterState::default()
}

/// Whether `(from, to)` is a transition the reducer performs for some
/// action, per the lifecycle table.
pub fn is_valid_transition(from: ImporterStep, to: ImporterStep) -> bool {
    use ImporterStep::*;
    matches!(
        (from, to),
        (Idle, Parsing)
            | (Error, Parsing)
            | (Parsing, Mapping)
            | (Parsing, Error)
            | (Mapping, Mapping)
            | (Mapping, Validating)
            | (Validating, Review)
            | (Validating, Error)
            | (Review, Complete)
            | (_, Idle)
            | (Review, Mapping)
            | (Complete, Review)
    )
}

/// The step `GO_BACK` moves to from `step`, if any.
pub fn get_back_steps(step: ImporterStep) -> Option<ImporterStep> {
    use ImporterStep::*;
    match step {
        Mapping => Some(Idle),
        Review => Some(Mapping),
        Complete => Some(Review),
        Error => Some(Idle),
        _ => None,
    }
}

pub fn can_go_back(step: ImporterStep) -> bool {
    get_back_steps(step).is_some()
}

/// True for `mapping` and `review`, the two steps with a forward action.
pub fn can_go_forward(step: ImporterStep) -> bool {
    matches!(step, ImporterStep::Mapping | ImporterStep::Review)
}

/// `importerReducer(state, action) -> state`. Out-of-step actions are no-ops.
pub fn importer_reducer(state: &ImporterState, action: ImporterAction) -> ImporterState {
    let from = state.step;
    let next = importer_reducer_inner(state, action);
    if next.step != from {
        tracing::trace!(from = ?from, to = ?next.step, "importer step transition");
    }
    next
}

fn importer_reducer_inner(state: &ImporterState, action: ImporterAction) -> ImporterState {
    match action {
        ImporterAction::LoadFile { file_name, file_size } => {
            if !matches!(state.step, ImporterStep::Idle | ImporterStep::Error) {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Parsing,
                file_name: Some(file_name),
                file_size: Some(file_size),
                ..ImporterState::default()
            }
        }
        ImporterAction::LoadString { text } => {
            if !matches!(state.step, ImporterStep::Idle | ImporterStep::Error) {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Parsing,
                raw_text: Some(text),
                ..ImporterState::default()
            }
        }
        ImporterAction::ParseStart => {
            if !matches!(state.step, ImporterStep::Idle | ImporterStep::Error) {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Parsing,
                ..state.clone()
            }
        }
        ImporterAction::ParseComplete { matrix } => {
            if state.step != ImporterStep::Parsing {
                return state.clone();
            }
            let preview = matrix.rows.iter().take(PREVIEW_ROWS).cloned().collect();
            ImporterState {
                step: ImporterStep::Mapping,
                parsed: Some(matrix),
                preview,
                ..state.clone()
            }
        }
        ImporterAction::ParseError { message } => {
            if state.step != ImporterStep::Parsing {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Error,
                error_message: Some(message),
                ..state.clone()
            }
        }
        ImporterAction::SetMapping { mapping } | ImporterAction::UpdateMapping { mapping } => {
            if state.step != ImporterStep::Mapping {
                return state.clone();
            }
            ImporterState {
                mapping: Some(mapping),
                ..state.clone()
            }
        }
        ImporterAction::ConfirmMapping | ImporterAction::SkipMapping => {
            if state.step != ImporterStep::Mapping {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Validating,
                ..state.clone()
            }
        }
        ImporterAction::ValidateComplete { result } => {
            if state.step != ImporterStep::Validating {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Review,
                validation: Some(result),
                ..state.clone()
            }
        }
        ImporterAction::ValidateError { message } => {
            if state.step != ImporterStep::Validating {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Error,
                error_message: Some(message),
                ..state.clone()
            }
        }
        ImporterAction::Accept => {
            if state.step != ImporterStep::Review {
                return state.clone();
            }
            ImporterState {
                step: ImporterStep::Complete,
                ..state.clone()
            }
        }
        ImporterAction::Reset => ImporterState::default(),
        ImporterAction::GoBack => match get_back_steps(state.step) {
            Some(ImporterStep::Mapping) => ImporterState {
                step: ImporterStep::Mapping,
                validation: None,
                ..state.clone()
            },
            Some(target) => ImporterState {
                step: target,
                ..state.clone()
            },
            None => state.clone(),
        },
        ImporterAction::SetProgress { progress } => {
            if !matches!(state.step, ImporterStep::Parsing | ImporterStep::Validating) {
                return state.clone();
            }
            ImporterState {
                progress: Some(progress),
                ..state.clone()
            }
        }
    }
}
