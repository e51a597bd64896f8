//! Domain logic for MoodLens: the assessment wizard and the session store.
//!
//! Nothing here performs network IO. The wizard is a pure state machine and
//! the session store only touches its own JSON file.

mod session_store;
mod wizard;

pub use session_store::{AUTH_TOKEN_KEY, SessionStore, SessionStoreError, USER_DATA_KEY};
pub use wizard::{
    Advance, AssessmentWizard, Resolution, ValidationError, WizardError, WizardStep,
};
