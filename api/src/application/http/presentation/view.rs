use foodlens_core::domain::label_analysis::entities::LabelAnalysis;

pub const NO_SELECTION_MESSAGE: &str = "Please select an image first.";

/// Where the upload page is in its select, submit and show cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Selecting {
        filename: String,
    },
    Submitting {
        filename: String,
    },
    Success {
        filename: String,
        analysis: LabelAnalysis,
    },
    Failed {
        filename: Option<String>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FileSelected { filename: String },
    Submitted,
    ResponseReceived(LabelAnalysis),
    RequestFailed(String),
}

impl ViewState {
    /// Apply one event. Events that make no sense in the current state leave
    /// it as is, so a second submit while one is in flight is a no-op.
    pub fn apply(self, event: ViewEvent) -> ViewState {
        match (self, event) {
            (_, ViewEvent::FileSelected { filename }) => ViewState::Selecting { filename },
            (ViewState::Selecting { filename }, ViewEvent::Submitted) => {
                ViewState::Submitting { filename }
            }
            (ViewState::Idle, ViewEvent::Submitted) => ViewState::Failed {
                filename: None,
                message: NO_SELECTION_MESSAGE.to_string(),
            },
            (ViewState::Submitting { filename }, ViewEvent::ResponseReceived(analysis)) => {
                ViewState::Success { filename, analysis }
            }
            (ViewState::Submitting { filename }, ViewEvent::RequestFailed(message)) => {
                ViewState::Failed {
                    filename: Some(filename),
                    message,
                }
            }
            (state, _) => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Submitting { .. })
    }

    pub fn button_disabled(&self) -> bool {
        self.is_loading()
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            ViewState::Idle => None,
            ViewState::Selecting { filename }
            | ViewState::Submitting { filename }
            | ViewState::Success { filename, .. } => Some(filename),
            ViewState::Failed { filename, .. } => filename.as_deref(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn analysis(&self) -> Option<&LabelAnalysis> {
        match self {
            ViewState::Success { analysis, .. } => Some(analysis),
            _ => None,
        }
    }
}
