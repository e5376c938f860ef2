use crate::model::LayoutId;
use crate::store::BufferSlot;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("Failed to read {0} from buffer: slot is empty")]
    EmptyBuffer(BufferSlot),

    #[error("Referenced widget {0} no longer exists in the dashboard")]
    DanglingReference(String),

    #[error("Widget {widget} is not part of layout {layout} in state {state}")]
    WidgetNotInLayout {
        widget: String,
        state: String,
        layout: LayoutId,
    },

    #[error("Dashboard state not found: {0}")]
    StateNotFound(String),

    #[error("Layout {layout} not found in state {state}")]
    LayoutNotFound { state: String, layout: LayoutId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BufferError>;
