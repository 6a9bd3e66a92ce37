pub mod api;
pub mod document;
pub mod preview_state;
