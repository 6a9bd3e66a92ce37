pub mod editor_panel;
pub mod preview_frame;
pub mod prompt_bar;
