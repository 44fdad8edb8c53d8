//! # Views Module
//!
//! Plain-text presentation of the dashboard state.

pub mod text_renderer;

pub use text_renderer::{
    render_form, render_list, render_pagination, render_status, TextRenderer,
};
