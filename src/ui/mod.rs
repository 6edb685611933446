//! Rendering layer
//!
//! Each renderer takes a frame, an area and the state it presents; none of
//! them mutate app state. The page renderer is the only one that paints the
//! buffer directly (for the rain backdrop); everything else goes through
//! ratatui widgets.

pub mod nav_bar;
pub mod page;
pub mod status_bar;
pub mod toasts;
