//! Physical button input: debouncing and transport command mapping.

pub mod button;
pub mod controls;

pub use button::DebouncedButton;
pub use controls::Controls;
