/// Yew components for the popup

pub mod bridge;
pub mod cards;
pub mod popup;
