//! Commercial proposals and invoices: line items, totals, and their text rendering.
mod item;
mod parties;
mod render;
mod state;
mod types;

pub use item::*;
pub use parties::*;
pub use render::*;
pub use state::*;
pub use types::*;
