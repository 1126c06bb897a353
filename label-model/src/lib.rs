mod design;
mod editor;
mod element;
mod error;
mod geometry;
mod units;

pub use design::*;
pub use editor::*;
pub use element::*;
pub use error::*;
pub use geometry::*;
pub use units::*;
