pub mod handlers;
pub mod style;
pub mod grid;
pub mod page;

pub use handlers::{GridActionError, GridHandlers};
pub use grid::TimeGrid;
pub use page::render_page;
