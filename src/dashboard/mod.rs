pub mod page;
pub mod state;

pub use page::{paginate, total_pages, Page};
pub use state::{cycle_option, next_page_size, reduce, Action, DashboardState, DashboardView, LoadStatus, ViewMode};
