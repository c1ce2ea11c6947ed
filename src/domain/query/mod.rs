pub mod filter;
pub mod pagination;

pub use filter::{apply, matches, FilterCriteria};
pub use pagination::{page, total_pages, Page, PaginationState, PAGE_SIZE};
