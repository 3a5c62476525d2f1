pub mod aggregator;
pub mod catalog;
pub mod page;
pub mod random;

pub use aggregator::{CategoryRequest, CategorySet, ListAggregator, TitlePage};
pub use catalog::{CatalogSource, Endpoint, TmdbClient};
pub use page::{PageController, PageState, Visit};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
