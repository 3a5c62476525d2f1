pub mod catalog;
pub mod tmdb;

pub use catalog::{
    CatalogItem, CatalogList, FeaturedSelection, HomeCatalog, ItemDetail, MediaType,
};
pub use tmdb::{TmdbDetail, TmdbListItem, TmdbPage};
