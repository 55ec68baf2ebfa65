pub mod catalog;
pub mod movie;
pub mod session;
pub mod view;

pub use catalog::{
    CatalogEntry, CatalogPage, TmdbGenre, TmdbMovie, TmdbMovieDetail, TmdbSearchResponse,
};
pub use movie::{Genre, LocalImage, MovieFields, MovieForm, MovieRecord, MovieStats};
pub use session::{AuthState, Session};
pub use view::{SortKey, StatusFilter, ViewParameters, ViewParametersPatch, ALL_GENRES};
