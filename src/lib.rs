//! Client core of a personal movie watchlist: remote collaborators, record
//! normalization, form validation and the watchlist view model.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod validation;
pub mod watchlist;

pub use app::{AppContext, AppParts};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use watchlist::{WatchlistSnapshot, WatchlistViewModel};
