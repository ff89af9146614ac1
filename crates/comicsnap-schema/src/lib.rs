pub mod auth;
pub mod collection;
pub mod comic;
pub mod error;
pub mod model;
pub mod rating;
pub mod recommendation;

pub use auth::{Credentials, ErrorBody, TokenResponse};
pub use collection::{CollectionEntry, FavoriteRequest};
pub use comic::{ComicCard, ComicSummary, ReadComicRequest};
pub use error::ApiError;
pub use model::ComicId;
pub use rating::{Rating, RatingScale};
pub use recommendation::Recommendation;
