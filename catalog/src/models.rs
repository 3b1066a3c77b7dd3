pub mod comments;
pub mod favorites;
pub mod movies;
pub mod ratings;
pub mod reports;
pub mod users;

pub use comments::{Comment, CommentView, NewComment};
pub use favorites::{Favorite, FavoriteToggle, NewFavorite};
pub use movies::{Movie, MovieListing, NewMovie};
pub use ratings::{NewRating, Rating, ReviewView, UserRating};
pub use reports::{NewReport, Report};
pub use users::{NewUser, User};
