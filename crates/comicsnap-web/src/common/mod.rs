mod route;
pub use route::Route;

mod session;
pub use session::Session;

mod cover;
pub use cover::Cover;

mod status;
pub use status::{render_message, ListStatus};

mod modal;
pub use modal::RatingModal;

mod navbar;
pub use navbar::Navbar;

pub mod events;

pub mod icons;

pub mod snackbar;

pub mod spinner;
