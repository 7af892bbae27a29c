mod auth;
mod health_check;
mod images;

pub use auth::login;
pub use auth::signup;
pub use health_check::health_check;
pub use images::get_image;
pub use images::upload_image;
