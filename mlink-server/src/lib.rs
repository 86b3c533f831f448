pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod mailer;
pub mod pages;
pub mod routes;
pub mod state;


pub use api::{
    files::{DownloadQuery, download, upload_image},
    home::home,
    login::{CompleteLoginQuery, MagicLinkRequest, complete_login, logout, request_magic_link},
    register::register,
    users::list_users,
};
pub use error::{Result as ServerResult, ServerError};
pub use mailer::{LogMailer, Mailer, MailerError, SendGridMailer};
pub use routes::build_router;
pub use state::AppState;
