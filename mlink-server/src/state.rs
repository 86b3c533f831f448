use crate::mailer::Mailer;

use mlink_auth::SessionService;
use mlink_store::UserStore;

use std::path::PathBuf;
use std::sync::Arc;

/// Shared handler state, injected into every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserStore>,
    pub sessions: Arc<SessionService>,
    pub mailer: Arc<dyn Mailer>,
    /// Directory holding HTML pages, avatars, and uploaded images
    pub public_dir: PathBuf,
    /// Base URL embedded into magic links, without a trailing slash
    pub public_url: String,
    /// Name of the httpOnly session cookie
    pub cookie_name: String,
}
