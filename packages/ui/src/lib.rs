//! Shared UI for the workspace: session context and hooks, auth buttons, and
//! the tag catalog editor.

mod platform;
pub use platform::{
    make_journal, make_session, make_tags, make_trades, AppJournalStore, AppSessionStore,
    AppTagStore, AppTradeStore, PlatformIdentity, PlatformStorage,
};

mod session;
pub use session::{
    use_session, use_session_actions, DemoLoginButton, LoginButton, LogoutButton, SessionActions,
    SessionProvider,
};

mod tags;
pub use tags::TagEditor;
