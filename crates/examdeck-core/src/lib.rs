pub mod clipboard;
pub mod context_menu;
pub mod db;
pub mod edit;
pub mod error;
pub mod location;
pub mod prompt;
pub mod router;
pub mod seed;
pub mod session;
pub mod store;
pub mod theme;
pub mod view;
