pub mod app;
pub mod config;
pub mod console;
pub mod dialog;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod registry;
pub mod run;
pub mod storage;
pub mod types;
pub mod view;

pub use app::App;
pub use config::Config;
pub use error::{PreconditionError, RunError};
pub use types::*;
