pub mod browser;
pub mod command;
pub mod controller;
pub mod render;

pub use browser::{NavigationError, TransactionBrowser};
pub use command::{Command, CommandError};
pub use controller::{Alert, AlertVariant, ApplyOutcome, FetchRequest, Phase, ResultViewController, ViewState};
pub use render::Renderer;
