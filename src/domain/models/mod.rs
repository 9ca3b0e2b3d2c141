mod attachment;
mod backend;
mod block;
mod message;
mod session;
mod slash_commands;
mod theme;

pub use attachment::*;
pub use backend::*;
pub use block::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use theme::*;
