mod chat;
mod ingest;
mod renderer;
mod sessions;
mod syntaxes;
mod themes;

pub use chat::*;
pub use ingest::*;
pub use renderer::*;
pub use sessions::*;
pub use syntaxes::*;
pub use themes::*;
