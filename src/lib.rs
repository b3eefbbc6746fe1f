pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod reader;
pub mod render;

pub use config::Config;
pub use error::{Error, Result};
pub use feed::{Feed, NormalizedRecord, RawItem};
pub use reader::NewsReader;
pub use render::{OutputMode, Renderer};
