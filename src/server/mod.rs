pub mod listener;

pub use listener::{run, Server};
