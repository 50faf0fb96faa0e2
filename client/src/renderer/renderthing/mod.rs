pub mod frame;
mod sleeper;
pub mod window;
