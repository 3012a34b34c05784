// Interface adapters: line protocol, keyboard input and frame output.

pub mod input;
pub mod protocol;
pub mod render;
pub mod utils;
