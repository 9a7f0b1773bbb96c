mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_color, handle_defaults, handle_delete, handle_front, handle_get,
    handle_init, handle_list, handle_move, handle_replay, handle_resize,
};
