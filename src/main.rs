use clap::Parser;
use corkboard::cli::{
    handle_add, handle_color, handle_defaults, handle_delete, handle_front, handle_get,
    handle_init, handle_list, handle_move, handle_replay, handle_resize, Cli, Commands,
};

fn main() {
    let cli = Cli::parse();
    corkboard::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { backend } => handle_init(backend),
        Commands::Add {
            x,
            y,
            width,
            height,
            json,
        } => handle_add(x, y, width, height, json),
        Commands::List { json } => handle_list(json),
        Commands::Get { id, json } => handle_get(id, json),
        Commands::Move { id, x, y } => handle_move(id, x, y),
        Commands::Resize { id, width, height } => handle_resize(id, width, height),
        Commands::Color { id, color } => handle_color(id, color),
        Commands::Front { id } => handle_front(id),
        Commands::Delete { id } => handle_delete(id),
        Commands::Defaults { width, height } => handle_defaults(width, height),
        Commands::Replay { file, json } => handle_replay(file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
