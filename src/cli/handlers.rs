use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{Action, Board, BoardEvent, Target};
use crate::config::{init_project, open_project, Backend, BoardConfig, CORKBOARD_DIR};
use crate::entity::{Color, Note, Point, Size};
use crate::error::{CorkboardError, Result};
use crate::storage::{open_store, PersistenceGateway};
use crate::warnings::{check_size_input, format_warning};
use crate::widget::Zone;

/// Find the project root by looking for .corkboard/ or .git/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(CORKBOARD_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_board() -> Result<(Board, BoardConfig, PathBuf)> {
    let root = find_project_root();
    let (board_dir, config) = open_project(&root)?;
    let store = open_store(&board_dir, config.backend)?;
    let board = Board::hydrate(PersistenceGateway::new(store), config.key.clone())
        .with_default_size(config.default_size());
    Ok((board, config, board_dir))
}

fn validated_size(value: f64) -> Result<f64> {
    check_size_input(value).map_err(|w| CorkboardError::SizeRejected(format_warning(&w)))
}

fn format_note(note: &Note) -> String {
    let size = note.size();
    format!(
        "{} z={:<3} at ({}, {})  {}x{}  {}",
        note.id,
        note.z_index,
        note.x,
        note.y,
        size.width,
        size.height,
        note.color()
    )
}

pub fn handle_init(backend: String) -> Result<()> {
    let root = env::current_dir()?;
    let backend: Backend = backend
        .parse()
        .map_err(|_| CorkboardError::InvalidBackend(backend))?;

    let board_dir = init_project(&root, &BoardConfig::with_backend(backend))?;
    // Open the store once so backends that create files on open do so now.
    open_store(&board_dir, backend)?;

    println!(
        "Initialized corkboard in {} ({} storage)",
        root.display(),
        backend
    );
    Ok(())
}

pub fn handle_add(
    x: f64,
    y: f64,
    width: Option<f64>,
    height: Option<f64>,
    json: bool,
) -> Result<()> {
    let (mut board, config, _) = open_board()?;

    let width = width.map(validated_size).transpose()?.unwrap_or(config.default_width);
    let height = height.map(validated_size).transpose()?.unwrap_or(config.default_height);
    board.set_default_size(Size::new(width, height));

    let actions = board.handle(BoardEvent::DoubleClick {
        target: Target::Background,
        at: Point::new(x, y),
    })?;

    let Some(Action::Created { id, .. }) = actions.into_iter().next() else {
        return Err(CorkboardError::Storage("note was not created".to_string()));
    };
    let note = board
        .note(&id)
        .ok_or_else(|| CorkboardError::NoteNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {} - {}", note.id.short(), format_note(&note));
    }
    Ok(())
}

pub fn handle_list(json: bool) -> Result<()> {
    let (board, _, _) = open_board()?;
    let notes = board.stacking_order();

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }
    for note in &notes {
        println!("{}", format_note(note));
    }
    Ok(())
}

pub fn handle_get(id: String, json: bool) -> Result<()> {
    let (board, _, _) = open_board()?;
    let id = board.resolve_id(&id)?;
    let note = board
        .note(&id)
        .ok_or_else(|| CorkboardError::NoteNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        let size = note.size();
        println!("Note {}", note.id.short());
        println!("  id:       {}", note.id);
        println!("  position: ({}, {})", note.x, note.y);
        println!("  size:     {}x{}", size.width, size.height);
        println!("  z-index:  {}", note.z_index);
        println!("  color:    {} ({})", note.color(), note.color().hex());
    }
    Ok(())
}

/// Drag by the header: grab the note at its top-left and release at (x, y).
pub fn handle_move(id: String, x: f64, y: f64) -> Result<()> {
    let (mut board, _, _) = open_board()?;
    let id = board.resolve_id(&id)?;
    let grab = board
        .note(&id)
        .map(|n| n.position())
        .ok_or_else(|| CorkboardError::NoteNotFound(id.to_string()))?;

    board.handle(BoardEvent::PointerDown {
        target: Target::note(&id, Zone::Header),
        at: grab,
    })?;
    board.handle(BoardEvent::PointerMove {
        at: Point::new(x, y),
    })?;
    board.handle(BoardEvent::PointerUp)?;

    if let Some(note) = board.note(&id) {
        println!("Moved note {} - {}", note.id.short(), format_note(&note));
    }
    Ok(())
}

/// Drag the resize handle from the note's bottom-right corner.
pub fn handle_resize(id: String, width: f64, height: f64) -> Result<()> {
    let (mut board, _, _) = open_board()?;
    let id = board.resolve_id(&id)?;
    let note = board
        .note(&id)
        .ok_or_else(|| CorkboardError::NoteNotFound(id.to_string()))?;
    let origin = note.position();
    let size = note.size();

    board.handle(BoardEvent::PointerDown {
        target: Target::note(&id, Zone::ResizeHandle),
        at: Point::new(origin.x + size.width, origin.y + size.height),
    })?;
    board.handle(BoardEvent::PointerMove {
        at: Point::new(origin.x + width, origin.y + height),
    })?;
    board.handle(BoardEvent::PointerUp)?;

    if let Some(note) = board.note(&id) {
        println!("Resized note {} - {}", note.id.short(), format_note(&note));
    }
    Ok(())
}

pub fn handle_color(id: String, color: String) -> Result<()> {
    let (mut board, _, _) = open_board()?;
    let id = board.resolve_id(&id)?;
    let color: Color = color
        .parse()
        .map_err(|_| CorkboardError::InvalidColor(color))?;

    board.handle(BoardEvent::Click {
        target: Target::note(&id, Zone::Swatch(color)),
    })?;

    println!("Note {} is now {}", id.short(), color);
    Ok(())
}

pub fn handle_front(id: String) -> Result<()> {
    let (mut board, _, _) = open_board()?;
    let id = board.resolve_id(&id)?;

    match board.bring_to_front(&id)? {
        Some(z_index) => println!("Note {} brought to front (z={})", id.short(), z_index),
        None => return Err(CorkboardError::NoteNotFound(id.to_string())),
    }
    Ok(())
}

/// Deleting a note that is already gone succeeds without changing anything.
pub fn handle_delete(id: String) -> Result<()> {
    let (mut board, _, _) = open_board()?;
    let id = match board.resolve_id(&id) {
        Ok(id) => id,
        Err(CorkboardError::NoteNotFound(query)) => {
            println!("No note {}, nothing deleted", query);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    board.handle(BoardEvent::Click {
        target: Target::note(&id, Zone::DeleteControl),
    })?;

    println!("Deleted note {}", id.short());
    Ok(())
}

pub fn handle_defaults(width: Option<f64>, height: Option<f64>) -> Result<()> {
    let root = find_project_root();
    let (board_dir, mut config) = open_project(&root)?;

    if width.is_some() || height.is_some() {
        // Validate both before touching the file so a bad value changes nothing.
        let mut updated = config.clone();
        if let Some(width) = width {
            updated
                .set_default_width(width)
                .map_err(|w| CorkboardError::SizeRejected(format_warning(&w)))?;
        }
        if let Some(height) = height {
            updated
                .set_default_height(height)
                .map_err(|w| CorkboardError::SizeRejected(format_warning(&w)))?;
        }
        updated.save(&board_dir)?;
        config = updated;
    }

    println!("Default width:  {}", config.default_width);
    println!("Default height: {}", config.default_height);
    Ok(())
}

pub fn handle_replay(file: PathBuf, json: bool) -> Result<()> {
    let events = read_events(&file)?;
    let (mut board, _, _) = open_board()?;

    let mut all_actions = Vec::new();
    for event in events {
        all_actions.extend(board.handle(event)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all_actions)?);
    } else {
        for action in &all_actions {
            println!("{}", describe_action(action));
        }
        println!(
            "Replayed onto board: {} notes, highest z-index {}",
            board.len(),
            board.highest_z_index()
        );
    }
    Ok(())
}

fn read_events(path: &Path) -> Result<Vec<BoardEvent>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn describe_action(action: &Action) -> String {
    match action {
        Action::Created { id, z_index } => format!("created {} (z={})", id.short(), z_index),
        Action::Deleted { id } => format!("deleted {}", id.short()),
        Action::BroughtToFront { id, z_index } => {
            format!("front {} (z={})", id.short(), z_index)
        }
        Action::Recolored { id, color } => format!("recolored {} {}", id.short(), color),
        Action::Moved { id, position } => {
            format!("moved {} to ({}, {})", id.short(), position.x, position.y)
        }
        Action::Resized { id, size } => {
            format!("resized {} to {}x{}", id.short(), size.width, size.height)
        }
        Action::InteractionEnded { id } => format!("released {}", id.short()),
    }
}
