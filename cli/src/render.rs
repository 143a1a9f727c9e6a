use gongbing_core::*;

/// Text glyph for one cell: `#` hidden, `F` flagged, `*` mine, `.` zero, otherwise the mine count.
pub fn cell_glyph(cell: Cell) -> char {
    if !cell.is_revealed {
        return if cell.is_flagged { 'F' } else { '#' };
    }
    match (cell.is_mine, cell.adjacent_mines) {
        (true, _) => '*',
        (false, 0) => '.',
        (false, count) => char::from(b'0' + count),
    }
}

pub fn board<G: MineGenerator, C: Clock>(engine: &Engine<G, C>) -> String {
    let (width, height) = engine.size();
    let mut out = String::with_capacity((usize::from(width) + 1) * usize::from(height));
    for y in 0..height {
        for x in 0..width {
            out.push(cell_glyph(engine.cell_at((x, y)).unwrap_or_default()));
        }
        out.push('\n');
    }
    out
}

pub fn status<G: MineGenerator, C: Clock>(engine: &Engine<G, C>) -> String {
    let message = match engine.phase() {
        GamePhase::NotStarted | GamePhase::InProgress => "Type h for help",
        GamePhase::Won => "You win! Type n to restart.",
        GamePhase::Lost => "Game over! Type n to restart.",
    };
    format!(
        "Mines: {}   Flags: {}   Time: {}   {}",
        engine.total_mines(),
        engine.flags_remaining(),
        engine.elapsed_secs(),
        message
    )
}
