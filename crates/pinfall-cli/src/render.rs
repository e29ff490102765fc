use pinfall_tenpin::{FrameView, Scoreboard};

const CELL_WIDTH: usize = 5;
const TENTH_CELL_WIDTH: usize = 7;

/// Render the scoreboard as a plain-text table: one line of marks and one
/// line of running totals per player.
pub fn render_text(board: &Scoreboard) -> String {
    let name_width = board
        .lines
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let frame_count = board.lines.first().map_or(0, |l| l.frames.len());
    let mut out = row(
        format!("{:<name_width$} ", "Player"),
        (0..frame_count).map(|i| format!("{:^w$}", i + 1, w = cell_width(i))),
        " Total",
    );

    for line in &board.lines {
        out.push_str(&row(
            format!("{:<name_width$} ", line.name),
            line.frames
                .iter()
                .enumerate()
                .map(|(i, f)| format!("{:>w$}", marks(f), w = cell_width(i))),
            &format!(" {}", line.score),
        ));
        out.push_str(&row(
            format!("{:<name_width$} ", ""),
            line.frames.iter().enumerate().map(|(i, f)| {
                let total = if is_started(f) {
                    f.accumulated_score.to_string()
                } else {
                    String::new()
                };
                format!("{total:>w$}", w = cell_width(i))
            }),
            "",
        ));
    }

    let status = match board.winner {
        Some(winner) => {
            let name = board
                .lines
                .get(winner)
                .map_or("?", |l| l.name.as_str());
            format!("Game over. Winner: {name}\n")
        },
        None => {
            let name = board
                .lines
                .get(board.next_player)
                .map_or("?", |l| l.name.as_str());
            format!("Frame {}, {name} to bowl\n", board.current_frame + 1)
        },
    };
    out.push_str(&status);
    out
}

/// One table row: label, `|`-separated cells, closing `|` and a trailer.
fn row(label: String, cells: impl Iterator<Item = String>, trailer: &str) -> String {
    let mut line = label;
    for cell in cells {
        line.push('|');
        line.push_str(&cell);
    }
    line.push('|');
    line.push_str(trailer);
    line.push('\n');
    line
}

fn cell_width(frame: usize) -> usize {
    if frame + 1 == pinfall_core::FRAME_COUNT {
        TENTH_CELL_WIDTH
    } else {
        CELL_WIDTH
    }
}

fn marks(frame: &FrameView) -> String {
    frame
        .slots
        .iter()
        .map(|s| if s.is_empty() { " " } else { s.as_str() })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_started(frame: &FrameView) -> bool {
    frame.slots.iter().any(|s| !s.is_empty())
}
