//! Brick-offset text rendering of a board.
//!
//! Every node takes three columns and every gap three more, odd rows are shifted right by one
//! cell so the diagonals line up. Two edge rows sit between node rows.

use hexbreach_core::{Board, BoardState, Coord, Node, TokenKind};

fn node_label(board: &Board, node: &Node) -> String {
    let token = node.token().filter(|_| node.is_visited()).map(|token| token.kind());

    if board.selected() == Some(node.coords()) {
        match board.distance_to_core_capped() {
            Some(distance) => format!("({distance})"),
            None => "( )".into(),
        }
    } else if node.is_blocked() {
        " x ".into()
    } else if token == Some(TokenKind::Core) {
        " @ ".into()
    } else if token == Some(TokenKind::Firewall) {
        " # ".into()
    } else if node.is_visited() {
        "( )".into()
    } else if node.is_exposed() {
        match u8::try_from(node.input_tag()) {
            Ok(tag) if tag < 26 => format!("[{}]", char::from(b'A' + tag)),
            _ => "[?]".into(),
        }
    } else {
        " . ".into()
    }
}

fn present(board: &Board, row: Coord, col: Coord) -> bool {
    board.node((row, col)).is_some()
}

fn node_row(board: &Board, row: Coord) -> String {
    let width = board.size().1;
    let mut line = String::new();
    if row % 2 == 1 {
        line.push_str("   ");
    }
    for col in 0..width {
        match board.node((row, col)) {
            Some(node) => line.push_str(&node_label(board, node)),
            None => line.push_str("   "),
        }
        let joined = col + 1 < width && present(board, row, col) && present(board, row, col + 1);
        line.push_str(if joined { "---" } else { "   " });
    }
    line
}

/// The two edge rows between `row` and `row + 1`.
fn edge_rows(board: &Board, row: Coord) -> [String; 2] {
    let width = board.size().1;
    let mut upper = String::from(" ");
    let mut lower = String::from(" ");

    for col in 0..width {
        let here = present(board, row, col);
        let below = present(board, row + 1, col);
        let (down_upper, down_lower) = match row % 2 {
            0 => (r" \  ", r"  \ "),
            _ => (r"  / ", r" /  "),
        };
        if here && below {
            upper.push_str(down_upper);
            lower.push_str(down_lower);
        } else {
            upper.push_str("    ");
            lower.push_str("    ");
        }

        if col + 1 >= width {
            continue;
        }
        let crossing = if row % 2 == 0 {
            present(board, row, col + 1) && below
        } else {
            here && present(board, row + 1, col + 1)
        };
        let (cross_upper, cross_lower) = match row % 2 {
            0 => (" /", "/ "),
            _ => (r"\ ", r" \"),
        };
        if crossing {
            upper.push_str(cross_upper);
            lower.push_str(cross_lower);
        } else {
            upper.push_str("  ");
            lower.push_str("  ");
        }
    }
    [upper, lower]
}

/// Grid followed by the status lines.
pub fn render(board: &Board) -> Vec<String> {
    let height = board.size().0;
    let mut lines = Vec::new();

    for row in 0..height {
        lines.push(node_row(board, row));
        if row + 1 < height {
            lines.extend(edge_rows(board, row));
        }
    }
    lines.push(String::new());

    let virus = board.virus();
    if !virus.is_destroyed() {
        lines.push(format!("VIRUS ({}/{})", virus.coherence(), virus.strength()));
    }
    let core_visited = board.node(board.core()).is_some_and(Node::is_visited);
    if let Some(core) = board.core_token().filter(|_| core_visited) {
        lines.push(format!("CORE ({}/{})", core.coherence(), core.strength()));
    }
    match board.state() {
        BoardState::Active => {}
        BoardState::Won => lines.push("CORE DESTROYED".into()),
        BoardState::Lost => lines.push("VIRUS DESTROYED".into()),
    }

    for line in &mut lines {
        line.truncate(line.trim_end().len());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_shows_progress_and_letters() {
        let board = Board::with_layout((1, 3), &[], (0, 0), (0, 2), &[]).unwrap();

        let lines = render(&board);

        assert_eq!(lines[0], "(2)---[A]--- .");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "VIRUS (80/20)");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn odd_rows_are_shifted_and_linked() {
        let board = Board::with_layout((2, 2), &[], (0, 0), (1, 1), &[]).unwrap();

        let lines = render(&board);

        assert_eq!(lines[0], "(2)---[A]");
        assert_eq!(lines[1], r"  \   / \");
        assert_eq!(lines[2], r"   \ /   \");
        assert_eq!(lines[3], "   [B]--- .");
    }

    #[test]
    fn selected_node_keeps_progress_next_to_blocks() {
        let mut board = Board::with_layout((1, 3), &[], (0, 0), (0, 2), &[(0, 1)]).unwrap();
        board.visit((0, 1));

        let lines = render(&board);

        assert_eq!(lines[0], " x ---(1)--- x");
    }

    #[test]
    fn core_status_appears_once_visited() {
        let mut board = Board::with_layout((1, 2), &[], (0, 0), (0, 1), &[]).unwrap();
        board.visit((0, 1));

        let lines = render(&board);

        assert_eq!(lines[0], "( )--- @");
        assert!(lines.contains(&"CORE (70/10)".to_string()));
    }
}
