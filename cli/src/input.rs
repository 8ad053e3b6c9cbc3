use hexbreach_core::{Board, Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// A letter addressing an exposed node.
    Key(char),
    /// Explicit `row,col`.
    Coords(Coord2),
    New,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            ":q" | ":quit" => return Some(Self::Quit),
            ":n" | ":new" => return Some(Self::New),
            _ => {}
        }

        if let Some((row, col)) = line.split_once(',') {
            let row: Coord = row.trim().parse().ok()?;
            let col: Coord = col.trim().parse().ok()?;
            return Some(Self::Coords((row, col)));
        }

        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) if key.is_ascii_alphabetic() => {
                Some(Self::Key(key.to_ascii_lowercase()))
            }
            _ => None,
        }
    }

    /// The node this command points at, if any.
    pub fn target(self, board: &Board) -> Option<Coord2> {
        match self {
            Self::Key(key) => board.node_for_input(u32::from(key)),
            Self::Coords(coords) => board.node(coords).map(|node| node.coords()),
            Self::New | Self::Quit => None,
        }
    }
}
