//! Card face rendering. Front ends only hand over rank and suit; how the face
//! looks is up to the renderer they are given.

use crate::libflash::card::{Rank, Suit};
use colored::Colorize;

pub trait CardRenderer<Target: ?Sized> {
    fn render(&self, target: &mut Target, rank: Rank, suit: Suit);
}

const FACE_WIDTH: usize = 9;

/// Draws a small boxed card as text lines.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    pub color: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        TerminalRenderer { color }
    }

    fn paint(&self, line: String, suit: Suit) -> String {
        if !self.color {
            return line;
        }
        let painted = if suit.is_red() {
            line.red().on_white()
        } else {
            line.black().on_white()
        };
        painted.to_string()
    }
}

impl CardRenderer<String> for TerminalRenderer {
    fn render(&self, target: &mut String, rank: Rank, suit: Suit) {
        let index = rank.index();
        let symbol = suit.symbol().to_string();
        let border = "─".repeat(FACE_WIDTH);
        let lines = [
            format!("┌{}┐", border),
            format!("│{:<width$}│", index, width = FACE_WIDTH),
            format!("│{:^width$}│", symbol, width = FACE_WIDTH),
            format!("│{:>width$}│", index, width = FACE_WIDTH),
            format!("└{}┘", border),
        ];
        for line in lines {
            target.push_str(&self.paint(line, suit));
            target.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(rank: Rank, suit: Suit) -> Vec<String> {
        let mut out = String::new();
        TerminalRenderer::new(false).render(&mut out, rank, suit);
        out.lines().map(str::to_string).collect()
    }

    #[test]
    fn face_shows_index_and_suit() {
        let lines = plain(Rank::Ace, Suit::Hearts);
        assert_eq!(
            lines,
            vec![
                "┌─────────┐",
                "│A        │",
                "│    ♥    │",
                "│        A│",
                "└─────────┘",
            ]
        );
    }

    #[test]
    fn ten_keeps_the_box_aligned() {
        let lines = plain(Rank::Ten, Suit::Spades);
        assert_eq!(lines[1], "│10       │");
        assert_eq!(lines[3], "│       10│");
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == FACE_WIDTH + 2));
    }

    #[test]
    fn renders_append() {
        let mut out = String::from("card:\n");
        TerminalRenderer::new(false).render(&mut out, Rank::King, Suit::Clubs);
        assert!(out.starts_with("card:\n┌"));
        assert_eq!(out.lines().count(), 6);
    }
}
