//! Plain-text grid rendering.

use rubbermaze::cell::{Cell, Direction};
use rubbermaze::grid::Grid;

/// Marker glyphs for cell states. Passed in explicitly; nothing here is global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub show_backtrack: bool,
    pub current: char,
    pub start: char,
    pub end: char,
    pub backtracked: char,
    pub visited: char,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            show_backtrack: true,
            current: '@',
            start: 'S',
            end: 'E',
            backtracked: '.',
            visited: ' ',
        }
    }
}

impl RenderStyle {
    fn marker(&self, cell: &Cell) -> char {
        if cell.is_current() {
            self.current
        } else if cell.is_start() {
            self.start
        } else if cell.is_end() {
            self.end
        } else if cell.is_backtracked() && self.show_backtrack {
            self.backtracked
        } else if cell.is_visited() {
            self.visited
        } else {
            '#'
        }
    }
}

/// Draws `grid` with `+---+` borders, one text row per cell row plus separators.
pub fn render(grid: &Grid, style: &RenderStyle) -> String {
    let mut out = String::new();
    if grid.is_empty() {
        return out;
    }

    for r in 0..grid.rows() {
        let row = grid.row(r);
        for cell in row {
            out.push('+');
            out.push_str(if cell.has_wall(Direction::Up) { "---" } else { "   " });
        }
        out.push_str("+\n");

        for cell in row {
            out.push(if cell.has_wall(Direction::Left) { '|' } else { ' ' });
            out.push(' ');
            out.push(style.marker(cell));
            out.push(' ');
        }
        let right_open = row.last().is_some_and(|c| !c.has_wall(Direction::Right));
        out.push(if right_open { ' ' } else { '|' });
        out.push('\n');
    }

    for cell in grid.row(grid.rows() - 1) {
        out.push('+');
        out.push_str(if cell.has_wall(Direction::Down) { "---" } else { "   " });
    }
    out.push_str("+\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubbermaze::prelude::*;

    fn two_by_two() -> Grid {
        let mut grid = Grid::new(2, 2);
        let cfg = GeneratorConfig {
            unwind_backtrack: false,
            ..GeneratorConfig::default()
        };
        Generator::new(cfg, ScriptedChoices::new(vec![0, 0, 0]))
            .generate(&mut grid, NullSink)
            .unwrap()
            .finish();
        grid
    }

    #[test]
    fn renders_pristine_grid_as_closed_boxes() {
        let grid = Grid::new(1, 2);
        let text = render(&grid, &RenderStyle::default());
        assert_eq!(text, "+---+---+\n| # | # |\n+---+---+\n");
    }

    #[test]
    fn renders_carved_maze() {
        let text = render(&two_by_two(), &RenderStyle::default());
        let expected = "\
+---+---+
| S     |
+---+   +
|     E |
+---+---+
";
        assert_eq!(text, expected);
    }

    #[test]
    fn current_marker_wins() {
        let mut grid = two_by_two();
        let mut nav = Navigator::new(RecoveryWindow::Unbounded, 1);
        nav.move_agent(&mut grid, Direction::Right, NullSink).unwrap();
        let text = render(&grid, &RenderStyle::default());
        assert!(text.lines().nth(1).unwrap().contains('@'));
    }

    #[test]
    fn empty_grid_renders_nothing() {
        assert!(render(&Grid::new(0, 3), &RenderStyle::default()).is_empty());
    }
}
