// rle.rs - Run-length encoded pattern text
//
// Decoding never fails. Garbled headers, stray characters and oversized runs
// only place fewer cells.

use crate::grid::{Cell, Grid};
use tracing::{debug, warn};

/// One decoded token of the cell-run stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    Dead(usize),
    Alive(usize),
    EndOfRow,
}

/// Parsed pattern: header bookkeeping plus the run sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RlePattern {
    /// Declared width (`x = ...`). `None` when absent or unreadable.
    pub width: Option<usize>,
    /// Declared height (`y = ...`). `None` when absent or unreadable.
    pub height: Option<usize>,
    pub rule: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub comments: Vec<String>,
    pub runs: Vec<Run>,
}

/// What a placement did to the target grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    /// Cells written, dead or alive.
    pub written: usize,
    /// Cells that fell outside the declared box or the target grid.
    pub dropped: usize,
}

impl RlePattern {
    /// Parses pattern text. Never fails.
    pub fn parse(text: &str) -> Self {
        let mut pattern = RlePattern::default();
        let mut data = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                pattern.read_comment(comment);
            } else if is_header(line) {
                pattern.read_header(line);
            } else {
                data.push_str(line);
            }
        }

        pattern.runs = decode_runs(&data);
        pattern
    }

    fn read_comment(&mut self, comment: &str) {
        let mut chars = comment.chars();
        let kind = chars.next();
        let body = chars.as_str().trim().to_string();
        match kind {
            Some('N') => self.name = Some(body),
            Some('O') => self.author = Some(body),
            Some('C') | Some('c') => self.comments.push(body),
            _ => {}
        }
    }

    fn read_header(&mut self, line: &str) {
        for field in line.split(',') {
            let Some((key, value)) = field.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "x" => self.width = value.parse().ok(),
                "y" => self.height = value.parse().ok(),
                "rule" => self.rule = Some(value.to_string()),
                _ => {}
            }
        }
    }

    /// True when the pattern declares no rule or the classic B3/S23 one.
    pub fn is_conway_rule(&self) -> bool {
        match &self.rule {
            None => true,
            Some(rule) => {
                let rule: String = rule.chars().filter(|c| !c.is_whitespace()).collect();
                matches!(rule.to_ascii_uppercase().as_str(), "B3/S23" | "23/3")
            }
        }
    }

    fn in_declared_box(&self, x: usize, y: usize) -> bool {
        self.width.is_none_or(|w| x < w) && self.height.is_none_or(|h| y < h)
    }

    /// Pattern-local `(x, y)` coordinates of live cells inside the declared box.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        let (mut x, mut y) = (0usize, 0usize);
        for run in &self.runs {
            match *run {
                Run::Dead(n) => x = x.saturating_add(n),
                Run::Alive(n) => {
                    let end = x.saturating_add(n);
                    let end = self.width.map_or(end, |w| end.min(w));
                    if self.in_declared_box(0, y) {
                        cells.extend((x..end).map(|cx| (cx, y)));
                    }
                    x = x.saturating_add(n);
                }
                Run::EndOfRow => {
                    y += 1;
                    x = 0;
                }
            }
        }
        cells
    }

    /// Writes the pattern into `target` with its top-left corner at
    /// `origin = (row, col)`.
    ///
    /// Cells past the declared width/height, or past the edge of `target`,
    /// are dropped. Cells the pattern does not mention keep their state.
    pub fn place(&self, target: &mut Grid, origin: (usize, usize)) -> Placement {
        let (rows, cols) = target.dimensions();
        let (row0, col0) = origin;
        let mut placement = Placement::default();
        let (mut x, mut y) = (0usize, 0usize);

        for run in &self.runs {
            let (cell, n) = match *run {
                Run::Dead(n) => (Cell::Dead, n),
                Run::Alive(n) => (Cell::Alive, n),
                Run::EndOfRow => {
                    y += 1;
                    x = 0;
                    continue;
                }
            };

            // columns of this run that survive both fences
            let mut end = x.saturating_add(n);
            if let Some(w) = self.width {
                end = end.min(w);
            }
            end = end.min(cols.saturating_sub(col0));
            let row = row0.saturating_add(y);
            let row_ok = self.in_declared_box(0, y) && row < rows;

            if row_ok && x < end {
                target.fill_span(row, col0 + x..col0 + end, cell);
                placement.written += end - x;
                placement.dropped = placement.dropped.saturating_add(n - (end - x));
            } else {
                placement.dropped = placement.dropped.saturating_add(n);
            }
            x = x.saturating_add(n);
        }
        placement
    }
}

fn is_header(line: &str) -> bool {
    line.strip_prefix('x')
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

/// Splits the concatenated cell data into runs, stopping at `!`.
fn decode_runs(data: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut count: usize = 0;

    for c in data.chars() {
        if let Some(digit) = c.to_digit(10) {
            count = count.saturating_mul(10).saturating_add(digit as usize);
            continue;
        }
        let n = count.max(1);
        count = 0;
        match c {
            'b' => runs.push(Run::Dead(n)),
            'o' => runs.push(Run::Alive(n)),
            '$' => runs.push(Run::EndOfRow),
            '!' => break,
            _ => {} // unknown tag: skipped, pending count discarded
        }
    }
    runs
}

/// Decodes `text` and writes it into `target` at `origin = (row, col)`.
pub fn load_pattern(text: &str, target: &mut Grid, origin: (usize, usize)) -> Placement {
    let pattern = RlePattern::parse(text);
    if !pattern.is_conway_rule() {
        warn!(rule = ?pattern.rule, "pattern declares a non-B3/S23 rule, evolving with B3/S23");
    }
    let placement = pattern.place(target, origin);
    debug!(
        name = pattern.name.as_deref().unwrap_or("<unnamed>"),
        width = ?pattern.width,
        height = ?pattern.height,
        written = placement.written,
        dropped = placement.dropped,
        "placed RLE pattern"
    );
    placement
}
