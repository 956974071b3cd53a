use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn left(&self) -> u16 {
        self.x
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn top(&self) -> u16 {
        self.y
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Screen regions of a mounted select: the editable field row, the toggle
/// cell at its right edge, one row per visible candidate, and the overall
/// bounds used for outside-interaction detection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectLayout {
    pub field: Rect,
    pub toggle: Rect,
    pub rows: Vec<Rect>,
    pub bounds: Rect,
}

impl SelectLayout {
    /// Compute regions for a field at `(x, y)` with `row_count` candidate
    /// rows stacked directly below it.
    pub fn compute(x: u16, y: u16, width: u16, row_count: usize) -> Self {
        let field = Rect::new(x, y, width, 1);
        let toggle = Rect::new(
            x.saturating_add(width.saturating_sub(1)),
            y,
            width.min(1),
            1,
        );

        let rows = (0..row_count)
            .map(|i| Rect::new(x, y.saturating_add(1).saturating_add(i as u16), width, 1))
            .collect();

        let height = (row_count as u16).saturating_add(1);
        let bounds = Rect::new(x, y, width, height);

        Self {
            field,
            toggle,
            rows,
            bounds,
        }
    }

    /// Index of the candidate row containing the point, if any.
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(x, y))
    }
}

/// Field width wide enough for every label and the placeholder, plus padding
/// and the toggle cell. Uses display width, not char count.
pub fn field_width(options: &[String], placeholder: &str) -> u16 {
    let max = options
        .iter()
        .map(|label| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0)
        .max(UnicodeWidthStr::width(placeholder));

    u16::try_from(max).unwrap_or(u16::MAX).saturating_add(3)
}
