use std::ops::Range;

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Two horizontal rows of section cards split at `ceil(n / 2)`.
///
/// Card indices always refer to catalog order; the rows are a layout detail.
/// Exactly one card flag is set while the grid has cards.
#[derive(Debug, Clone)]
pub struct CardGridState {
    len: usize,
    midpoint: usize,
    focused: usize,
    card_flags: Vec<FocusFlag>,
    /// First visible column of each row.
    row_offsets: [usize; 2],
    pub container_focus: FocusFlag,
    pub last_area: Rect,
    /// Rendered card rectangles for hit testing.
    pub card_areas: Vec<(usize, Rect)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    Left,
    Right,
    Up,
    Down,
}

impl CardGridState {
    /// `midpoint` is the first index of the second row.
    pub fn new(len: usize, midpoint: usize) -> Self {
        let state = Self {
            len,
            midpoint: midpoint.min(len),
            focused: 0,
            card_flags: (0..len).map(|index| FocusFlag::named(&format!("showroom.card.{index}"))).collect(),
            row_offsets: [0, 0],
            container_focus: FocusFlag::named("showroom.cards"),
            last_area: Rect::default(),
            card_areas: Vec::new(),
        };
        state.apply_focus();
        state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn midpoint(&self) -> usize {
        self.midpoint
    }

    pub fn focused_index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.focused)
    }

    pub fn focused_flag(&self) -> Option<FocusFlag> {
        self.card_flags.get(self.focused).cloned()
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.card_flags.get(index).is_some_and(FocusFlag::get)
    }

    /// Catalog indices laid out in `row` (0 or 1).
    pub fn row_range(&self, row: usize) -> Range<usize> {
        match row {
            0 => 0..self.midpoint,
            1 => self.midpoint..self.len,
            _ => 0..0,
        }
    }

    /// `(row, column)` of a card.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        if index < self.midpoint { (0, index) } else { (1, index - self.midpoint) }
    }

    pub fn focus_index(&mut self, index: usize) {
        if index < self.len {
            self.focused = index;
            self.apply_focus();
        }
    }

    pub fn move_focus(&mut self, direction: GridMove) {
        if self.len == 0 {
            return;
        }
        let (row, column) = self.position_of(self.focused);
        let target = match direction {
            GridMove::Left => column.checked_sub(1).map(|column| (row, column)),
            GridMove::Right => Some((row, column + 1)),
            GridMove::Up => row.checked_sub(1).map(|row| (row, column)),
            GridMove::Down => Some((row + 1, column)),
        };
        let Some((row, column)) = target else {
            return;
        };
        let range = self.row_range(row);
        if range.is_empty() {
            return;
        }
        let index = match direction {
            // Vertical moves land on the nearest card of a shorter row.
            GridMove::Up | GridMove::Down => range.start + column.min(range.len() - 1),
            GridMove::Left | GridMove::Right => range.start + column,
        };
        if range.contains(&index) {
            self.focus_index(index);
        }
    }

    /// Columns of `row` to draw when `columns` cards fit, keeping the focused
    /// card inside the window.
    pub fn visible_columns(&mut self, row: usize, columns: usize) -> Range<usize> {
        let row_len = self.row_range(row).len();
        if row > 1 || columns == 0 || row_len == 0 {
            return 0..0;
        }
        let (focused_row, focused_column) = self.position_of(self.focused);
        let offset = &mut self.row_offsets[row];
        if focused_row == row {
            if focused_column < *offset {
                *offset = focused_column;
            } else if focused_column >= *offset + columns {
                *offset = focused_column + 1 - columns;
            }
        }
        *offset = (*offset).min(row_len.saturating_sub(columns));
        *offset..(*offset + columns).min(row_len)
    }

    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.card_areas
            .iter()
            .find(|(_, area)| area.contains((column, row).into()))
            .map(|(index, _)| *index)
    }

    fn apply_focus(&self) {
        for (index, flag) in self.card_flags.iter().enumerate() {
            flag.set(index == self.focused);
        }
    }
}

impl HasFocus for CardGridState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for flag in &self.card_flags {
            builder.leaf_widget(flag);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
