//! Row-based scroll bookkeeping for the virtualized section list.
//!
//! Tracks the current offset, an optional animation target, the (possibly
//! estimated) content height and the viewport height. All values are terminal
//! rows.

/// Vertical scroll state with eased movement toward a target offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMetrics {
    offset: usize,
    target: Option<usize>,
    content_height: usize,
    viewport_height: usize,
}

impl ScrollMetrics {
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn content_height(&self) -> usize {
        self.content_height
    }

    pub const fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Returns the offset an in-flight animation is heading to.
    pub const fn target(&self) -> Option<usize> {
        self.target
    }

    pub const fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    pub fn update_viewport_height(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.clamp();
    }

    pub fn update_content_height(&mut self, content_height: usize) {
        self.content_height = content_height;
        self.clamp();
    }

    /// Jumps to `offset` (clamped) and cancels any animation.
    pub fn jump_to(&mut self, offset: usize) {
        self.target = None;
        self.offset = offset.min(self.max_offset());
    }

    /// Starts an eased move toward `offset` (clamped). Reaching it happens
    /// over subsequent [`Self::step`] calls.
    pub fn animate_to(&mut self, offset: usize) {
        let clamped = offset.min(self.max_offset());
        self.target = (clamped != self.offset).then_some(clamped);
    }

    /// Advances an animation by one frame. Each frame covers a third of the
    /// remaining distance, at least one row. Returns whether the offset moved.
    pub fn step(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = target.abs_diff(self.offset);
        let stride = (distance / 3).max(1);
        self.offset = if target > self.offset {
            self.offset + stride
        } else {
            self.offset - stride
        };
        if self.offset == target {
            self.target = None;
        }
        true
    }

    /// Scrolls by a relative line count (`+` down, `-` up).
    pub fn scroll_lines(&mut self, delta: isize) {
        self.target = None;
        if delta == 0 || !self.is_scrollable() {
            return;
        }
        let next = self.offset.saturating_add_signed(delta);
        self.offset = next.min(self.max_offset());
    }

    pub fn scroll_pages(&mut self, delta_pages: isize) {
        if self.viewport_height == 0 {
            return;
        }
        let viewport = isize::try_from(self.viewport_height).unwrap_or(isize::MAX);
        self.scroll_lines(viewport.saturating_mul(delta_pages));
    }

    pub fn scroll_to_top(&mut self) {
        self.jump_to(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.jump_to(self.max_offset());
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        self.offset = self.offset.min(max);
        if let Some(target) = self.target {
            let target = target.min(max);
            self.target = (target != self.offset).then_some(target);
        }
    }
}
