//! Virtualized rendering of catalog sections.
//!
//! The list flattens its sections into a frame sequence: per section a header
//! frame, one frame per use case and a footer spacer. A structural address
//! `(s, i)` maps to frame `starts[s] + i`, so an item index past the end of
//! its section lands in the following sections, which is what the retry path
//! relies on when it re-addresses a frame as `(0, flat_index)`.
//!
//! Frames are measured lazily at the current width, as a contiguous prefix
//! that covers the viewport plus one screen ahead. Scrolling to a frame that
//! has not been measured yet fails with a [`ScrollFailure`] instead of
//! guessing an offset.

use std::sync::Arc;

use showroom_registry::{DemoCatalog, Section};
use showroom_types::{ScrollFailure, StructuralAddress};
use tracing::{debug, warn};

use super::metrics::ScrollMetrics;

/// Heading rendered above the first section of the full catalog list.
pub const LIST_HEADING: &str = "Components to jump start your project!";

/// Height assumed for frames that have not been measured yet.
const ESTIMATED_FRAME_HEIGHT: usize = 3;
const MIN_WRAP_WIDTH: usize = 8;
const USE_CASE_INDENT: &str = "  ";
const USE_CASE_BODY_INDENT: &str = "    ";

/// Imperative scroll surface the coordinator drives.
pub trait SectionListHandle {
    /// Scrolls so the addressed frame sits at the top of the viewport.
    fn scroll_to_location(&mut self, address: StructuralAddress, animated: bool) -> Result<(), ScrollFailure>;

    /// Scrolls to the end of the content, measuring everything on the way.
    fn scroll_to_end(&mut self);
}

/// One entry of the flattened frame sequence. `section` is local to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    SectionHeader { section: usize },
    UseCase { section: usize, item: usize },
    SectionFooter { section: usize },
}

impl FrameKind {
    pub const fn section(&self) -> usize {
        match *self {
            Self::SectionHeader { section } | Self::UseCase { section, .. } | Self::SectionFooter { section } => section,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    ListHeading,
    SectionTitle,
    SectionDescription,
    UseCaseTitle,
    UseCaseBody,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub role: LineRole,
    pub text: String,
}

impl ListLine {
    fn new(role: LineRole, text: impl Into<String>) -> Self {
        Self { role, text: text.into() }
    }

    fn spacer() -> Self {
        Self::new(LineRole::Spacer, String::new())
    }
}

/// Lines covering the viewport. The first `skip` lines sit above it.
#[derive(Debug, Clone, Default)]
pub struct VisibleWindow {
    pub lines: Vec<ListLine>,
    pub skip: usize,
}

#[derive(Debug)]
pub struct VirtualSectionList {
    catalog: Arc<DemoCatalog>,
    /// Catalog index of each local section.
    sections: Vec<usize>,
    frames: Vec<FrameKind>,
    /// Flat index of each local section's header frame.
    starts: Vec<usize>,
    /// Absolute top row of each measured frame (list heading included).
    tops: Vec<usize>,
    heights: Vec<usize>,
    show_heading: bool,
    heading_height: usize,
    width: usize,
    metrics: ScrollMetrics,
    /// Set by `scroll_to_end` before the first layout pass.
    end_requested: bool,
}

impl VirtualSectionList {
    /// The full catalog under the list heading.
    pub fn for_catalog(catalog: Arc<DemoCatalog>) -> Self {
        let sections = (0..catalog.len()).collect();
        Self::new(catalog, sections, true)
    }

    /// A single catalog section, used by the detail view.
    pub fn for_section(catalog: Arc<DemoCatalog>, section_index: usize) -> Self {
        Self::new(catalog, vec![section_index], false)
    }

    fn new(catalog: Arc<DemoCatalog>, sections: Vec<usize>, show_heading: bool) -> Self {
        // Each section's rendered frames plus its footer.
        let frame_total = sections
            .iter()
            .filter_map(|index| catalog.section(*index))
            .map(|section| section.rendered_len() + 1)
            .sum();
        let mut frames = Vec::with_capacity(frame_total);
        let mut starts = Vec::with_capacity(sections.len());
        for (local, catalog_index) in sections.iter().enumerate() {
            starts.push(frames.len());
            frames.push(FrameKind::SectionHeader { section: local });
            let item_count = catalog.section(*catalog_index).map_or(0, |section| section.items.len());
            frames.extend((0..item_count).map(|item| FrameKind::UseCase { section: local, item }));
            frames.push(FrameKind::SectionFooter { section: local });
        }
        Self {
            catalog,
            sections,
            frames,
            starts,
            tops: Vec::new(),
            heights: Vec::new(),
            show_heading,
            heading_height: 0,
            width: 0,
            metrics: ScrollMetrics::default(),
            end_requested: false,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn measured_count(&self) -> usize {
        self.heights.len()
    }

    pub fn frame(&self, index: usize) -> Option<FrameKind> {
        self.frames.get(index).copied()
    }

    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    /// Catalog index of the list's `local` section.
    pub fn catalog_section(&self, local: usize) -> Option<usize> {
        self.sections.get(local).copied()
    }

    /// Flat frame index of a structural address; `None` past the last frame.
    pub fn flat_index(&self, address: StructuralAddress) -> Option<usize> {
        let start = *self.starts.get(address.section_index)?;
        let index = start.checked_add(address.item_index)?;
        (index < self.frames.len()).then_some(index)
    }

    /// Lays the list out for a viewport, measuring as far as needed.
    ///
    /// A width change re-wraps every frame; the frame at the top of the
    /// viewport and the frame an animation is heading for keep their place.
    pub fn layout(&mut self, width: u16, height: u16) {
        let width = usize::from(width).max(MIN_WRAP_WIDTH);
        let mut anchors = None;
        if width != self.width {
            anchors = Some(self.scroll_anchors());
            self.width = width;
            self.heading_height = if self.show_heading { self.heading_lines().len() } else { 0 };
            self.tops.clear();
            self.heights.clear();
        }
        self.metrics.update_viewport_height(usize::from(height));

        if std::mem::take(&mut self.end_requested) {
            self.measure_all();
            self.metrics.update_content_height(self.estimated_content_height());
            self.metrics.scroll_to_bottom();
            return;
        }
        if let Some(anchors) = anchors {
            self.restore_anchors(anchors);
        }

        let viewport = self.metrics.viewport_height();
        let reach = self.metrics.offset().max(self.metrics.target().unwrap_or(0));
        let wanted_bottom = reach.saturating_add(viewport.saturating_mul(2));
        while self.measured_bottom() < wanted_bottom && self.heights.len() < self.frames.len() {
            self.measure_next();
        }
        self.metrics.update_content_height(self.estimated_content_height());
    }

    /// Advances an in-flight scroll animation. Returns whether anything moved.
    pub fn tick(&mut self) -> bool {
        self.metrics.step()
    }

    pub fn is_animating(&self) -> bool {
        self.metrics.is_animating()
    }

    pub fn scroll_lines(&mut self, delta: isize) {
        self.metrics.scroll_lines(delta);
    }

    pub fn scroll_pages(&mut self, delta: isize) {
        self.metrics.scroll_pages(delta);
    }

    pub fn scroll_to_top(&mut self) {
        self.metrics.scroll_to_top();
    }

    /// The frame at the top edge of the viewport.
    pub fn top_frame(&self) -> Option<FrameKind> {
        if self.heights.is_empty() {
            return self.frames.first().copied();
        }
        let offset = self.metrics.offset();
        let index = self.tops.partition_point(|top| *top <= offset).saturating_sub(1);
        self.frames.get(index).copied()
    }

    /// Catalog index of the section currently at the top of the viewport.
    pub fn section_at_top(&self) -> Option<usize> {
        self.top_frame().and_then(|frame| self.catalog_section(frame.section()))
    }

    /// Lines intersecting the viewport, starting at a frame boundary.
    pub fn visible_window(&self) -> VisibleWindow {
        let offset = self.metrics.offset();
        let bottom = offset + self.metrics.viewport_height();
        let mut window = VisibleWindow::default();
        let mut first_top = None;

        if self.heading_height > 0 && offset < self.heading_height {
            window.lines.extend(self.heading_lines());
            first_top = Some(0);
        }

        let start = self.tops.partition_point(|top| *top <= offset).saturating_sub(1);
        for index in start..self.heights.len() {
            let top = self.tops[index];
            if top >= bottom {
                break;
            }
            if top + self.heights[index] <= offset && first_top.is_none() {
                continue;
            }
            first_top.get_or_insert(top);
            window.lines.extend(self.frame_lines(self.frames[index]));
        }
        window.skip = offset.saturating_sub(first_top.unwrap_or(offset));
        window
    }

    /// Mean measured frame height, or the estimate before any measurement.
    pub fn average_item_length(&self) -> f32 {
        if self.heights.is_empty() {
            return ESTIMATED_FRAME_HEIGHT as f32;
        }
        let total: usize = self.heights.iter().sum();
        total as f32 / self.heights.len() as f32
    }

    fn scroll_anchors(&self) -> ScrollAnchors {
        ScrollAnchors {
            offset: self.anchor_at(self.metrics.offset()),
            target: self.metrics.target().map(|row| self.anchor_at(row)),
        }
    }

    fn anchor_at(&self, row: usize) -> RowAnchor {
        if self.heights.is_empty() || row < self.heading_height {
            return RowAnchor::Heading(row);
        }
        let index = self.tops.partition_point(|top| *top <= row).saturating_sub(1);
        RowAnchor::Frame { index, delta: row - self.tops[index] }
    }

    /// Row of an anchor at the current width, measuring up to its frame.
    fn anchored_row(&mut self, anchor: RowAnchor) -> usize {
        match anchor {
            RowAnchor::Heading(row) => row.min(self.heading_height.saturating_sub(1)),
            RowAnchor::Frame { index, delta } => {
                while self.heights.len() <= index && self.heights.len() < self.frames.len() {
                    self.measure_next();
                }
                match (self.tops.get(index), self.heights.get(index)) {
                    (Some(top), Some(height)) => top + delta.min(height.saturating_sub(1)),
                    _ => self.measured_bottom(),
                }
            }
        }
    }

    fn restore_anchors(&mut self, anchors: ScrollAnchors) {
        let offset = self.anchored_row(anchors.offset);
        let target = anchors.target.map(|anchor| self.anchored_row(anchor));
        self.metrics.update_content_height(self.estimated_content_height());
        self.metrics.jump_to(offset);
        if let Some(target) = target {
            self.metrics.animate_to(target);
        }
    }

    fn measured_bottom(&self) -> usize {
        match (self.tops.last(), self.heights.last()) {
            (Some(top), Some(height)) => top + height,
            _ => self.heading_height,
        }
    }

    fn estimated_content_height(&self) -> usize {
        let remaining = self.frames.len() - self.heights.len();
        let estimate = (remaining as f32 * self.average_item_length()).ceil() as usize;
        self.measured_bottom() + estimate
    }

    fn measure_next(&mut self) {
        let index = self.heights.len();
        let Some(frame) = self.frames.get(index).copied() else {
            return;
        };
        let top = self.measured_bottom();
        self.tops.push(top);
        self.heights.push(self.frame_lines(frame).len());
    }

    fn measure_all(&mut self) {
        while self.heights.len() < self.frames.len() {
            self.measure_next();
        }
        debug!(frames = self.frames.len(), "measured every frame");
    }

    fn section(&self, local: usize) -> Option<&Section> {
        self.catalog_section(local).and_then(|index| self.catalog.section(index))
    }

    fn heading_lines(&self) -> Vec<ListLine> {
        let mut lines: Vec<ListLine> = textwrap::wrap(LIST_HEADING, self.width)
            .into_iter()
            .map(|line| ListLine::new(LineRole::ListHeading, line))
            .collect();
        lines.push(ListLine::spacer());
        lines
    }

    fn frame_lines(&self, frame: FrameKind) -> Vec<ListLine> {
        let Some(section) = self.section(frame.section()) else {
            return vec![ListLine::spacer()];
        };
        let mut lines = Vec::new();
        match frame {
            FrameKind::SectionHeader { .. } => {
                lines.push(ListLine::new(LineRole::SectionTitle, section.name.clone()));
                lines.extend(wrapped(&section.description, self.width, "", LineRole::SectionDescription));
                lines.push(ListLine::spacer());
            }
            FrameKind::UseCase { item, .. } => {
                if let Some(use_case) = section.items.get(item) {
                    lines.push(ListLine::new(LineRole::UseCaseTitle, format!("{USE_CASE_INDENT}{}", use_case.name)));
                    lines.extend(wrapped(&use_case.description, self.width, USE_CASE_BODY_INDENT, LineRole::UseCaseBody));
                }
                lines.push(ListLine::spacer());
            }
            FrameKind::SectionFooter { .. } => lines.push(ListLine::spacer()),
        }
        lines
    }
}

/// Where a scroll row sits relative to the layout, independent of width.
#[derive(Debug, Clone, Copy)]
enum RowAnchor {
    Heading(usize),
    Frame { index: usize, delta: usize },
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnchors {
    offset: RowAnchor,
    target: Option<RowAnchor>,
}

fn wrapped(text: &str, width: usize, indent: &str, role: LineRole) -> Vec<ListLine> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let available = width.saturating_sub(indent.len()).max(1);
    textwrap::wrap(text, available)
        .into_iter()
        .map(|line| ListLine::new(role, format!("{indent}{line}")))
        .collect()
}

impl SectionListHandle for VirtualSectionList {
    fn scroll_to_location(&mut self, address: StructuralAddress, animated: bool) -> Result<(), ScrollFailure> {
        let Some(index) = self.flat_index(address) else {
            warn!(%address, frames = self.frames.len(), "scroll target lies outside the list");
            return Ok(());
        };
        if index >= self.heights.len() {
            return Err(ScrollFailure {
                index,
                highest_measured_frame_index: self.heights.len().checked_sub(1),
                average_item_length: self.average_item_length(),
            });
        }
        let top = self.tops[index];
        if animated {
            self.metrics.animate_to(top);
        } else {
            self.metrics.jump_to(top);
        }
        Ok(())
    }

    fn scroll_to_end(&mut self) {
        if self.width == 0 {
            self.end_requested = true;
            return;
        }
        self.measure_all();
        self.metrics.update_content_height(self.estimated_content_height());
        self.metrics.scroll_to_bottom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_registry::UseCase;

    fn catalog(sections: usize, items: usize) -> Arc<DemoCatalog> {
        let sections = (0..sections)
            .map(|s| {
                let items = (0..items)
                    .map(|i| UseCase::new(format!("Case {i}")).with_description("Body text."))
                    .collect();
                Section::new(format!("Section{s}"), "About this section.", items)
            })
            .collect();
        Arc::new(DemoCatalog::from_sections(sections).unwrap())
    }

    #[test]
    fn flattening_counts_header_items_and_footer() {
        let list = VirtualSectionList::for_catalog(catalog(3, 4));
        assert_eq!(list.frame_count(), 3 * (4 + 2));
        assert_eq!(list.flat_index(StructuralAddress::new(0, 0)), Some(0));
        assert_eq!(list.flat_index(StructuralAddress::new(1, 2)), Some(8));
        // (0, k) addresses frame k, spilling into later sections.
        assert_eq!(list.flat_index(StructuralAddress::new(0, 8)), Some(8));
        assert_eq!(list.frame(8), Some(FrameKind::UseCase { section: 1, item: 1 }));
        assert_eq!(list.flat_index(StructuralAddress::new(3, 0)), None);
        assert_eq!(list.flat_index(StructuralAddress::new(0, 18)), None);
    }

    #[test]
    fn scrolling_before_layout_fails_without_measurements() {
        let mut list = VirtualSectionList::for_catalog(catalog(2, 2));
        let failure = list.scroll_to_location(StructuralAddress::new(1, 1), true).unwrap_err();
        assert_eq!(failure.index, 5);
        assert_eq!(failure.highest_measured_frame_index, None);
        assert_eq!(failure.average_item_length, ESTIMATED_FRAME_HEIGHT as f32);
    }

    #[test]
    fn layout_measures_only_a_window_ahead() {
        let mut list = VirtualSectionList::for_catalog(catalog(20, 5));
        list.layout(60, 10);
        assert!(list.measured_count() > 0);
        assert!(list.measured_count() < list.frame_count());

        let far = StructuralAddress::new(19, 3);
        let failure = list.scroll_to_location(far, true).unwrap_err();
        assert_eq!(failure.highest_measured_frame_index, Some(list.measured_count() - 1));
        assert!(failure.average_item_length >= 1.0);
    }

    #[test]
    fn scroll_to_end_measures_everything_and_unblocks_targets() {
        let mut list = VirtualSectionList::for_catalog(catalog(20, 5));
        list.layout(60, 10);
        list.scroll_to_end();
        assert_eq!(list.measured_count(), list.frame_count());
        assert_eq!(list.metrics().offset(), list.metrics().max_offset());

        let target = StructuralAddress::new(3, 2);
        list.scroll_to_location(target, false).unwrap();
        assert_eq!(list.top_frame(), Some(FrameKind::UseCase { section: 3, item: 1 }));
        assert_eq!(list.section_at_top(), Some(3));
    }

    #[test]
    fn scroll_to_end_before_layout_is_applied_on_first_layout() {
        let mut list = VirtualSectionList::for_catalog(catalog(10, 3));
        list.scroll_to_end();
        assert_eq!(list.measured_count(), 0);
        list.layout(40, 8);
        assert_eq!(list.measured_count(), list.frame_count());
        assert_eq!(list.metrics().offset(), list.metrics().max_offset());
    }

    #[test]
    fn animated_scroll_reaches_the_frame_over_ticks() {
        let mut list = VirtualSectionList::for_catalog(catalog(4, 3));
        list.layout(60, 10);
        list.scroll_to_location(StructuralAddress::header(1), true).unwrap();
        assert!(list.is_animating());
        let mut ticks = 0;
        while list.tick() {
            ticks += 1;
        }
        assert!(ticks > 0);
        assert_eq!(list.top_frame(), Some(FrameKind::SectionHeader { section: 1 }));
    }

    #[test]
    fn visible_window_starts_with_the_heading() {
        let mut list = VirtualSectionList::for_catalog(catalog(2, 1));
        list.layout(60, 6);
        let window = list.visible_window();
        assert_eq!(window.skip, 0);
        assert_eq!(window.lines[0], ListLine::new(LineRole::ListHeading, LIST_HEADING));
        assert_eq!(window.lines[2], ListLine::new(LineRole::SectionTitle, "Section0"));
        assert!(window.lines.iter().any(|line| line.text == "  Case 0"));
    }

    #[test]
    fn visible_window_skips_into_a_partially_scrolled_frame() {
        let mut list = VirtualSectionList::for_catalog(catalog(3, 2));
        list.layout(60, 4);
        list.scroll_lines(3);
        let window = list.visible_window();
        // heading (2 rows) + section title; offset 3 lands one row into frame 0.
        assert_eq!(window.skip, 1);
        assert_eq!(window.lines[0].role, LineRole::SectionTitle);
    }

    #[test]
    fn single_section_list_has_no_heading() {
        let mut list = VirtualSectionList::for_section(catalog(3, 2), 2);
        list.layout(60, 20);
        let window = list.visible_window();
        assert_eq!(window.lines[0], ListLine::new(LineRole::SectionTitle, "Section2"));
        assert_eq!(list.catalog_section(0), Some(2));
        assert_eq!(list.frame_count(), 4);
    }

    #[test]
    fn resizing_remeasures_at_the_new_width() {
        let mut list = VirtualSectionList::for_catalog(catalog(2, 2));
        list.layout(80, 40);
        let wide = list.measured_count();
        assert_eq!(wide, list.frame_count());
        list.layout(10, 40);
        let heading_rows = textwrap::wrap(LIST_HEADING, 10).len() + 1;
        assert_eq!(list.visible_window().lines.iter().filter(|l| l.role == LineRole::ListHeading).count() + 1, heading_rows);
    }

    #[test]
    fn widening_keeps_the_top_frame_in_place() {
        let mut list = VirtualSectionList::for_catalog(catalog(6, 4));
        list.layout(16, 10);
        list.scroll_to_end();
        list.scroll_to_location(StructuralAddress::new(3, 2), false).unwrap();
        let narrow_offset = list.metrics().offset();
        assert_eq!(list.top_frame(), Some(FrameKind::UseCase { section: 3, item: 1 }));

        list.layout(60, 10);
        assert!(list.metrics().offset() < narrow_offset);
        assert_eq!(list.top_frame(), Some(FrameKind::UseCase { section: 3, item: 1 }));
        assert_eq!(list.metrics().offset(), list.tops[20]);

        list.layout(16, 10);
        assert_eq!(list.top_frame(), Some(FrameKind::UseCase { section: 3, item: 1 }));
    }

    #[test]
    fn resizing_mid_animation_retargets_the_same_frame() {
        let mut list = VirtualSectionList::for_catalog(catalog(6, 4));
        list.layout(16, 10);
        list.scroll_to_end();
        list.scroll_to_location(StructuralAddress::header(1), true).unwrap();
        assert!(list.is_animating());

        list.layout(60, 10);
        assert_eq!(list.metrics().target(), Some(list.tops[6]));
        while list.tick() {}
        assert_eq!(list.top_frame(), Some(FrameKind::SectionHeader { section: 1 }));
    }
}
