use std::ops::Range;

/// Window of list rows currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    height: usize,
    /// Rows below this index have already been announced since the last scroll.
    announced_upto: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            top: 0,
            height: height.max(1),
            announced_upto: 0,
        }
    }

    pub fn visible(&self, row_count: usize) -> Range<usize> {
        let start = self.top.min(row_count);
        let end = (self.top + self.height).min(row_count);
        start..end
    }

    pub fn scroll_down(&mut self, row_count: usize) {
        let max_top = row_count.saturating_sub(1);
        self.top = (self.top + self.height).min(max_top);
        self.announced_upto = self.top;
    }

    pub fn scroll_up(&mut self) {
        self.top = self.top.saturating_sub(self.height);
        self.announced_upto = self.top;
    }

    /// Visible rows that have not been announced yet; marks them announced.
    pub fn take_newly_visible(&mut self, row_count: usize) -> Range<usize> {
        let visible = self.visible(row_count);
        let start = visible.start.max(self.announced_upto);
        self.announced_upto = self.announced_upto.max(visible.end);
        start..visible.end.max(start)
    }
}
