use scroll_pager::EdgeInsets;

/// The host's scroll surface, as seen by the paging controller.
///
/// Offsets share the host's native coordinate space: the same unit and sign convention the host
/// uses for its scroll position. Control points resolve to `-value` for top-anchored points and
/// `-(height - value)` for bottom-anchored ones.
pub trait ScrollSurface {
    fn offset(&self) -> f64;

    fn set_offset(&mut self, offset: f64);

    /// Height of the scrollable content.
    fn content_height(&self) -> f64;

    fn set_insets(&mut self, insets: EdgeInsets);

    /// Halts any in-flight native motion (deceleration, programmatic scroll).
    fn stop_scrolling(&mut self) {}

    /// Briefly shows the scroll indicators before a programmatic scroll.
    fn flash_scroll_indicators(&mut self) {}
}
