use scraper::ElementRef;

/// The view of a parsed document that extraction needs.
///
/// An absent attribute is `None`; lookups never fail.
pub trait Element: Copy {
    fn name(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Child elements in document order.
    fn child_elements(&self) -> impl DoubleEndedIterator<Item = Self>;

    /// All descendant text, concatenated in document order, markup stripped.
    fn text(&self) -> String;
}

impl Element for ElementRef<'_> {
    fn name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn child_elements(&self) -> impl DoubleEndedIterator<Item = Self> {
        self.children().filter_map(ElementRef::wrap)
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }
}
