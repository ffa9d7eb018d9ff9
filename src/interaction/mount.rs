use scraper::{ElementRef, Html, Selector};

/// Rendered markup as the host displays it.
///
/// Interaction targets are elements of this tree, and table data is read
/// back from it at click time rather than from the parsed blocks.
pub struct MountedView {
    document: Html,
}

impl MountedView {
    pub fn mount(markup: &str) -> Self {
        Self {
            document: Html::parse_fragment(markup),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// First element matching a CSS selector; `None` for invalid selectors.
    pub fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next()
    }

    /// Every element matching a CSS selector, in document order.
    pub fn select_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self.document.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// The element itself or its nearest ancestor satisfying `pred`.
pub(crate) fn closest<'a>(
    start: ElementRef<'a>,
    pred: impl Fn(&ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    std::iter::once(start)
        .chain(start.ancestors().filter_map(ElementRef::wrap))
        .find(|element| pred(element))
}
