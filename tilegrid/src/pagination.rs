use alloc::string::String;
use alloc::vec::Vec;

use crate::PageSet;

/// Which gap an ellipsis stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EllipsisSide {
    /// Between page 1 and the selected page's neighbours.
    Low,
    /// Between the selected page's neighbours and the last page.
    High,
}

/// One page-selector control, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageControl {
    /// A numbered button. The `active` one is the selected page and is inert.
    Page { number: u32, active: bool },
    Ellipsis(EllipsisSide),
    /// An activated ellipsis, currently a numeric text input.
    Input { side: EllipsisSide, text: String },
}

impl PageControl {
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page { number, .. } => Some(*number),
            _ => None,
        }
    }
}

/// Builds the page-selector controls for `selected_page` out of `total_pages`.
///
/// - page 1, unless `selected_page <= 2` (it is then one of the neighbours)
/// - a low ellipsis iff `selected_page > 3`
/// - `selected_page - 1 ..= selected_page + 1`, clipped to `1..=total_pages`
/// - a high ellipsis iff `selected_page < total_pages - 2`
/// - the last page, unless `selected_page >= total_pages - 1`
///
/// `selected_page` is clamped into range first; zero pages yield no controls.
pub fn build_page_controls(selected_page: u32, total_pages: u32) -> Vec<PageControl> {
    let mut out = Vec::new();
    if total_pages == 0 {
        return out;
    }
    let selected = selected_page.clamp(1, total_pages);

    if selected > 2 {
        out.push(PageControl::Page {
            number: 1,
            active: false,
        });
    }
    if selected > 3 {
        out.push(PageControl::Ellipsis(EllipsisSide::Low));
    }

    let lo = selected.saturating_sub(1).max(1);
    let hi = selected.saturating_add(1).min(total_pages);
    for number in lo..=hi {
        out.push(PageControl::Page {
            number,
            active: number == selected,
        });
    }

    if selected.saturating_add(2) < total_pages {
        out.push(PageControl::Ellipsis(EllipsisSide::High));
    }
    if selected.saturating_add(1) < total_pages {
        out.push(PageControl::Page {
            number: total_pages,
            active: false,
        });
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct JumpInput {
    side: EllipsisSide,
    text: String,
}

/// Page-selector state: the current [`PageSet`] plus an optional in-place jump input.
///
/// Selection methods return the page to load; they never mutate the selected page. The owner
/// applies the new page with [`Paginator::set_pages`] once the data for it has arrived, so a
/// failed load leaves the selector on the page that is actually shown.
#[derive(Clone, Debug, Default)]
pub struct Paginator {
    pages: PageSet,
    input: Option<JumpInput>,
}

impl Paginator {
    pub fn new(pages: PageSet) -> Self {
        Self { pages, input: None }
    }

    pub fn pages(&self) -> PageSet {
        self.pages
    }

    pub fn selected_page(&self) -> u32 {
        self.pages.selected_page
    }

    pub fn total_pages(&self) -> u32 {
        self.pages.total_pages
    }

    /// Replaces the page set and closes any open jump input.
    pub fn set_pages(&mut self, selected_page: u32, total_pages: u32) {
        self.pages = PageSet::new(selected_page, total_pages);
        self.input = None;
    }

    /// The controls to display, with an activated ellipsis shown as its input.
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = build_page_controls(self.pages.selected_page, self.pages.total_pages);
        if let Some(input) = &self.input {
            for c in controls.iter_mut() {
                if *c == PageControl::Ellipsis(input.side) {
                    *c = PageControl::Input {
                        side: input.side,
                        text: input.text.clone(),
                    };
                }
            }
        }
        controls
    }

    /// A numbered button was clicked. Returns the page to load, or `None` for the selected
    /// page (its button is inert) and pages outside `1..=total_pages`.
    pub fn select(&mut self, page: u32) -> Option<u32> {
        if page == 0 || page > self.pages.total_pages || page == self.pages.selected_page {
            return None;
        }
        self.input = None;
        gdebug!(page, "Paginator::select");
        Some(page)
    }

    pub fn previous(&mut self) -> Option<u32> {
        let page = self.pages.selected_page.checked_sub(1)?;
        self.select(page)
    }

    pub fn next(&mut self) -> Option<u32> {
        let page = self.pages.selected_page.checked_add(1)?;
        self.select(page)
    }

    /// Turns the ellipsis on `side` into an empty jump input.
    ///
    /// Returns `false` when that ellipsis is not currently displayed.
    pub fn activate_ellipsis(&mut self, side: EllipsisSide) -> bool {
        let shown = build_page_controls(self.pages.selected_page, self.pages.total_pages)
            .contains(&PageControl::Ellipsis(side));
        if !shown {
            return false;
        }
        self.input = Some(JumpInput {
            side,
            text: String::new(),
        });
        true
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    /// The open jump input, if any.
    pub fn input(&self) -> Option<(EllipsisSide, &str)> {
        self.input.as_ref().map(|i| (i.side, i.text.as_str()))
    }

    /// Types one character into the jump input. Non-digits are rejected.
    pub fn push_char(&mut self, c: char) -> bool {
        let Some(input) = self.input.as_mut() else {
            return false;
        };
        if !c.is_ascii_digit() {
            return false;
        }
        input.text.push(c);
        true
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.input.as_mut()?.text.pop()
    }

    /// Replaces the input text (e.g. a paste), keeping only the digits.
    pub fn set_input(&mut self, text: &str) {
        if let Some(input) = self.input.as_mut() {
            input.text = text.chars().filter(char::is_ascii_digit).collect();
        }
    }

    /// Commits the jump input (enter or focus loss).
    ///
    /// The input always closes. A non-empty value is clamped to `1..=total_pages` and
    /// returned as the page to load, unless it lands on the selected page. Empty or
    /// unparsable text fires nothing. Digit strings too large for `u32` clamp to the last
    /// page.
    pub fn commit(&mut self) -> Option<u32> {
        let input = self.input.take()?;
        if input.text.is_empty() {
            return None;
        }
        if !input.text.bytes().all(|b| b.is_ascii_digit()) {
            gwarn!(text = input.text.as_str(), "Paginator::commit: non-numeric input");
            return None;
        }
        let page = input.text.parse::<u32>().unwrap_or(u32::MAX);
        let page = self.pages.clamp_page(page);
        if page == self.pages.selected_page {
            return None;
        }
        gdebug!(page, "Paginator::commit");
        Some(page)
    }

    /// Closes the jump input without firing.
    pub fn cancel_input(&mut self) {
        self.input = None;
    }
}
