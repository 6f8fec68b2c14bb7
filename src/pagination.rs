use std::fmt::Write;
use std::ops::RangeInclusive;

use crate::domain::page::PaginationMeta;

/// Number of numbered page links shown around the current page.
pub const PAGE_WINDOW: usize = 5;

/// Computes the pager entries for `current_page` out of `total_pages`.
///
/// `Some(n)` is a link to page `n`, `None` an ellipsis. The numbered window
/// always holds `min(total_pages, PAGE_WINDOW)` pages. Page one is only linked
/// when it directly precedes the window; the last page is always linked when
/// the window stops short of it.
pub fn get_pages(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let window = page_window(total_pages, current_page);
    let (start, end) = (*window.start(), *window.end());

    let mut pages = Vec::new();

    if start == 2 {
        pages.push(Some(1));
    } else if start > 2 {
        pages.push(None);
    }

    pages.extend(window.map(Some));

    if end < total_pages {
        if end + 1 < total_pages {
            pages.push(None);
        }
        pages.push(Some(total_pages));
    }

    pages
}

/// Numbered pages centered on `current_page`, clamped to `1..=total_pages`.
///
/// `total_pages` must be at least one.
pub fn page_window(total_pages: usize, current_page: usize) -> RangeInclusive<usize> {
    let current_page = current_page.clamp(1, total_pages);

    let mut start = current_page.saturating_sub(PAGE_WINDOW / 2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end + 1 - start < PAGE_WINDOW {
        start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    }

    start..=end
}

/// Renders Previous/Next controls and the numbered page window.
///
/// `on_page_click` maps a page number to the link target that reloads the
/// list at that page. A result with a single page renders nothing.
pub fn render_pager<F>(pagination: &PaginationMeta, on_page_click: F) -> String
where
    F: Fn(usize) -> String,
{
    if pagination.total_pages <= 1 {
        return String::new();
    }

    let current = pagination.current_page;
    let mut html = String::from(r#"<nav class="pagination"><ul>"#);

    if pagination.has_prev_page {
        push_link(&mut html, &on_page_click, current - 1, "«", Some("Previous"), false);
    } else {
        push_disabled(&mut html, "«", Some("Previous"));
    }

    for entry in get_pages(pagination.total_pages, current) {
        match entry {
            Some(page) => {
                let label = page.to_string();
                push_link(&mut html, &on_page_click, page, &label, None, page == current);
            }
            None => push_disabled(&mut html, "...", None),
        }
    }

    if pagination.has_next_page {
        push_link(&mut html, &on_page_click, current + 1, "»", Some("Next"), false);
    } else {
        push_disabled(&mut html, "»", Some("Next"));
    }

    html.push_str("</ul></nav>");
    html
}

fn push_link<F>(
    html: &mut String,
    on_page_click: &F,
    page: usize,
    label: &str,
    aria: Option<&str>,
    active: bool,
) where
    F: Fn(usize) -> String,
{
    let class = if active { "page-item active" } else { "page-item" };
    let href = escape_attr(&on_page_click(page));
    let aria = aria
        .map(|aria| format!(r#" aria-label="{aria}""#))
        .unwrap_or_default();
    let _ = write!(
        html,
        r#"<li class="{class}"><a class="page-link" href="{href}" data-page="{page}"{aria}>{label}</a></li>"#
    );
}

/// Escapes a value for a double-quoted attribute, leaving URL separators intact.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn push_disabled(html: &mut String, label: &str, aria: Option<&str>) {
    let aria = aria
        .map(|aria| format!(r#" aria-label="{aria}""#))
        .unwrap_or_default();
    let _ = write!(
        html,
        r#"<li class="page-item disabled"><span class="page-link"{aria}>{label}</span></li>"#
    );
}
