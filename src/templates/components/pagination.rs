use crate::domain::Page;
use crate::requests::Params;
use maud::{html, Markup};

/// Previous / "Page n of m" / next, keeping the other query parameters.
pub fn pagination<T>(page: &Page<T>, path: &str, params: &Params) -> Markup {
    let href = |number: u64| {
        let query = params.with_page(number);
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    };

    html! {
        @if page.num_pages > 1 {
            nav class="pagination" {
                @if let Some(prev) = page.previous_page_number() {
                    a href=(href(1)) { "« first" }
                    a href=(href(prev)) { "previous" }
                }
                span class="current" { "Page " (page.number) " of " (page.num_pages) }
                @if let Some(next) = page.next_page_number() {
                    a href=(href(next)) { "next" }
                    a href=(href(page.num_pages)) { "last »" }
                }
            }
        }
    }
}
