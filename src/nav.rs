// Page the visitor is on, from the URL path. "/" and "" mean the index page.
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => "index.html",
    }
}

// Nav hrefs that point at the current page
pub fn active_links<'a>(hrefs: &'a [String], path: &str) -> Vec<&'a str> {
    let page = current_page(path);
    hrefs
        .iter()
        .map(String::as_str)
        .filter(|href| *href == page)
        .collect()
}
