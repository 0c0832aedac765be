use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SLUG_ID: Regex = Regex::new(r"-(\d+)$").unwrap();
}

/// Extract the site id from a page slug such as `lucky-casino-5`.
pub fn parse_site_id<S: AsRef<str>>(slug: S) -> Option<u64> {
    RE_SLUG_ID
        .captures(slug.as_ref().trim())?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Build the page slug for a site: whitespace runs in the name become `-`.
pub fn site_slug(name: &str, id: u64) -> String {
    let name = name.split_whitespace().collect::<Vec<_>>().join("-");
    if name.is_empty() {
        format!("site-{}", id)
    } else {
        format!("{}-{}", name, id)
    }
}
