//! `Link` response header parsing (RFC 8288 subset).
//!
//! Canvas advertises pagination as
//! `<https://..&page=2>; rel="current",<https://..&page=3>; rel="next",...`.

/// One `<url>; rel="..."` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<'a> {
    pub url: &'a str,
    pub rels: Vec<&'a str>,
}

impl Link<'_> {
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parse every entry of a `Link` header. Entries without a closing `>` end
/// the scan; entries without a `rel` parameter are kept with no relations.
pub fn parse_links(header: &str) -> Vec<Link<'_>> {
    let mut links = Vec::new();
    let mut rest = header;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };

        let url = after_open[..close].trim();
        let tail = &after_open[close + 1..];

        // Parameters run until the next entry's `<`.
        let params_end = tail.find('<').unwrap_or(tail.len());
        let rels = tail[..params_end]
            .split(';')
            .filter_map(|param| {
                let (key, value) = param.split_once('=')?;
                key.trim().eq_ignore_ascii_case("rel").then(|| {
                    value
                        .trim()
                        .trim_end_matches(',')
                        .trim()
                        .trim_matches('"')
                })
            })
            .flat_map(str::split_whitespace)
            .collect();

        if !url.is_empty() {
            links.push(Link { url, rels });
        }

        rest = &tail[params_end..];
    }

    links
}

/// URL of the `rel="next"` entry, if any.
pub fn next_link(header: &str) -> Option<&str> {
    parse_links(header)
        .into_iter()
        .find(|link| link.has_rel("next"))
        .map(|link| link.url)
}
