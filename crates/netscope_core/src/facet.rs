use std::collections::BTreeMap;
use std::fmt;

/// One category of extracted content returned by the scraping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Facet {
    #[default]
    Html,
    Css,
    Js,
    Xhr,
    Images,
    Docs,
}

impl Facet {
    /// All facets in button order.
    pub const ALL: [Facet; 6] = [
        Facet::Html,
        Facet::Css,
        Facet::Js,
        Facet::Xhr,
        Facet::Images,
        Facet::Docs,
    ];

    /// Key used by the scraping service's JSON document.
    pub fn key(self) -> &'static str {
        match self {
            Facet::Html => "html",
            Facet::Css => "css",
            Facet::Js => "js",
            Facet::Xhr => "xhr",
            Facet::Images => "images",
            Facet::Docs => "docs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::Html => "HTML",
            Facet::Css => "CSS",
            Facet::Js => "JS",
            Facet::Xhr => "XHR",
            Facet::Images => "Images",
            Facet::Docs => "Docs",
        }
    }

    pub fn from_key(key: &str) -> Option<Facet> {
        Facet::ALL.into_iter().find(|facet| facet.key() == key)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetData {
    /// A single blob, shown preformatted.
    Text(String),
    /// An ordered list, shown one item per line.
    Items(Vec<String>),
}

/// Scraping service reply, keyed by facet. Facets the service left out are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeResult {
    facets: BTreeMap<Facet, FacetData>,
}

impl ScrapeResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, facet: Facet, data: FacetData) {
        self.facets.insert(facet, data);
    }

    pub fn with(mut self, facet: Facet, data: FacetData) -> Self {
        self.insert(facet, data);
        self
    }

    pub fn get(&self, facet: Facet) -> Option<&FacetData> {
        self.facets.get(&facet)
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl FromIterator<(Facet, FacetData)> for ScrapeResult {
    fn from_iter<I: IntoIterator<Item = (Facet, FacetData)>>(iter: I) -> Self {
        Self {
            facets: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for facet in Facet::ALL {
            assert_eq!(Facet::from_key(facet.key()), Some(facet));
        }
        assert_eq!(Facet::from_key("HTML"), None);
        assert_eq!(Facet::from_key("fonts"), None);
    }

    #[test]
    fn default_facet_is_html() {
        assert_eq!(Facet::default(), Facet::Html);
    }
}
