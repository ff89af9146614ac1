use dominator::routing;
use futures_signals::signal::{Signal, SignalExt};
use reqwest::Url;

use crate::utils::hard_navigate;

const SEARCH_PAGE: &str = "/risultati_ricerca.html";
const URL_BASE: &str = "http://localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Collection,
    SearchResults { query: Option<String> },
    LogReg,
    Recommendations,
    Quotes,
    Reviews,
    NotFound,
}

impl Route {
    pub fn signal() -> impl Signal<Item = Self> {
        routing::url()
            .signal_ref(|url| Route::from_url(url))
            .dedupe_cloned()
    }

    pub fn from_url(url: &str) -> Self {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(e) => {
                error!("error parse url {}: {}", url, e);
                return Route::NotFound;
            }
        };

        let mut paths = url.path().split('/').collect::<Vec<_>>();
        paths.retain(|path| !path.is_empty());

        match paths.as_slice() {
            [] | ["index.html"] => Route::Home,
            ["raccolta"] => Route::Collection,
            ["risultati_ricerca.html"] => Route::SearchResults {
                query: url
                    .query_pairs()
                    .find(|(key, _)| key == "q")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty()),
            },
            ["logreg"] => Route::LogReg,
            ["raccomandazioni"] | ["raccomandazioni.html"] => Route::Recommendations,
            ["quotazioni"] => Route::Quotes,
            ["recensioni"] => Route::Reviews,
            _ => Route::NotFound,
        }
    }

    pub fn url(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Collection => "/raccolta".to_string(),
            Route::SearchResults { query: Some(query) } => with_query(SEARCH_PAGE, "q", query),
            Route::SearchResults { query: None } => SEARCH_PAGE.to_string(),
            Route::LogReg => "/logreg".to_string(),
            Route::Recommendations => "/raccomandazioni".to_string(),
            Route::Quotes => "/quotazioni".to_string(),
            Route::Reviews => "/recensioni".to_string(),
            Route::NotFound => "/notfound".to_string(),
        }
    }

    /// Quotes and reviews are plain server pages outside the app.
    pub fn is_app_page(&self) -> bool {
        !matches!(self, Route::Quotes | Route::Reviews)
    }

    pub fn go(&self) {
        let url = self.url();
        if self.is_app_page() {
            routing::go_to_url(&url);
        } else if let Err(e) = hard_navigate(&url) {
            error!("{}", e);
        }
    }

    /// Header navigation, in display order.
    pub fn nav_links() -> [(&'static str, Route); 4] {
        [
            ("Home", Route::Home),
            ("Raccolta", Route::Collection),
            ("Quotazioni", Route::Quotes),
            ("Recensioni", Route::Reviews),
        ]
    }

    /// Resolves a header link by its label, ignoring case and padding.
    pub fn from_link_text(text: &str) -> Option<Route> {
        let text = text.trim();
        Self::nav_links()
            .into_iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(text))
            .map(|(_, route)| route)
    }
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    match Url::parse_with_params(&format!("{}{}", URL_BASE, path), &[(key, value)]) {
        Ok(url) => format!("{}?{}", url.path(), url.query().unwrap_or_default()),
        Err(e) => {
            error!("error build url for {}: {}", path, e);
            path.to_string()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_pages() {
        let cases = [
            ("http://localhost:5000/", Route::Home),
            ("http://localhost:5000/raccolta", Route::Collection),
            ("http://localhost:5000/logreg", Route::LogReg),
            ("http://localhost:5000/raccomandazioni.html", Route::Recommendations),
            ("http://localhost:5000/quotazioni", Route::Quotes),
            ("http://localhost:5000/recensioni/", Route::Reviews),
            ("http://localhost:5000/fumetti/12", Route::NotFound),
        ];

        for (url, route) in cases {
            assert_eq!(Route::from_url(url), route, "{url}");
        }
    }

    #[test]
    fn test_parse_search_query() {
        assert_eq!(
            Route::from_url("http://localhost:5000/risultati_ricerca.html?q=batman"),
            Route::SearchResults {
                query: Some("batman".to_string())
            }
        );
        assert_eq!(
            Route::from_url("http://localhost:5000/risultati_ricerca.html?q="),
            Route::SearchResults { query: None }
        );
        assert_eq!(
            Route::from_url("http://localhost:5000/risultati_ricerca.html?q=spider%20man"),
            Route::SearchResults {
                query: Some("spider man".to_string())
            }
        );
    }

    #[test]
    fn test_search_url_is_encoded() {
        let route = Route::SearchResults {
            query: Some("dylan dog & co".to_string()),
        };

        assert_eq!(route.url(), "/risultati_ricerca.html?q=dylan+dog+%26+co");
        assert_eq!(
            Route::from_url(&format!("http://localhost{}", route.url())),
            route
        );
    }

    #[test]
    fn test_nav_links() {
        let urls: Vec<String> = Route::nav_links().iter().map(|(_, route)| route.url()).collect();

        assert_eq!(urls, vec!["/", "/raccolta", "/quotazioni", "/recensioni"]);
        assert!(Route::Collection.is_app_page());
        assert!(!Route::Quotes.is_app_page());
    }

    #[test]
    fn test_link_text_lookup() {
        assert_eq!(Route::from_link_text("  raccolta "), Some(Route::Collection));
        assert_eq!(Route::from_link_text("HOME"), Some(Route::Home));
        assert_eq!(Route::from_link_text("Recensioni"), Some(Route::Reviews));
        assert_eq!(Route::from_link_text("Forum"), None);
    }
}
