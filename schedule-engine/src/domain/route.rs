//! Fixed route identification.

use serde::{Deserialize, Serialize};

use super::RoutePattern;

/// A single route of one organization's service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub organization_id: String,
    pub service_id: String,
    pub route_id: String,
    pub short_name: Option<String>,
}

impl RouteInfo {
    /// Whether `pattern` belongs to this route, by id or short name.
    pub fn owns(&self, pattern: &RoutePattern) -> bool {
        if pattern.route_id == self.route_id {
            return true;
        }
        match (&self.short_name, &pattern.route_short_name) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(route_id: &str, short_name: Option<&str>) -> RoutePattern {
        RoutePattern {
            id: "p".into(),
            route_id: route_id.into(),
            route_short_name: short_name.map(String::from),
            headsign: None,
            direction: None,
            stops: vec![],
            coordinates: vec![],
        }
    }

    #[test]
    fn matches_by_id_or_short_name() {
        let route = RouteInfo {
            organization_id: "stm".into(),
            service_id: "bus".into(),
            route_id: "r-24".into(),
            short_name: Some("24".into()),
        };
        assert!(route.owns(&pattern("r-24", None)));
        assert!(route.owns(&pattern("other-id", Some("24"))));
        assert!(!route.owns(&pattern("r-25", Some("25"))));
        assert!(!route.owns(&pattern("r-25", None)));
    }
}
