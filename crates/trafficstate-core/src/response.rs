//! Routing API response parsing and state-text formatting.
//!
//! Only the fields the poller needs are read:
//! `resourceSets[0].resources[0].travelDurationTraffic` (seconds) and
//! `resourceSets[0].resources[0].routeLegs[].description`.

use serde::Deserialize;

use trafficstate_protocols::error::RoutingError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
    resource_sets: Vec<ResourceSet>,
}

#[derive(Debug, Deserialize)]
struct ResourceSet {
    resources: Vec<RouteResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteResource {
    travel_duration_traffic: u64,
    #[serde(default)]
    route_legs: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
    #[serde(default)]
    description: Option<String>,
}

/// The parts of a routing response that make up a route's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// Travel duration under current traffic, in seconds.
    pub travel_duration_traffic: u64,
    pub leg_descriptions: Vec<String>,
}

/// Parse a raw routing API body.
pub fn parse_route_response(body: &str) -> Result<RouteSummary, RoutingError> {
    let response: RouteResponse = serde_json::from_str(body)
        .map_err(|e| RoutingError::MalformedResponse(e.to_string()))?;

    let resource = response
        .resource_sets
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::MalformedResponse("resourceSets is empty".to_string()))?
        .resources
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::MalformedResponse("resources is empty".to_string()))?;

    Ok(RouteSummary {
        travel_duration_traffic: resource.travel_duration_traffic,
        leg_descriptions: resource
            .route_legs
            .into_iter()
            .filter_map(|leg| leg.description)
            .filter(|d| !d.is_empty())
            .collect(),
    })
}

/// Render a summary as `"{h}:{mm}hrs. Via({leg}, {leg}, ...)"`.
///
/// Hours and minutes are floored; minutes are zero-padded.
pub fn format_state_text(summary: &RouteSummary) -> String {
    let hours = summary.travel_duration_traffic / 3600;
    let minutes = (summary.travel_duration_traffic % 3600) / 60;
    format!(
        "{}:{:02}hrs. Via({})",
        hours,
        minutes,
        summary.leg_descriptions.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(duration: u64, legs: &[&str]) -> String {
        json!({
            "authenticationResultCode": "ValidCredentials",
            "resourceSets": [{
                "estimatedTotal": 1,
                "resources": [{
                    "travelDistance": 1054.2,
                    "travelDuration": duration,
                    "travelDurationTraffic": duration,
                    "routeLegs": legs
                        .iter()
                        .map(|d| json!({ "description": d, "travelDuration": 1 }))
                        .collect::<Vec<_>>(),
                }]
            }],
            "statusCode": 200
        })
        .to_string()
    }

    #[test]
    fn test_parse_response() {
        let summary = parse_route_response(&body(125, &["Autobahn A1"])).unwrap();
        assert_eq!(summary.travel_duration_traffic, 125);
        assert_eq!(summary.leg_descriptions, vec!["Autobahn A1"]);
    }

    #[test]
    fn test_format_minutes_only() {
        let summary = parse_route_response(&body(125, &["Autobahn A1"])).unwrap();
        assert_eq!(format_state_text(&summary), "0:02hrs. Via(Autobahn A1)");
    }

    #[test]
    fn test_format_hours_and_legs() {
        let summary = RouteSummary {
            travel_duration_traffic: 3 * 3600 + 7 * 60 + 59,
            leg_descriptions: vec!["A1".to_string(), "A3".to_string()],
        };
        assert_eq!(format_state_text(&summary), "3:07hrs. Via(A1, A3)");
    }

    #[test]
    fn test_legs_without_description_are_skipped() {
        let raw = json!({
            "resourceSets": [{ "resources": [{
                "travelDurationTraffic": 600,
                "routeLegs": [{ "description": "B96" }, { "travelDuration": 3 }]
            }]}]
        })
        .to_string();
        let summary = parse_route_response(&raw).unwrap();
        assert_eq!(summary.leg_descriptions, vec!["B96"]);
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_route_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, RoutingError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_resource_sets() {
        let err = parse_route_response(r#"{"resourceSets": []}"#).unwrap_err();
        assert_eq!(
            err,
            RoutingError::MalformedResponse("resourceSets is empty".to_string())
        );
    }

    #[test]
    fn test_missing_duration() {
        let raw = r#"{"resourceSets": [{"resources": [{"routeLegs": []}]}]}"#;
        assert!(matches!(
            parse_route_response(raw),
            Err(RoutingError::MalformedResponse(_))
        ));
    }
}
