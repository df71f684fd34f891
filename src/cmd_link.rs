//! `link` command: show the routing request for one route.

use std::path::Path;

use trafficstate_config::ConfigLoader;

use crate::register::{link_builder, register_entities};

pub(crate) fn cmd_link(path: &Path, route_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", redacted_link(path, route_id)?);
    Ok(())
}

fn redacted_link(path: &Path, route_id: &str) -> Result<String, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(path)?;
    let (waypoints, routes) = register_entities(&config)?;
    let route = routes.get(route_id)?;
    let request = link_builder(&config).build(&route, &*waypoints)?;
    Ok(format!("{} {}", request.method, request.redacted_url()))
}
