//! Integration-event routing configuration.

use std::collections::HashMap;

use catalog_core::error::DomainError;
use catalog_video::domain::events::AUDIO_VIDEO_MEDIA_UPLOADED;

/// Broker address for one integration-event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Target exchange.
    pub exchange: String,
    /// Routing key within the exchange.
    pub routing_key: String,
}

/// Immutable name-to-route table built at startup and injected into the
/// publishing side. Publishing an unregistered name is a configuration
/// error, never a silent drop.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: HashMap<&'static str, Route>,
}

impl RoutingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route for `name`.
    #[must_use]
    pub fn with_route(mut self, name: &'static str, route: Route) -> Self {
        self.routes.insert(name, route);
        self
    }

    /// The routes this service ships with.
    #[must_use]
    pub fn default_routes() -> Self {
        Self::new().with_route(
            AUDIO_VIDEO_MEDIA_UPLOADED,
            Route {
                exchange: "amq.direct".to_owned(),
                routing_key: "videos.convert".to_owned(),
            },
        )
    }

    /// Resolves the route for an integration-event name.
    ///
    /// # Errors
    ///
    /// `DomainError::Infrastructure` when no route is registered for
    /// `name`.
    pub fn route_for(&self, name: &str) -> Result<&Route, DomainError> {
        self.routes.get(name).ok_or_else(|| {
            DomainError::Infrastructure(format!(
                "no route registered for integration event {name}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes_cover_the_encoder_event() {
        let table = RoutingTable::default_routes();

        let route = table.route_for(AUDIO_VIDEO_MEDIA_UPLOADED).unwrap();

        assert_eq!(route.exchange, "amq.direct");
        assert_eq!(route.routing_key, "videos.convert");
    }

    #[test]
    fn test_unregistered_name_is_a_configuration_error() {
        let table = RoutingTable::default_routes();

        let err = table.route_for("video.unknown").unwrap_err();

        assert_eq!(
            err,
            DomainError::Infrastructure(
                "no route registered for integration event video.unknown".to_owned()
            )
        );
    }
}
