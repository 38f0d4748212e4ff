use crate::config::ConfigError;
use crate::flow::LayoutError;
use crate::listings::ListingImportError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(ListingImportError),
    Layout(LayoutError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "listing import error: {}", err),
            AppError::Layout(err) => write!(f, "layout error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Layout(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) | AppError::Layout(LayoutError::InvalidCanvas { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Layout(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ListingImportError> for AppError {
    fn from(value: ListingImportError) -> Self {
        Self::Import(value)
    }
}

impl From<LayoutError> for AppError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::LinkRef;
    use crate::legality::Category;

    #[test]
    fn unusable_canvas_maps_to_bad_request() {
        let error = LayoutError::InvalidCanvas {
            width: 10.0,
            height: 294.0,
            bar_width: 40.0,
        };
        let response = AppError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn broken_topology_maps_to_internal_error() {
        let broken = [
            LayoutError::DuplicateNode(Category::All),
            LayoutError::DuplicateLink(LinkRef::new(Category::All, Category::Legal)),
            LayoutError::UnknownNode {
                link: LinkRef::new(Category::All, Category::Apartment),
                node: Category::Apartment,
            },
            LayoutError::UnresolvedLink {
                link: LinkRef::new(Category::HostMult, Category::Illegal),
                reference: LinkRef::new(Category::FullApt, Category::Illegal),
            },
        ];
        for error in broken {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn config_errors_map_to_internal_error() {
        let response = AppError::from(ConfigError::InvalidPort).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
