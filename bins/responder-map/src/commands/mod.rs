//! CLI command implementations

pub mod isochrones;
pub mod place;
pub mod render;
pub mod replay;
pub mod suggest;
pub mod summary;

use responder_cli::output::Status;
use responder_core::ErrorCode;
use responder_dashboard::Notification;
use responder_geo::GeoError;

/// Map a geometry failure onto the shared error codes
pub(crate) fn geo_error(err: GeoError) -> responder_core::Error {
    let code = match &err {
        GeoError::InvalidCoordinate(_) => ErrorCode::InvalidCoordinate,
        GeoError::InvalidRadius(_) => ErrorCode::InvalidRadius,
    };
    responder_core::Error::new(code, err.to_string()).with_source(err)
}

/// Print dashboard notifications as status lines
pub(crate) fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        match notification {
            Notification::StationAdded { .. } => Status::success(&notification.to_string()),
            Notification::AllCovered => Status::info(&notification.to_string()),
            Notification::NoSuitableCluster => Status::warning(&notification.to_string()),
        }
    }
}
