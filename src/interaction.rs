//! Map clicks: hit test the hall's booths, then toggle the hit booth
//! in the active list.

use tracing::{debug, info};

use crate::controller::ListController;
use crate::geometry::{self, Point};
use crate::location::Location;
use crate::store::KeyValueStore;
use crate::venue::MapStand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Toggled { label: String, favorite: bool },
    Missed,
    /// Favoriting is disabled until a list exists
    NoActiveList,
}

/// Booth under `point`; the first booth in hall order wins on overlap
pub fn hit_test(stands: &[MapStand], point: Point) -> Option<&MapStand> {
    geometry::first_hit(stands, point, |stand| stand.polygon.as_slice())
}

pub fn click<S: KeyValueStore, L: Location>(
    controller: &mut ListController<S, L>,
    stands: &[MapStand],
    point: Point,
) -> ClickOutcome {
    if controller.active_key().is_none() {
        debug!(x = point.x, y = point.y, "Click ignored, no active list");
        return ClickOutcome::NoActiveList;
    }

    let Some(stand) = hit_test(stands, point) else {
        debug!(x = point.x, y = point.y, "Click missed every booth");
        return ClickOutcome::Missed;
    };

    match controller.toggle_favorite(&stand.label) {
        Ok(favorite) => {
            info!(booth = %stand.label, favorite, "Booth clicked");
            ClickOutcome::Toggled {
                label: stand.label.clone(),
                favorite,
            }
        }
        Err(_) => ClickOutcome::NoActiveList,
    }
}
