//! Icon glyphs (Phosphor regular).

use egui_phosphor::regular as ph;
use region_atlas::data::CategoryKind;

pub const CLOSE: &str = ph::X;
pub const RESET: &str = ph::ARROW_COUNTER_CLOCKWISE;
pub const SEARCH: &str = ph::MAGNIFYING_GLASS;
pub const ADDRESS: &str = ph::MAP_PIN;
pub const PHONE: &str = ph::PHONE;
pub const WEBSITE: &str = ph::GLOBE;
pub const OPEN_MAP: &str = ph::MAP_TRIFOLD;
pub const DIRECTIONS: &str = ph::NAVIGATION_ARROW;
pub const REGION: &str = ph::BUILDINGS;

pub fn category_icon(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Universities => ph::GRADUATION_CAP,
        CategoryKind::Schools => ph::STUDENT,
        CategoryKind::Associations => ph::USERS_THREE,
        CategoryKind::Other => ph::MAP_PIN,
    }
}
