mod analysis;
pub mod de;
mod overview;

pub use analysis::{RankedItem, RawAnalysis};
pub use overview::{RankedEntry, RawOverview};

use serde::Deserialize;

/// `{ "data": ... }` wrapper every analytics endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}
