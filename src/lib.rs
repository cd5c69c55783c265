pub mod connectivity;
pub mod constants;
pub mod door;
pub mod expansion;
pub mod grid;
pub mod location;
pub mod perimeter;
pub mod placement;
pub mod projection;
pub mod segment;
pub mod snapshot;

pub use connectivity::*;
pub use door::*;
pub use expansion::*;
pub use grid::*;
pub use location::*;
pub use perimeter::*;
pub use placement::*;
pub use projection::*;
pub use segment::*;
pub use snapshot::*;
