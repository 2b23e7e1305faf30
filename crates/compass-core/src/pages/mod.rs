//! Page system: the [`Page`] trait, the compass page, and the bridge from
//! state cells to page events.

pub mod compass;
pub mod events;
pub mod page;

pub use compass::CompassPage;
pub use events::StateEvents;
pub use page::Page;
