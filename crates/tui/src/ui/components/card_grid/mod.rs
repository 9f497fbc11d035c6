mod card_grid_component;
mod state;

pub use card_grid_component::CardGridComponent;
pub use state::{CardGridState, GridMove};
