mod drawer_menu_component;
mod state;

pub use drawer_menu_component::DrawerMenuComponent;
pub use state::{DrawerMenuState, MenuActivation, MenuEntry, MenuRenderer};
