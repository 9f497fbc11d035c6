//! UI components of the showroom screen.

pub mod card_grid;
pub mod component;
pub mod drawer_menu;
pub mod hint_bar;
pub mod link_prompt;
pub mod section_list;

pub use card_grid::CardGridComponent;
pub use drawer_menu::DrawerMenuComponent;
pub use hint_bar::HintBarComponent;
pub use link_prompt::LinkPromptComponent;
pub use section_list::SectionListComponent;
