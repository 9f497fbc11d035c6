mod link_prompt_component;
mod state;

pub use link_prompt_component::LinkPromptComponent;
pub use state::LinkPromptState;
