use rat_focus::FocusFlag;

/// Input state of the deep-link prompt overlay.
#[derive(Debug, Clone)]
pub struct LinkPromptState {
    open: bool,
    input: String,
    error: Option<String>,
    pub f_input: FocusFlag,
}

impl Default for LinkPromptState {
    fn default() -> Self {
        Self {
            open: false,
            input: String::new(),
            error: None,
            f_input: FocusFlag::named("showroom.link_prompt"),
        }
    }
}

impl LinkPromptState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.input.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.f_input.set(false);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn push(&mut self, character: char) {
        self.input.push(character);
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.input.pop();
        self.error = None;
    }
}
