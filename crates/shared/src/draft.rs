use crate::{
    error::DraftError,
    normalize::normalize,
    options::{OptionList, is_blank},
    palette::{self, DEFAULT_COLOR_NAME, Rgb, UNSET},
    payload::CreatePollInput,
    protection::Protection,
};

/// Theme color of the page together with how it is being picked: from the
/// named palette or as raw RGB components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    color: Rgb,
    color_name: &'static str,
    custom: bool,
    resolved: bool,
}

impl Theme {
    /// Adopts the color the page was opened with. A palette color selects its
    /// name, any other color (except [`UNSET`]) switches to custom mode.
    pub fn new(initial: Rgb) -> Self {
        let mut theme = Self {
            color: initial,
            color_name: DEFAULT_COLOR_NAME,
            custom: false,
            resolved: false,
        };
        theme.refresh();
        theme
    }

    fn refresh(&mut self) {
        if !self.resolved {
            self.resolved = true;
            if self.color != UNSET {
                match palette::name_of(self.color) {
                    Some(name) => self.color_name = name,
                    None => self.custom = true,
                }
                return;
            }
        }

        if !self.custom {
            if let Some(rgb) = palette::rgb_of(self.color_name) {
                self.color = rgb;
            }
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn color_name(&self) -> &'static str {
        self.color_name
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn select(&mut self, name: &str) -> Result<(), DraftError> {
        self.color_name = palette::PALETTE
            .iter()
            .map(|(candidate, _)| *candidate)
            .find(|candidate| *candidate == name)
            .ok_or_else(|| DraftError::UnknownColor(name.to_string()))?;
        self.refresh();
        Ok(())
    }

    pub fn set_custom(&mut self, custom: bool) {
        self.custom = custom;
        self.refresh();
    }

    /// Sets one RGB component from raw text, see
    /// [`palette::parse_color_component`]. Indices past 2 are ignored.
    pub fn set_component(&mut self, index: usize, value: &str) {
        if let Some(component) = self.color.get_mut(index) {
            *component = palette::parse_color_component(value);
        }
    }
}

/// An in-progress poll, owned by whatever page is composing it.
#[derive(Debug, Clone)]
pub struct PollDraft {
    pub title: String,
    pub description: String,
    pub options: OptionList,
    pub theme: Theme,
    pub randomize: bool,
    pub protection: Protection,
    submitting: bool,
}

impl PollDraft {
    pub fn new(initial_color: Rgb) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            options: OptionList::new(),
            theme: Theme::new(initial_color),
            randomize: true,
            protection: Protection::default(),
            submitting: false,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_theme_color_component(&mut self, index: usize, value: &str) {
        self.theme.set_component(index, value);
    }

    pub fn select_color(&mut self, name: &str) -> Result<(), DraftError> {
        self.theme.select(name)
    }

    pub fn set_custom_color(&mut self, custom: bool) {
        self.theme.set_custom(custom);
    }

    pub fn normalized_options(&self) -> Vec<String> {
        normalize(self.options.values())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !is_blank(&self.title) && !self.normalized_options().is_empty()
    }

    pub fn to_input(&self) -> CreatePollInput {
        CreatePollInput {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            owner: None,
            options: self.normalized_options(),
            color: self.theme.color(),
            randomize: self.randomize,
            protection: self.protection,
        }
    }

    /// Builds the request and locks the draft until [`Self::finish_submit`].
    /// Returns `None` while the button would be disabled.
    pub fn begin_submit(&mut self) -> Option<CreatePollInput> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        Some(self.to_input())
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(draft: &mut PollDraft, values: &[&str]) {
        for value in values {
            let last = draft.options.last_key();
            draft.options.on_change(last, *value);
        }
    }

    #[test]
    fn unset_color_takes_default_name() {
        let theme = Theme::new(UNSET);

        assert!(!theme.is_custom());
        assert_eq!(theme.color_name(), DEFAULT_COLOR_NAME);
        assert_eq!(Some(theme.color()), palette::rgb_of(DEFAULT_COLOR_NAME));
    }

    #[test]
    fn palette_color_resolves_to_its_name() {
        let teal = palette::rgb_of("Teal").unwrap();
        let theme = Theme::new(teal);

        assert!(!theme.is_custom());
        assert_eq!(theme.color_name(), "Teal");
        assert_eq!(theme.color(), teal);
    }

    #[test]
    fn unknown_color_enters_custom_mode() {
        let theme = Theme::new([1, 2, 3]);

        assert!(theme.is_custom());
        assert_eq!(theme.color(), [1, 2, 3]);
    }

    #[test]
    fn resolution_runs_once() {
        let teal = palette::rgb_of("Teal").unwrap();
        let mut theme = Theme::new(teal);

        theme.select("Crimson").unwrap();
        assert_eq!(theme.color_name(), "Crimson");
        assert_eq!(theme.color(), palette::rgb_of("Crimson").unwrap());

        theme.set_custom(true);
        theme.set_custom(false);
        assert!(!theme.is_custom());
        assert_eq!(theme.color_name(), "Crimson");
    }

    #[test]
    fn custom_components_survive_mode_refresh() {
        let mut theme = Theme::new(UNSET);
        theme.set_custom(true);
        theme.set_component(0, "12");
        theme.set_component(1, "34");
        theme.set_component(2, "56");
        theme.set_custom(true);

        assert!(theme.is_custom());
        assert_eq!(theme.color(), [12, 34, 56]);
        assert_eq!(theme.color_name(), DEFAULT_COLOR_NAME);
    }

    #[test]
    fn selecting_a_name_follows_the_palette() {
        let mut theme = Theme::new(UNSET);
        theme.select("Crimson").unwrap();

        assert_eq!(theme.color(), palette::rgb_of("Crimson").unwrap());
        assert_eq!(palette::name_of(theme.color()), Some("Crimson"));
        assert!(theme.select("Mauve").is_err());
        assert_eq!(theme.color_name(), "Crimson");
    }

    #[test]
    fn leaving_custom_mode_snaps_back_to_palette() {
        let mut theme = Theme::new([9, 9, 9]);
        assert!(theme.is_custom());

        theme.set_custom(false);

        assert_eq!(theme.color(), palette::rgb_of(DEFAULT_COLOR_NAME).unwrap());
    }

    #[test]
    fn component_input_is_lenient() {
        let mut draft = PollDraft::new([1, 2, 3]);
        draft.set_theme_color_component(0, "abc");
        draft.set_theme_color_component(1, "400");
        draft.set_theme_color_component(5, "7");

        assert_eq!(draft.theme.color(), [0, 400, 3]);
    }

    #[test]
    fn submit_gate_needs_title_and_option() {
        let mut draft = PollDraft::new(UNSET);
        assert!(!draft.can_submit());

        draft.set_title("Lunch?");
        assert!(!draft.can_submit());

        fill(&mut draft, &["   "]);
        assert!(!draft.can_submit());

        fill(&mut draft, &["Pizza"]);
        assert!(draft.can_submit());

        draft.set_title("");
        assert!(!draft.can_submit());

        draft.set_title("   ");
        assert!(!draft.can_submit());
        assert!(draft.begin_submit().is_none());
    }

    #[test]
    fn begin_submit_locks_until_finished() {
        let mut draft = PollDraft::new(UNSET);
        draft.set_title("Lunch?");
        draft.protection = Protection::Ip;
        fill(&mut draft, &["Pizza", "Pizza", "  ", "Tacos"]);

        let input = draft.begin_submit().unwrap();
        assert_eq!(input.options, ["Pizza", "Tacos"]);
        assert_eq!(input.protection, Protection::Ip);
        assert_eq!(input.owner, None);
        assert!(input.randomize);

        assert!(draft.is_submitting());
        assert!(draft.begin_submit().is_none());

        draft.finish_submit();
        assert!(draft.begin_submit().is_some());
    }
}
