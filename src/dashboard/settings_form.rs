//! Settings form state.

use crate::api::Settings;

/// Form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    /// Target temperature.
    #[default]
    UserTemp,
    /// Light level.
    UserLight,
    /// Light duration.
    LightDuration,
}

impl SettingsField {
    /// All fields in display order.
    pub const ALL: [SettingsField; 3] = [
        SettingsField::UserTemp,
        SettingsField::UserLight,
        SettingsField::LightDuration,
    ];

    /// Get the next field in the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::UserTemp => Self::UserLight,
            Self::UserLight => Self::LightDuration,
            Self::LightDuration => Self::UserTemp,
        }
    }

    /// Get the previous field in the cycle.
    pub fn prev(self) -> Self {
        match self {
            Self::UserTemp => Self::LightDuration,
            Self::UserLight => Self::UserTemp,
            Self::LightDuration => Self::UserLight,
        }
    }

    /// Field label.
    pub fn label(self) -> &'static str {
        match self {
            Self::UserTemp => "Target temperature",
            Self::UserLight => "Light level",
            Self::LightDuration => "Light duration",
        }
    }
}

/// Settings form state.
///
/// Field contents survive closing and reopening the form.
#[derive(Debug, Default)]
pub struct SettingsForm {
    visible: bool,
    focus: SettingsField,
    user_temp: String,
    user_light: String,
    light_duration: String,
}

impl SettingsForm {
    /// Create an empty, hidden form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the form is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the form with focus on the first field.
    pub fn open(&mut self) {
        self.visible = true;
        self.focus = SettingsField::UserTemp;
    }

    /// Hide the form without sending anything.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Focused field.
    pub fn focus(&self) -> SettingsField {
        self.focus
    }

    /// Move focus forward.
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus backward.
    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Current text of a field.
    pub fn value(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::UserTemp => &self.user_temp,
            SettingsField::UserLight => &self.user_light,
            SettingsField::LightDuration => &self.light_duration,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            SettingsField::UserTemp => &mut self.user_temp,
            SettingsField::UserLight => &mut self.user_light,
            SettingsField::LightDuration => &mut self.light_duration,
        }
    }

    /// Add a character to the focused field.
    pub fn input(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Remove the last character from the focused field.
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Close the form and build settings from the fields exactly as typed.
    pub fn submit(&mut self) -> Settings {
        self.visible = false;
        Settings {
            user_temp: self.user_temp.clone(),
            user_light: self.user_light.clone(),
            light_duration: self.light_duration.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut SettingsForm, s: &str) {
        s.chars().for_each(|c| form.input(c));
    }

    #[test]
    fn test_submit_sends_raw_strings() {
        let mut form = SettingsForm::new();
        form.open();
        type_str(&mut form, "72");
        form.next_field();
        type_str(&mut form, "80");
        form.next_field();
        type_str(&mut form, "60");

        let settings = form.submit();
        assert!(!form.is_visible());
        assert_eq!(settings.user_temp, "72");
        assert_eq!(settings.user_light, "80");
        assert_eq!(settings.light_duration, "60");
    }

    #[test]
    fn test_empty_and_non_numeric_pass_through() {
        let mut form = SettingsForm::new();
        form.open();
        form.next_field();
        type_str(&mut form, "sunset");

        let settings = form.submit();
        assert_eq!(settings.user_temp, "");
        assert_eq!(settings.user_light, "sunset");
        assert_eq!(settings.light_duration, "");
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut form = SettingsForm::new();
        form.open();
        form.prev_field();
        assert_eq!(form.focus(), SettingsField::LightDuration);
        form.next_field();
        assert_eq!(form.focus(), SettingsField::UserTemp);
    }

    #[test]
    fn test_values_survive_reopen() {
        let mut form = SettingsForm::new();
        form.open();
        type_str(&mut form, "251");
        form.backspace();
        form.close();

        form.open();
        assert_eq!(form.value(SettingsField::UserTemp), "25");
        assert_eq!(form.focus(), SettingsField::UserTemp);
    }
}
