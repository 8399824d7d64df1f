use crate::config::SUPPORTED_COUNTRIES;

/// Appearance and selection settings for the world map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapConfiguration {
    /// Any CSS color string. Stored verbatim, parsed only when drawing.
    pub outline_color: String,
    /// Set semantics, list representation. Order is insignificant for display.
    pub selected_countries: Vec<String>,
    /// Empty means "no target".
    pub zoom_target: String,
}

impl Default for MapConfiguration {
    fn default() -> Self {
        Self {
            outline_color: "#00ff00".to_string(),
            selected_countries: vec!["USA".to_string()],
            zoom_target: "USA".to_string(),
        }
    }
}

/// A partial update to [`MapConfiguration`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub outline_color: Option<String>,
    pub selected_countries: Option<Vec<String>>,
    pub zoom_target: Option<String>,
}

impl ConfigPatch {
    pub fn outline_color(color: impl Into<String>) -> Self {
        Self {
            outline_color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn selected_countries(countries: Vec<String>) -> Self {
        Self {
            selected_countries: Some(countries),
            ..Default::default()
        }
    }

    pub fn zoom_target(target: impl Into<String>) -> Self {
        Self {
            zoom_target: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outline_color.is_none()
            && self.selected_countries.is_none()
            && self.zoom_target.is_none()
    }
}

impl MapConfiguration {
    /// Shallow merge: every field present in `patch` replaces ours wholesale.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        Self {
            outline_color: patch
                .outline_color
                .clone()
                .unwrap_or_else(|| self.outline_color.clone()),
            selected_countries: patch
                .selected_countries
                .clone()
                .unwrap_or_else(|| self.selected_countries.clone()),
            zoom_target: patch
                .zoom_target
                .clone()
                .unwrap_or_else(|| self.zoom_target.clone()),
        }
    }

    pub fn is_selected(&self, country: &str) -> bool {
        self.selected_countries.iter().any(|c| c == country)
    }

    pub fn zoom_target(&self) -> Option<&str> {
        if self.zoom_target.is_empty() {
            None
        } else {
            Some(&self.zoom_target)
        }
    }

    /// Selection after toggling `country`: removed (order kept) if present,
    /// appended otherwise.
    pub fn toggled_selection(&self, country: &str) -> Vec<String> {
        if self.is_selected(country) {
            self.selected_countries
                .iter()
                .filter(|c| c.as_str() != country)
                .cloned()
                .collect()
        } else {
            let mut next = self.selected_countries.clone();
            next.push(country.to_string());
            next
        }
    }
}

/// The full supported list, discarding whatever was selected before.
pub fn select_all_countries() -> Vec<String> {
    SUPPORTED_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_selection_and_order() {
        let config = MapConfiguration {
            selected_countries: vec!["France".into(), "USA".into(), "Japan".into()],
            ..Default::default()
        };

        let once = config.merged(&ConfigPatch::selected_countries(
            config.toggled_selection("Germany"),
        ));
        assert_eq!(once.selected_countries, vec!["France", "USA", "Japan", "Germany"]);
        assert_eq!(once.toggled_selection("Germany"), config.selected_countries);
    }

    #[test]
    fn test_toggle_twice_on_selected_country_keeps_set() {
        let config = MapConfiguration {
            selected_countries: vec!["France".into(), "USA".into(), "Japan".into()],
            ..Default::default()
        };

        let once = config.merged(&ConfigPatch::selected_countries(
            config.toggled_selection("USA"),
        ));
        assert_eq!(once.selected_countries, vec!["France", "Japan"]);
        // Re-added at the end
        assert_eq!(once.toggled_selection("USA"), vec!["France", "Japan", "USA"]);
    }

    #[test]
    fn test_toggle_removes_preserving_order() {
        let config = MapConfiguration {
            selected_countries: vec!["Canada".into(), "France".into(), "Japan".into()],
            ..Default::default()
        };
        assert_eq!(config.toggled_selection("France"), vec!["Canada", "Japan"]);
    }

    #[test]
    fn test_select_all_ignores_previous_selection() {
        let expected = vec!["USA", "Canada", "United Kingdom", "France", "Germany", "Japan"];
        assert_eq!(select_all_countries(), expected);

        let config = MapConfiguration {
            selected_countries: vec!["Japan".into(), "Narnia".into()],
            ..Default::default()
        };
        let next = config.merged(&ConfigPatch::selected_countries(select_all_countries()));
        assert_eq!(next.selected_countries, expected);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let config = MapConfiguration {
            outline_color: "rebeccapurple".into(),
            selected_countries: vec!["Germany".into()],
            zoom_target: String::new(),
        };
        let patch = ConfigPatch::default();
        assert!(patch.is_empty());
        assert_eq!(config.merged(&patch), config);
    }

    #[test]
    fn test_patch_replaces_only_given_fields() {
        let config = MapConfiguration::default();
        let next = config.merged(&ConfigPatch::outline_color("not a color"));
        assert_eq!(next.outline_color, "not a color");
        assert_eq!(next.selected_countries, config.selected_countries);
        assert_eq!(next.zoom_target, config.zoom_target);
    }

    #[test]
    fn test_empty_zoom_target_means_none() {
        let config = MapConfiguration::default().merged(&ConfigPatch::zoom_target(""));
        assert_eq!(config.zoom_target(), None);
        let config = config.merged(&ConfigPatch::zoom_target("Japan"));
        assert_eq!(config.zoom_target(), Some("Japan"));
    }
}
