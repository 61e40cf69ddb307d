use serde::{Deserialize, Serialize};

/// User preferences persisted in `settings.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub vim_mode: bool,
    /// Keys we don't know about are carried through a save untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_vim_off() {
        let s = Settings::default();
        assert!(!s.vim_mode);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"vimMode":false}"#);
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let s: Settings = serde_json::from_str(r#"{"vimMode":true,"theme":"dark"}"#).unwrap();
        assert!(s.vim_mode);
        let back: serde_json::Value = serde_json::to_value(&s).unwrap();
        assert_eq!(back["theme"], "dark");
        assert_eq!(back["vimMode"], true);
    }

    #[test]
    fn empty_object_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert!(!s.vim_mode);
    }
}
