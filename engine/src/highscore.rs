use serde::{Deserialize, Serialize};

use crate::config::{ConfigContentProvider, FileContentConfigProvider};
use crate::log;

/// Fixed storage key for the persisted high score.
pub const HIGH_SCORE_FILE: &str = "snake_escape_high_score.yaml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Persisted single-integer high score. Loading is fail-open: an absent or
/// unreadable record counts as 0 rather than an error.
pub struct HighScoreStore<TProvider: ConfigContentProvider> {
    provider: TProvider,
}

impl HighScoreStore<FileContentConfigProvider> {
    pub fn at_default_path() -> Self {
        Self::new(FileContentConfigProvider::new(HIGH_SCORE_FILE.to_string()))
    }
}

impl<TProvider: ConfigContentProvider> HighScoreStore<TProvider> {
    pub fn new(provider: TProvider) -> Self {
        Self { provider }
    }

    pub fn load(&self) -> u32 {
        let content = match self.provider.get_config_content() {
            Ok(Some(content)) => content,
            Ok(None) => return 0,
            Err(e) => {
                log!("Failed to read high score, starting from 0: {}", e);
                return 0;
            }
        };

        match serde_yaml_ng::from_str::<HighScoreRecord>(&content) {
            Ok(record) => record.high_score,
            Err(e) => {
                log!("Corrupt high score record, starting from 0: {}", e);
                0
            }
        }
    }

    pub fn save(&self, high_score: u32) -> Result<(), String> {
        let content = serde_yaml_ng::to_string(&HighScoreRecord { high_score })
            .map_err(|e| format!("Failed to serialize high score: {}", e))?;
        self.provider.set_config_content(&content)
    }
}
