//! Note command implementation

use super::common::{exit_code_for, load_or_report};
use crate::core::notes::NoteEditor;
use crate::core::store::Environment;
use crate::domain::MeterId;
use clap::Args;

/// Arguments for the note command
#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Meter identifier
    pub id: MeterId,

    /// Note text
    pub text: String,
}

impl NoteArgs {
    /// Execute the note command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let env = match Environment::from_config(&config) {
            Ok(env) => env,
            Err(e) => {
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        };

        let mut editor = NoteEditor::new(self.id, None);
        editor.set_draft(self.text.clone());

        match editor.save(env.source.as_ref()).await {
            Ok(()) => {
                println!("✅ Note saved for meter {}", self.id);
                Ok(0)
            }
            Err(e) if e.is_validation() => {
                println!("⚠️  {}", e.user_message());
                Ok(exit_code_for(&e))
            }
            Err(e) => {
                println!("❌ {}", e.user_message());
                Ok(exit_code_for(&e))
            }
        }
    }
}
