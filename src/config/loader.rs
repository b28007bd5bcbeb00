//! `.echoes.json` の読み込み

use std::io;
use std::path::Path;

use super::{
    ConfigError,
    EchoesSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".echoes.json";

/// プロジェクトルート直下の `.echoes.json` を読み込む
///
/// ファイルがなければ `Ok(None)`。省略されたフィールドはデフォルト値になる。
/// バリデーションは呼び出し側で行う。
///
/// # Errors
/// - [`ConfigError::Read`]: ファイルはあるが読めない
/// - [`ConfigError::Parse`]: JSON として不正、または型が合わない
pub(super) fn read_project_settings(project_root: &Path) -> Result<Option<EchoesSettings>, ConfigError> {
    let path = project_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(None);
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    match serde_json::from_str::<EchoesSettings>(&content) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "Read settings file");
            Ok(Some(settings))
        }
        Err(source) => Err(ConfigError::Parse { path, source }),
    }
}
