use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("設定値のパースに失敗しました: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("ディスクリプタのパースに失敗しました: {0}")]
    DescriptorFormat(String),

    #[error(
        "ディスクリプタの '{section}' セクションが不正です（{found}）\n\nヒント:\n  • app.yml に '{section}:' マッピングが存在するか確認してください"
    )]
    DescriptorShape {
        section: &'static str,
        found: &'static str,
    },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::DescriptorFormat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
