use thiserror::Error;

#[derive(Error, Debug)]
pub enum DublettenError {
    #[error("Datei konnte nicht gelesen werden: {0}")]
    InputParse(String),

    #[error("Datei nicht gefunden: {0}")]
    FileNotFound(String),

    #[error("Die Tabelle enthält keine Daten: {0}")]
    EmptyInput(String),

    #[error("Konfigurationsfehler: {0}")]
    Config(String),

    #[error("Eingabe abgebrochen: {0}")]
    Prompt(String),

    #[error("JSON-Fehler: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] dubletten_common::Error),
}

pub type Result<T> = std::result::Result<T, DublettenError>;
