use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfCalcError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Clé API manquante. Configurez-la avec `profcalc config --set-api-key VOTRE_CLE` ou la variable GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Erreur d'appel API : {0}")]
    ApiCall(String),

    #[error("Réponse API illisible : {0}")]
    ApiParse(String),

    #[error("Erreur JSON : {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erreur IO : {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur d'exécution CLI : {0}")]
    CliExecution(String),

    #[error("Erreur de préférences : {0}")]
    Preference(String),

    #[error("Saisie invalide : {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Common(#[from] profcalc_common::Error),
}

pub type Result<T> = std::result::Result<T, ProfCalcError>;
