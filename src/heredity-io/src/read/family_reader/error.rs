use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FamilyReaderError {
    #[error("Dataset does not contain any line")]
    EmptyFile,

    #[error("Invalid dataset header '{got}'. Expected 'name,mother,father,trait'")]
    InvalidHeader{got: String},

    #[error("Line {line}: expected 4 comma-separated fields, found {got}")]
    InvalidFieldCount{line: usize, got: usize},

    #[error("Line {line}: individuals require a non-empty name")]
    MissingName{line: usize},

    #[error("Line {line}: individuals must carry either two parents or none")]
    SingleParent{line: usize},

    #[error("Line {line}: invalid trait value '{got}'. Expected '1', '0', or an empty field")]
    InvalidTraitValue{line: usize, got: String},
}
