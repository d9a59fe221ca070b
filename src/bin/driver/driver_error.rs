use slcc::codegen::CodegenError;
use slcc::lexer::LexError;
use slcc::parser::ParseError;
use slcc::recovery::RecoveryError;
use slcc::semantic_analysis::SemAnalysisError;

pub enum DriverError {
    InputFileDoesNotExist(String),
    LexerError(String),
    ParserError(String),
    RecoveryError(String),
    SemanticError(String),
    CodegenError(String),
    IoError(String),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "io error: {e}"),
            Self::LexerError(e) => write!(f, "lex error: {e}"),
            Self::ParserError(e) => write!(f, "parse error: {e}"),
            Self::RecoveryError(e) => write!(f, "recovery error: {e}"),
            Self::SemanticError(e) => write!(f, "semantic error: {e}"),
            Self::CodegenError(e) => write!(f, "codegen error: {e}"),
            Self::InputFileDoesNotExist(name) => write!(f, "File {name} does not exist"),
        }
    }
}

impl std::fmt::Debug for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl std::error::Error for DriverError {}

impl From<LexError> for DriverError {
    fn from(e: LexError) -> Self {
        Self::LexerError(e.to_string())
    }
}

impl From<ParseError> for DriverError {
    fn from(e: ParseError) -> Self {
        Self::ParserError(e.to_string())
    }
}

impl From<RecoveryError> for DriverError {
    fn from(e: RecoveryError) -> Self {
        Self::RecoveryError(e.to_string())
    }
}

impl From<SemAnalysisError> for DriverError {
    fn from(e: SemAnalysisError) -> Self {
        Self::SemanticError(e.to_string())
    }
}

impl From<CodegenError> for DriverError {
    fn from(e: CodegenError) -> Self {
        Self::CodegenError(e.to_string())
    }
}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}
