/// One classified line of build output.
///
/// Every raw line maps to at least one `Diagnostic`; anything the classifier
/// does not recognise becomes [`Diagnostic::Other`].
///
/// # Example
/// ```
/// use gradle_pretty::Diagnostic;
///
/// let d = Diagnostic::CompilerError {
///     path: "file:///src/Main.kt".to_string(),
///     line: 3,
///     col: 7,
///     message: "unresolved reference".to_string(),
/// };
/// assert!(d.is_compiler_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    TaskHeader {
        name: String,
        failed: bool,
    },
    CompilerError {
        path: String,
        line: u32,
        col: u32,
        message: String,
    },
    GenericError {
        message: String,
    },
    BuildStatus {
        succeeded: bool,
    },
    Other {
        raw: String,
    },
}

impl Diagnostic {
    pub fn is_compiler_error(&self) -> bool {
        matches!(self, Diagnostic::CompilerError { .. })
    }
}

/// A single compiler error as stored in a [`crate::FileErrorGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorEntry {
    pub line: u32,
    pub col: u32,
    pub message: String,
}

/// Semantic style of a display block. Resolved to escape codes (or nothing)
/// by a [`crate::e_render::Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Info,
    Success,
    Failure,
    Warning,
    Dim,
    None,
}

/// One unit of formatted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub style: StyleTag,
    pub text: String,
}

impl Block {
    pub fn new(style: StyleTag, text: impl Into<String>) -> Self {
        Block {
            style,
            text: text.into(),
        }
    }
}
