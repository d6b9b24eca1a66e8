use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Priority rationale:
/// - Unclosed delimiters cause cascading errors downstream
/// - Expected-token errors are root causes the user should fix first
/// - Semantic errors assume valid syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the query
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,

    // User omitted something required - root cause errors
    ExpectedExpression,
    ExpectedIdentifier,
    ExpectedFunctionName,
    ExpectedPropertyName,
    ExpectedReturn,

    // User wrote something that doesn't belong
    UnexpectedToken,
    UnrecognizedInput,
    TrailingInput,

    // Valid syntax, invalid semantics
    InvalidNumber,
    InvalidEscape,
    UnresolvedFunction,
    ArityMismatch,
    UndefinedVariable,
    DuplicateVariable,

    // Never fatal
    UnusedVariable,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnusedVariable => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Syntax diagnostics come from the parser; the rest from lowering.
    pub fn is_syntax(&self) -> bool {
        *self <= Self::TrailingInput
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedBrace => "missing closing `}`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedFunctionName => "expected a function name after `::`",
            Self::ExpectedPropertyName => "expected a property name",
            Self::ExpectedReturn => "query must end with `RETURN` or `FOR`",

            Self::UnexpectedToken => "unexpected token",
            Self::UnrecognizedInput => "unrecognized input",
            Self::TrailingInput => "unexpected input after the query",

            Self::InvalidNumber => "invalid number literal",
            Self::InvalidEscape => "invalid escape sequence",
            Self::UnresolvedFunction => "unresolved function",
            Self::ArityMismatch => "wrong number of arguments",
            Self::UndefinedVariable => "undefined variable",
            Self::DuplicateVariable => "variable is already defined",

            Self::UnusedVariable => "unused variable",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnresolvedFunction => "function `{}` is not registered".to_string(),
            Self::UndefinedVariable => "variable `{}` is not defined".to_string(),
            Self::DuplicateVariable => "variable `{}` is already defined".to_string(),
            Self::UnusedVariable => "variable `{}` is never used".to_string(),
            Self::ArityMismatch => "wrong number of arguments: {}".to_string(),

            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace => {
                format!("{}; {{}}", self.fallback_message())
            }

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
