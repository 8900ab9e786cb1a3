//! Command syntax tree.

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A `#` comment; does nothing.
    Comment,
    /// `help`
    Help,
    /// `exit`
    Exit,
    /// `var = <constructor>`
    Assign {
        /// Variable being bound.
        var: String,
        /// Value to bind.
        value: Constructor,
    },
    /// `var.method(args...)`
    Call {
        /// Variable the method is called on.
        var: String,
        /// Method name and arguments, not yet checked.
        call: MethodCall,
    },
}

/// The literal forms allowed on the right of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructor {
    /// `SalesDB()` - an empty ledger.
    SalesDb,
}

impl Constructor {
    /// The source text of the constructor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SalesDb => "SalesDB()",
        }
    }
}

/// A method invocation as written, before name resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Method name.
    pub name: String,
    /// Positional arguments.
    pub args: Vec<Literal>,
}

/// An argument literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted string.
    String(String),
    /// Integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
}

impl Literal {
    /// Short name of the literal's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
        }
    }
}
