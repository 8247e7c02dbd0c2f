use std::fmt;

/// Represents errors that can occur when registering a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum InsertError {
    /// The HTTP method is not one of GET, POST, PUT, PATCH or DELETE.
    UnsupportedMethod {
        /// The method string as passed in.
        method: String,
    },
    /// A parameter carries a `+` or `*` repetition modifier.
    ///
    /// Repeated path components are not supported.
    RepeatModifier {
        /// The name of the offending parameter.
        param: String,
    },
    /// A segment could not be compiled, e.g. an unclosed or invalid
    /// custom capture group like `:id(\d+`.
    InvalidPattern {
        /// The segment that failed to compile.
        segment: String,
    },
    /// Attempted to register a route that is functionally identical to an
    /// existing route: every segment has the same shape, even if parameter
    /// names differ.
    Conflict {
        /// The previously registered route the insertion conflicts with.
        with: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMethod { method } => {
                write!(f, "unsupported HTTP method: {}", method)
            }
            Self::RepeatModifier { param } => {
                write!(f, "repeated path components are not supported: {}", param)
            }
            Self::InvalidPattern { segment } => {
                write!(f, "segment could not be compiled: {}", segment)
            }
            Self::Conflict { with } => {
                write!(
                    f,
                    "insertion failed due to conflict with previously registered route: {}",
                    with
                )
            }
        }
    }
}

impl std::error::Error for InsertError {}

/// A failed match attempt.
///
/// ```
/// use routree::{MatchError, Router};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router: Router<()> = Router::new();
/// router.insert("GET", "/home", vec![()])?;
/// router.sort();
///
/// // no routes match
/// if let Err(err) = router.at("GET", "/foobar") {
///     assert_eq!(err, MatchError::NotFound);
/// }
/// # Ok(())
/// # }
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MatchError {
    /// No route was found for a supported method.
    NotFound,
    /// The HTTP method is not one of GET, POST, PUT, PATCH or DELETE.
    ///
    /// Unlike [`NotFound`](MatchError::NotFound), this is a hard error and is
    /// returned regardless of what routes are registered.
    UnsupportedMethod {
        /// The method string as passed in.
        method: String,
    },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "matching route not found"),
            Self::UnsupportedMethod { method } => {
                write!(f, "unsupported HTTP method: {}", method)
            }
        }
    }
}

impl std::error::Error for MatchError {}
