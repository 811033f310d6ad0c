use serde::{Deserialize, Serialize};

/// An ordered list of middleware identifiers.
///
/// Routes and groups name their middleware; turning a name into executable
/// code is the host [`Invoker`](crate::Invoker)'s job. A single identifier,
/// a list, or nothing at all can be given wherever a `Middlewares` is
/// accepted:
///
/// ```
/// use routier::Middlewares;
///
/// let single: Middlewares = "auth".into();
/// let many: Middlewares = vec!["auth", "throttle"].into();
/// let none = Middlewares::none();
///
/// assert_eq!(single.as_slice(), ["auth"]);
/// assert_eq!(many.as_slice(), ["auth", "throttle"]);
/// assert!(none.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Middlewares(Vec<String>);

impl Middlewares {
    /// The empty list.
    pub fn none() -> Middlewares {
        Middlewares(Vec::new())
    }

    /// Normalizes a single identifier or a list of identifiers into an
    /// ordered list. Empty input stays empty.
    pub fn resolve<M: Into<Middlewares>>(input: M) -> Middlewares {
        input.into()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The effective chain for a matched route: the enclosing groups'
    /// middleware outermost-first, then the route's own.
    pub(crate) fn chain(group_lists: &[Middlewares], local: &Middlewares) -> Middlewares {
        let mut out = Vec::new();
        for list in group_lists {
            out.extend_from_slice(&list.0);
        }
        out.extend_from_slice(&local.0);
        Middlewares(out)
    }
}

impl From<&str> for Middlewares {
    fn from(name: &str) -> Middlewares {
        Middlewares(vec![name.to_string()])
    }
}

impl From<String> for Middlewares {
    fn from(name: String) -> Middlewares {
        Middlewares(vec![name])
    }
}

impl From<Vec<&str>> for Middlewares {
    fn from(names: Vec<&str>) -> Middlewares {
        Middlewares(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Middlewares {
    fn from(names: Vec<String>) -> Middlewares {
        Middlewares(names)
    }
}
