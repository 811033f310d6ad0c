use crate::middleware::Middlewares;

/// The declared scalar type of a controller action parameter, used to pick a
/// placeholder pattern for the generated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Str,
    Float,
    Bool,
    Untyped,
}

impl ParamKind {
    /// The placeholder token generated for this parameter type. Anything
    /// without a dedicated pattern falls back to `:any`.
    pub(crate) fn placeholder(self) -> &'static str {
        match self {
            ParamKind::Int => ":id",
            ParamKind::Str => ":string",
            _ => ":any",
        }
    }
}

/// One formal parameter of a controller action.
#[derive(Debug, Clone)]
pub struct ActionParam {
    pub kind: ParamKind,
    pub optional: bool,
}

/// Describes one public action of a controller: its name and formal
/// parameter list.
///
/// The router never inspects live code; the host's controller loader
/// produces descriptors and the router synthesizes routes from them. The
/// action name carries the HTTP method as a case-insensitive prefix
/// (`getUser`, `xpostComment`); names without a recognized prefix register
/// as `ANY`.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub name: String,
    pub params: Vec<ActionParam>,
}

impl ActionDescriptor {
    pub fn new<N: Into<String>>(name: N) -> ActionDescriptor {
        ActionDescriptor {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, kind: ParamKind, optional: bool) -> ActionDescriptor {
        self.params.push(ActionParam { kind, optional });
        self
    }
}

/// A resolved controller reference: the capability the host's
/// controller-loading layer provides to the router.
pub trait ControllerSource {
    /// The controller name used on the left side of `"Controller@method"`
    /// callbacks.
    fn name(&self) -> &str;

    /// The public action methods, constructors and magic methods excluded.
    fn actions(&self) -> Vec<ActionDescriptor>;
}

/// A plain in-memory [`ControllerSource`], convenient when the host builds
/// descriptors up front.
#[derive(Debug, Clone)]
pub struct ControllerDescriptor {
    name: String,
    actions: Vec<ActionDescriptor>,
}

impl ControllerDescriptor {
    pub fn new<N: Into<String>>(name: N) -> ControllerDescriptor {
        ControllerDescriptor {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> ControllerDescriptor {
        self.actions.push(action);
        self
    }
}

impl ControllerSource for ControllerDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        self.actions.clone()
    }
}

/// Options for controller-based registration: an action allowlist/denylist
/// plus the middleware applied to every generated route.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    pub only: Vec<String>,
    pub except: Vec<String>,
    pub before: Middlewares,
    pub after: Middlewares,
}

impl ControllerOptions {
    pub(crate) fn allows(&self, action: &str) -> bool {
        if !self.only.is_empty() && !self.only.iter().any(|allowed| allowed == action) {
            return false;
        }
        !self.except.iter().any(|denied| denied == action)
    }
}

/// Converts a camel-case action-name remainder into a hyphen-case URL
/// segment: `UserProfile` becomes `user-profile`.
pub(crate) fn camel_to_hyphen(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_camel_case_to_hyphen_case() {
        assert_eq!(camel_to_hyphen("UserProfile"), "user-profile");
        assert_eq!(camel_to_hyphen("About"), "about");
        assert_eq!(camel_to_hyphen("x"), "x");
        assert_eq!(camel_to_hyphen(""), "");
    }

    #[test]
    fn param_kinds_map_to_placeholders() {
        assert_eq!(ParamKind::Int.placeholder(), ":id");
        assert_eq!(ParamKind::Str.placeholder(), ":string");
        assert_eq!(ParamKind::Float.placeholder(), ":any");
        assert_eq!(ParamKind::Untyped.placeholder(), ":any");
    }

    #[test]
    fn only_and_except_filters() {
        let opts = ControllerOptions {
            only: vec!["getUser".into()],
            ..Default::default()
        };
        assert!(opts.allows("getUser"));
        assert!(!opts.allows("postUser"));

        let opts = ControllerOptions {
            except: vec!["postUser".into()],
            ..Default::default()
        };
        assert!(opts.allows("getUser"));
        assert!(!opts.allows("postUser"));
    }
}
