//! Lexical scope stack for translation bindings.
//!
//! A frame is pushed when entering a function, arrow function or block and
//! popped on exit. Lookups walk from the innermost frame outwards, so an inner
//! declaration shadows an outer one for as long as its frame is active.

use crate::core::binding::Binding;

/// One lexical scope.
#[derive(Debug, Default)]
struct ScopeFrame {
    /// Declarations in insertion order. `None` marks a name that was
    /// re-declared with a non-accessor value and hides outer bindings.
    bindings: Vec<(String, Option<Binding>)>,
    /// The enclosing function declares a `t` / `tXxx` parameter.
    translation_param: bool,
}

impl ScopeFrame {
    fn get(&self, name: &str) -> Option<&Option<Binding>> {
        self.bindings
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, binding)| binding)
    }

    fn set(&mut self, name: String, binding: Option<Binding>) {
        if let Some(slot) = self.bindings.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = binding;
        } else {
            self.bindings.push((name, binding));
        }
    }
}

/// Stack of scope frames (innermost last). The module frame is never popped.
///
/// # Example
/// ```ignore
/// const t = useTranslations("common");  // frame 0: t -> bound("common")
/// function Inner() {                    // push frame 1
///     const t = useTranslations();      // frame 1: t -> root (shadows frame 0)
///     t("auth.login");                  // resolves to frame 1
/// }                                     // pop frame 1
/// t("cancel");                          // resolves to frame 0 again
/// ```
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    pub fn exit_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Register a binding in the innermost frame.
    pub fn insert_binding(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(frame) = self.frames.last_mut() {
            frame.set(name.into(), Some(binding));
        }
    }

    /// Declaration of `name` without an accessor value (`let t;`, `const t = 1`).
    ///
    /// Hides outer bindings and gives a later `t = useTranslations(...)` a
    /// declaring frame to update.
    pub fn declare(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.set(name.to_string(), None);
        }
    }

    /// Plain assignment `t = useTranslations(...)`: updates the frame that
    /// declared `t`, or the innermost frame if no frame did.
    pub fn assign_binding(&mut self, name: &str, binding: Binding) {
        let declaring = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.get(name).is_some());
        match declaring {
            Some(frame) => frame.set(name.to_string(), Some(binding)),
            None => self.insert_binding(name, binding),
        }
    }

    /// Look up a binding, innermost frame first.
    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .and_then(|binding| binding.as_ref())
    }

    /// Mark the innermost frame as belonging to a function with a translation
    /// parameter.
    pub fn mark_translation_param(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.translation_param = true;
        }
    }

    /// A binding is visible, or an enclosing function takes a `t` parameter.
    pub fn is_translation_aware(&self) -> bool {
        self.frames.iter().any(|frame| frame.translation_param)
            || self.frames.iter().enumerate().any(|(idx, frame)| {
                frame.bindings.iter().any(|(name, binding)| {
                    binding.is_some() && self.is_visible_at(name, idx)
                })
            })
    }

    /// Innermost visible bound-scoped binding, latest declaration first.
    pub fn nearest_bound_namespace(&self) -> Option<&str> {
        for (idx, frame) in self.frames.iter().enumerate().rev() {
            for (name, binding) in frame.bindings.iter().rev() {
                if let Some(binding) = binding
                    && binding.kind == crate::core::BindingKind::Bound
                    && self.is_visible_at(name, idx)
                    && let Some(namespace) = binding.namespace.as_deref()
                {
                    return Some(namespace);
                }
            }
        }
        None
    }

    /// True when no frame above `idx` re-declares `name`.
    fn is_visible_at(&self, name: &str, idx: usize) -> bool {
        !self.frames[idx + 1..]
            .iter()
            .any(|frame| frame.get(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::binding::scope::*;
    use crate::core::binding::{Binding, BindingKind};

    #[test]
    fn test_new_has_module_scope() {
        let stack = ScopeStack::new();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_exit_scope_keeps_module_scope() {
        let mut stack = ScopeStack::new();
        stack.exit_scope();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut stack = ScopeStack::new();
        stack.insert_binding("t", Binding::bound("outer"));

        stack.enter_scope();
        stack.insert_binding("t", Binding::bound("inner"));
        assert_eq!(stack.get_binding("t"), Some(&Binding::bound("inner")));

        stack.exit_scope();
        assert_eq!(stack.get_binding("t"), Some(&Binding::bound("outer")));
    }

    #[test]
    fn test_declare_hides_outer_binding() {
        let mut stack = ScopeStack::new();
        stack.insert_binding("t", Binding::root());

        stack.enter_scope();
        stack.declare("t");
        assert!(stack.get_binding("t").is_none());
        assert!(!stack.is_translation_aware());

        stack.exit_scope();
        assert_eq!(stack.get_binding("t"), Some(&Binding::root()));
    }

    #[test]
    fn test_declare_without_outer_binding() {
        let mut stack = ScopeStack::new();
        stack.declare("t");
        assert!(stack.get_binding("t").is_none());
        assert!(!stack.is_translation_aware());
    }

    #[test]
    fn test_assign_after_uninitialized_declaration() {
        let mut stack = ScopeStack::new();
        stack.enter_scope();
        stack.declare("t");

        stack.enter_scope();
        stack.assign_binding("t", Binding::bound("b"));
        stack.exit_scope();

        assert_eq!(stack.get_binding("t"), Some(&Binding::bound("b")));
        stack.exit_scope();
        assert!(stack.get_binding("t").is_none());
    }

    #[test]
    fn test_assign_updates_declaring_frame() {
        let mut stack = ScopeStack::new();
        stack.insert_binding("t", Binding::root());
        stack.enter_scope();
        stack.assign_binding("t", Binding::bound("auth"));
        stack.exit_scope();

        assert_eq!(stack.get_binding("t"), Some(&Binding::bound("auth")));
    }

    #[test]
    fn test_translation_aware_from_param() {
        let mut stack = ScopeStack::new();
        assert!(!stack.is_translation_aware());

        stack.enter_scope();
        stack.mark_translation_param();
        assert!(stack.is_translation_aware());

        stack.enter_scope();
        assert!(stack.is_translation_aware());

        stack.exit_scope();
        stack.exit_scope();
        assert!(!stack.is_translation_aware());
    }

    #[test]
    fn test_nearest_bound_namespace() {
        let mut stack = ScopeStack::new();
        stack.insert_binding("t", Binding::bound("common"));
        stack.enter_scope();
        stack.insert_binding("tAuth", Binding::bound("auth"));
        stack.insert_binding("tRoot", Binding::root());

        assert_eq!(stack.nearest_bound_namespace(), Some("auth"));

        stack.exit_scope();
        assert_eq!(stack.nearest_bound_namespace(), Some("common"));
    }

    #[test]
    fn test_nearest_bound_namespace_skips_unknown() {
        let mut stack = ScopeStack::new();
        stack.insert_binding("t", Binding::unknown(true));
        assert_eq!(stack.nearest_bound_namespace(), None);
        assert_eq!(
            stack.get_binding("t").map(|b| b.kind),
            Some(BindingKind::Unknown)
        );
    }
}
