//! Macros for ergonomic state-set construction.

/// Build a [`StateSet`](crate::core::StateSet) from state names.
///
/// # Example
///
/// ```
/// use multistate::state_set;
///
/// let states = state_set!["picking", "packing", "picking"];
/// assert_eq!(states.len(), 2);
///
/// let empty = state_set![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! state_set {
    () => {
        $crate::core::StateSet::new()
    };
    ($($state:expr),+ $(,)?) => {{
        let mut set = $crate::core::StateSet::new();
        $(set.insert($state);)+
        set
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::StateSet;

    #[test]
    fn state_set_macro_collects_names() {
        let states = state_set!["a", String::from("b"), "a"];
        assert_eq!(states.to_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn state_set_macro_supports_trailing_comma() {
        let states = state_set!["x", "y",];
        assert_eq!(states.len(), 2);
    }

    #[test]
    fn empty_state_set_macro() {
        let states: StateSet = state_set![];
        assert!(states.is_empty());
    }
}
