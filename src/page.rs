// Page model - typed stand-ins for the two page elements this tool drives
//
// The texts site renders a flag control and a star control; this module holds
// their state the way the page's DOM does: as sets of style classes on known
// element ids. All mutations are synchronous and idempotent, so repeated
// events (hover churn, rapid clicks) cannot drift the visual state.

/// Element id of the hoverable flag control.
pub const FLAG_ELEMENT_ID: &str = "flag-text";

/// Element id of the starrable control.
pub const STAR_ELEMENT_ID: &str = "star-text";

/// Element id of the star control's nested icon.
pub const STAR_ICON_ID: &str = "glyph-star";

/// Class applied to the flag control while the pointer is over it.
pub const DANGER_CLASS: &str = "btn-danger";

/// Icon class for the unstarred state.
pub const EMPTY_STAR_CLASS: &str = "glyphicon-star-empty";

/// Icon class for the starred state.
pub const FILLED_STAR_CLASS: &str = "glyphicon-star";

/// An ordered set of style class names.
///
/// Mirrors DOM classList semantics: adding a present class or removing an
/// absent one is a no-op, and insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    classes: Vec<String>,
}

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a class set from an initial list.
    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for class in classes {
            set.add(class.into().as_str());
        }
        set
    }

    /// Add a class. No-op if already present.
    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class. No-op if absent.
    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The hoverable flag control (`#flag-text`).
///
/// Its only scripted behavior is the hover highlight: the `btn-danger` class
/// is present exactly while the pointer is over the control. The control's
/// click action belongs to the page itself and is out of scope here.
#[derive(Debug, Clone)]
pub struct HoverControl {
    pub element_id: &'static str,
    pub classes: ClassSet,
}

impl HoverControl {
    pub fn new() -> Self {
        Self {
            element_id: FLAG_ELEMENT_ID,
            classes: ClassSet::new(),
        }
    }

    /// Pointer entered the control: apply the highlight class.
    pub fn pointer_enter(&mut self) {
        self.classes.add(DANGER_CLASS);
    }

    /// Pointer left the control: remove the highlight class.
    pub fn pointer_leave(&mut self) {
        self.classes.remove(DANGER_CLASS);
    }

    /// Whether the control currently shows the hover highlight.
    pub fn is_highlighted(&self) -> bool {
        self.classes.contains(DANGER_CLASS)
    }
}

impl Default for HoverControl {
    fn default() -> Self {
        Self::new()
    }
}

/// The starrable control (`#star-text`) and its nested icon (`#glyph-star`).
///
/// Carries the opaque text identifier (`data-star-textid`) used to address
/// the remote resource. The icon class set is mutated only by
/// [`StarControl::mark_starred`], which the UI calls after a star request
/// reports success - never optimistically.
#[derive(Debug, Clone)]
pub struct StarControl {
    pub element_id: &'static str,
    pub icon_element_id: &'static str,
    /// Value of the `data-star-textid` attribute.
    pub text_id: String,
    /// Class set of the nested `#glyph-star` icon.
    pub icon_classes: ClassSet,
}

impl StarControl {
    /// Create the control in its unstarred state.
    pub fn new(text_id: impl Into<String>) -> Self {
        Self {
            element_id: STAR_ELEMENT_ID,
            icon_element_id: STAR_ICON_ID,
            text_id: text_id.into(),
            icon_classes: ClassSet::from_classes([EMPTY_STAR_CLASS]),
        }
    }

    /// Transition the icon from the empty star to the filled star.
    ///
    /// One-way and idempotent at the class level: late responses from
    /// concurrent requests re-apply the same mutation harmlessly.
    pub fn mark_starred(&mut self) {
        self.icon_classes.remove(EMPTY_STAR_CLASS);
        self.icon_classes.add(FILLED_STAR_CLASS);
    }

    /// Whether the icon currently shows the filled star.
    pub fn is_starred(&self) -> bool {
        self.icon_classes.contains(FILLED_STAR_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_add_is_idempotent() {
        let mut set = ClassSet::new();
        set.add("btn");
        set.add("btn");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_class_remove_absent_is_noop() {
        let mut set = ClassSet::new();
        set.remove("missing");
        assert!(set.is_empty());
    }

    #[test]
    fn test_hover_enter_then_leave() {
        let mut flag = HoverControl::new();
        assert!(!flag.is_highlighted());

        flag.pointer_enter();
        assert!(flag.is_highlighted());

        flag.pointer_leave();
        assert!(!flag.is_highlighted());
    }

    #[test]
    fn test_hover_enter_leave_enter_ends_highlighted() {
        let mut flag = HoverControl::new();
        flag.pointer_enter();
        flag.pointer_leave();
        flag.pointer_enter();
        assert!(flag.is_highlighted());
        // Exactly one class, not one per enter
        assert_eq!(flag.classes.len(), 1);
    }

    #[test]
    fn test_hover_hundred_cycles_no_drift() {
        let mut flag = HoverControl::new();
        for _ in 0..100 {
            flag.pointer_enter();
            flag.pointer_leave();
        }
        assert!(!flag.is_highlighted());
        assert!(flag.classes.is_empty());

        // One more cycle ends the same way a single cycle would
        flag.pointer_enter();
        assert!(flag.is_highlighted());
        assert_eq!(flag.classes.len(), 1);
    }

    #[test]
    fn test_star_control_starts_unstarred() {
        let star = StarControl::new("42");
        assert!(!star.is_starred());
        assert!(star.icon_classes.contains(EMPTY_STAR_CLASS));
        assert_eq!(star.text_id, "42");
    }

    #[test]
    fn test_controls_carry_the_page_element_ids() {
        let flag = HoverControl::new();
        let star = StarControl::new("42");
        assert_eq!(flag.element_id, "flag-text");
        assert_eq!(star.element_id, "star-text");
        assert_eq!(star.icon_element_id, "glyph-star");
    }

    #[test]
    fn test_mark_starred_swaps_icon_classes() {
        let mut star = StarControl::new("42");
        star.mark_starred();
        assert!(star.icon_classes.contains(FILLED_STAR_CLASS));
        assert!(!star.icon_classes.contains(EMPTY_STAR_CLASS));
    }

    #[test]
    fn test_mark_starred_is_idempotent() {
        // Late responses from concurrent clicks re-apply the transition
        let mut star = StarControl::new("42");
        star.mark_starred();
        let after_first = star.icon_classes.clone();
        star.mark_starred();
        star.mark_starred();
        assert_eq!(star.icon_classes, after_first);
        assert_eq!(star.icon_classes.len(), 1);
    }
}
